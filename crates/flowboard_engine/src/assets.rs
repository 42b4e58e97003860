/* 📖 # How are static files and the SPA fallback served?

The marketing site is a single-page app living in the static directory (`public/` by
default). Any GET request no API route claims is looked up as a file below that
directory; when there is no such file, `index.html` is served instead so client-side
routes like `/pricing` still load the app.

Request paths are percent-decoded before lookup. A path with `..` segments is never
resolved against the filesystem, it just gets the fallback page, so a request can
never read outside the static directory. All file access goes through the PAL, which
keeps this testable with MockPal.
*/

use percent_encoding::percent_decode_str;
use tracing::{debug, warn};

use flowboard_base::pal::http::{HttpResponse, HttpStatusCode};
use flowboard_base::{FilePath, FlowboardResult, PalHandle};

const INDEX_FILE: &str = "index.html";

/// Serves files from the static directory, falling back to `index.html`.
#[derive(Debug, Clone)]
pub struct StaticAssetService {
    pal: PalHandle,
    root: FilePath,
}

impl StaticAssetService {
    pub fn new(pal: PalHandle, root: impl Into<FilePath>) -> Self {
        Self {
            pal,
            root: root.into(),
        }
    }

    /// Serve the file for a request path, or the SPA fallback page.
    pub fn serve(&self, request_path: &str) -> FlowboardResult<HttpResponse> {
        if let Some(file) = self.resolve(request_path)? {
            return self.serve_file(&file);
        }

        let index = self.root.join(INDEX_FILE);
        if self.pal.file_exists(&index)? {
            debug!(path = request_path, "serving index.html fallback");
            return self.serve_file(&index);
        }

        warn!(path = request_path, root = %self.root, "no index.html in static directory");
        Ok(HttpResponse::text(HttpStatusCode::NotFound, "Not Found"))
    }

    /// Map a request path to an existing file below the root, if there is one.
    fn resolve(&self, request_path: &str) -> FlowboardResult<Option<FilePath>> {
        let Ok(decoded) = percent_decode_str(request_path).decode_utf8() else {
            debug!(path = request_path, "request path is not valid UTF-8");
            return Ok(None);
        };
        let relative = decoded.trim_start_matches('/');
        if relative.is_empty() {
            return Ok(None);
        }

        let candidate = self.root.join(relative);
        if candidate.escapes_base() {
            warn!(path = request_path, "rejected path with parent segments");
            return Ok(None);
        }
        if self.pal.file_exists(&candidate)? {
            Ok(Some(candidate))
        } else {
            Ok(None)
        }
    }

    fn serve_file(&self, file: &FilePath) -> FlowboardResult<HttpResponse> {
        let content = self.pal.read_file_to_bytes(file)?;
        debug!(file = %file, size = content.len(), "serving static file");
        Ok(HttpResponse::ok()
            .with_content_type(content_type_for(file))
            .with_body(content))
    }
}

/// Guess the MIME type based on file extension.
fn content_type_for(file: &FilePath) -> &'static str {
    let extension = file.extension().map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("xml") => "application/xml",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
