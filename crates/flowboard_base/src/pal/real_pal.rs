use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::{FlowboardError, FlowboardResult, error::ErrorKind};

use super::FilePath;
use super::http::{
    HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle, HttpService,
    HttpStatusCode,
};
use super::traits::{Pal, ReadSeek};

/// How often the accept loop wakes up to check the shutdown flag.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/* 📖 # Why tiny_http and a thread per request?

The whole service is synchronous: a handler validates input, appends to a store and
blocks on the SMTP relay before answering. tiny_http hands out requests from a single
accept loop; spawning a thread per request keeps one slow mail send from stalling every
other client, without pulling an async runtime into a project that has no other use for it.
*/

/// Concrete PAL implementation using the real filesystem and tiny_http.
///
/// All file paths are resolved relative to a configured base directory.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to an absolute filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> FlowboardResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.is_file();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> FlowboardResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Box::new(FlowboardError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self, service), fields(address = %config.address()))]
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> FlowboardResult<HttpServerHandle> {
        let server = tiny_http::Server::http(config.address()).map_err(|e| {
            Box::new(FlowboardError::message(format!(
                "Failed to bind HTTP server to {}: {}",
                config.address(),
                e
            )))
        })?;
        let port = server
            .server_addr()
            .to_ip()
            .map(|address| address.port())
            .ok_or_else(|| crate::err!("HTTP server is not listening on an IP address"))?;

        let handle = HttpServerHandle::new(port);
        let shutdown = Arc::clone(handle.shutdown_flag());
        let service: Arc<dyn HttpService> = Arc::from(service);

        thread::Builder::new()
            .name(format!("http-accept-{}", port))
            .spawn(move || {
                info!(port, "HTTP server accepting connections");
                while !shutdown.load(Ordering::SeqCst) {
                    match server.recv_timeout(ACCEPT_POLL_INTERVAL) {
                        Ok(Some(request)) => {
                            let service = Arc::clone(&service);
                            let spawned = thread::Builder::new()
                                .name("http-request".to_string())
                                .spawn(move || respond(service.as_ref(), request));
                            if let Err(e) = spawned {
                                error!(error = %e, "failed to spawn request thread");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!(error = %e, "HTTP accept loop failed");
                            break;
                        }
                    }
                }
                info!(port, "HTTP server stopped");
            })
            .map_err(|e| crate::err!("Failed to spawn HTTP accept thread: {}", e))?;

        Ok(handle)
    }
}

/// Convert a tiny_http request, run it through the service and write the response.
fn respond(service: &dyn HttpService, mut request: tiny_http::Request) {
    let method_name = request.method().as_str().to_string();
    let url = request.url().to_string();

    let response = match HttpMethod::parse(&method_name) {
        Some(method) => match to_http_request(method, &mut request) {
            Ok(http_request) => match service.handle_request(http_request) {
                Ok(response) => response,
                Err(e) => {
                    error!(method = %method_name, url = %url, error = ?e, "service failed");
                    HttpResponse::text(
                        HttpStatusCode::NetworkConnectTimeoutError,
                        "Internal server error",
                    )
                }
            },
            Err(e) => {
                warn!(method = %method_name, url = %url, error = %e, "failed to read request body");
                HttpResponse::text(HttpStatusCode::BadRequest, "Failed to read request body")
            }
        },
        None => HttpResponse::text(
            HttpStatusCode::NotImplemented,
            format!("Method {} is not supported", method_name),
        ),
    };

    let status = response.status();
    debug!(method = %method_name, url = %url, status = status.as_u16(), "request handled");

    let headers: Vec<tiny_http::Header> = response
        .headers()
        .iter()
        .filter_map(|(key, value)| tiny_http::Header::from_bytes(key.as_bytes(), value.as_bytes()).ok())
        .collect();
    let body = response.into_body().into_bytes();
    let length = body.len();
    let tiny_response = tiny_http::Response::new(
        tiny_http::StatusCode(status.as_u16()),
        headers,
        std::io::Cursor::new(body),
        Some(length),
        None,
    );

    if let Err(e) = request.respond(tiny_response) {
        warn!(url = %url, error = %e, "failed to write response");
    }
}

fn to_http_request(
    method: HttpMethod,
    request: &mut tiny_http::Request,
) -> std::io::Result<HttpRequest> {
    let mut body = Vec::new();
    request.as_reader().read_to_end(&mut body)?;

    let mut http_request = HttpRequest::new(method, request.url()).with_body(body);
    for header in request.headers() {
        http_request
            .headers_mut()
            .insert(header.field.to_string(), header.value.to_string());
    }
    Ok(http_request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpStream;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, RealPal) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let pal = RealPal::new(temp_dir.path().to_path_buf());
        (temp_dir, pal)
    }

    #[derive(Debug)]
    struct PathService;

    impl HttpService for PathService {
        fn handle_request(&self, request: HttpRequest) -> FlowboardResult<HttpResponse> {
            if request.path() == "/boom" {
                return Err(crate::err!("boom"));
            }
            Ok(HttpResponse::text(
                HttpStatusCode::Ok,
                format!("{} {}", request.method(), request.path()),
            ))
        }
    }

    fn roundtrip(port: u16, raw_request: &str) -> String {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
        stream.write_all(raw_request.as_bytes()).unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn test_file_exists() {
        let (temp_dir, pal) = setup_test_dir();
        fs::create_dir(temp_dir.path().join("public")).unwrap();
        fs::write(temp_dir.path().join("public/index.html"), "<html>").unwrap();

        assert!(pal.file_exists(&FilePath::from("public/index.html")).unwrap());
        assert!(!pal.file_exists(&FilePath::from("public/missing.html")).unwrap());
        // Directories are not files
        assert!(!pal.file_exists(&FilePath::from("public")).unwrap());
    }

    #[test]
    fn test_read_file_to_string() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("index.html"), "<h1>FlowBoard</h1>").unwrap();

        let content = pal
            .read_file_to_string(&FilePath::from("index.html"))
            .unwrap();
        assert_eq!(content, "<h1>FlowBoard</h1>");
    }

    #[test]
    fn test_read_file_not_found() {
        let (_temp_dir, pal) = setup_test_dir();
        let result = pal.read_file(&FilePath::from("nonexistent.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_http_server_round_trip() {
        let (_temp_dir, pal) = setup_test_dir();
        let handle = pal
            .start_http_server(Box::new(PathService), HttpServerConfig::new("127.0.0.1"))
            .unwrap();

        let response = roundtrip(
            handle.port(),
            "GET /api/health?x=1 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        );
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("GET /api/health"));
    }

    #[test]
    fn test_http_server_maps_service_errors_to_599() {
        let (_temp_dir, pal) = setup_test_dir();
        let handle = pal
            .start_http_server(Box::new(PathService), HttpServerConfig::new("127.0.0.1"))
            .unwrap();

        let response = roundtrip(
            handle.port(),
            "GET /boom HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        );
        assert!(response.starts_with("HTTP/1.1 599"));
        assert!(response.ends_with("Internal server error"));
        assert!(!response.contains("boom"));
    }
}
