use std::io::{Read, Seek};
use std::sync::Arc;

use crate::FlowboardResult;

use super::file_path::FilePath;
use super::http::{HttpServerConfig, HttpServerHandle, HttpService};

/// Trait combining Read + Seek for file operations.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/* 📖 # Why is Pal a trait instead of a struct?

The service reads static assets and listens for HTTP traffic. Putting both behind a
trait means:
1. **Testability**: MockPal serves in-memory files and simulated requests
2. **Flexibility**: Code depends on the abstraction, not the concrete implementation
*/

/// Platform Abstraction Layer (PAL) trait providing filesystem and HTTP server operations.
///
/// Two implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs` and tiny_http for serving
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a regular file exists at the given path.
    fn file_exists(&self, path: &FilePath) -> FlowboardResult<bool>;

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> FlowboardResult<Box<dyn ReadSeek + 'static>>;

    /// Read entire file contents as bytes.
    fn read_file_to_bytes(&self, path: &FilePath) -> FlowboardResult<Vec<u8>> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).map_err(|e| {
            Box::new(crate::FlowboardError::new(
                crate::error::ErrorKind::FileError {
                    path: path.as_path().to_path_buf(),
                    source: e,
                },
            ))
        })?;
        Ok(contents)
    }

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> FlowboardResult<String> {
        let contents = self.read_file_to_bytes(path)?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }

    /// Start an HTTP server with the given service.
    ///
    /// The server starts immediately. When the last clone of the returned handle is
    /// dropped (or shutdown() is called), the server stops accepting connections.
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> FlowboardResult<HttpServerHandle>;
}

/// Handle to a PAL implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn Pal>` for cheap cloning and thread-safe sharing.
///
/// ```no_run
/// use flowboard_base::{RealPal, PalHandle};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone(); // Cheap clone, shares the same implementation
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
