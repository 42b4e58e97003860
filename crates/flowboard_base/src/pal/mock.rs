use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use parking_lot::Mutex;

use crate::FlowboardError;
use crate::FlowboardResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::http::{HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle, HttpService};
use super::traits::{Pal, ReadSeek};

/* 📖 # Why use HashMap for MockPal storage?

MockPal keeps files and registered servers in memory behind Arc<Mutex<_>>:
1. **Speed**: No filesystem or socket I/O, deterministic and fast for unit tests
2. **Isolation**: No side effects on the real filesystem or network
3. **Control**: Tests decide exactly which static assets exist
*/

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use flowboard_base::{pal::MockPal, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("public/index.html"), b"<html></html>".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("public/index.html")).unwrap();
/// assert_eq!(content, "<html></html>");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    http_servers: Arc<Mutex<HashMap<u16, Arc<dyn HttpService>>>>,
    next_port: Arc<AtomicU16>,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            http_servers: Arc::new(Mutex::new(HashMap::new())),
            next_port: Arc::new(AtomicU16::new(10000)),
        }
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().insert(path, content);
    }

    /// Simulate an HTTP request to a running server.
    ///
    /// Looks up the service registered for `port` and invokes it on the calling thread.
    pub fn simulate_request(
        &self,
        port: u16,
        request: HttpRequest,
    ) -> FlowboardResult<HttpResponse> {
        // Release the registry lock before dispatching so services may be re-entered.
        let service = self.http_servers.lock().get(&port).cloned().ok_or_else(|| {
            Box::new(FlowboardError::message(format!(
                "No HTTP server registered on port {}",
                port
            )))
        })?;

        service.handle_request(request)
    }

    /// Get the number of registered HTTP servers.
    pub fn http_server_count(&self) -> usize {
        self.http_servers.lock().len()
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> FlowboardResult<bool> {
        Ok(self.files.lock().contains_key(path))
    }

    fn read_file(&self, path: &FilePath) -> FlowboardResult<Box<dyn ReadSeek + 'static>> {
        let content = self.files.lock().get(path).cloned().ok_or_else(|| {
            Box::new(FlowboardError::new(ErrorKind::FileError {
                path: path.as_path().to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ),
            }))
        })?;
        Ok(Box::new(Cursor::new(content)))
    }

    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> FlowboardResult<HttpServerHandle> {
        let port = match config.port {
            Some(p) => p,
            None => self.next_port.fetch_add(1, Ordering::SeqCst),
        };

        self.http_servers.lock().insert(port, Arc::from(service));

        Ok(HttpServerHandle::new(port))
    }
}
