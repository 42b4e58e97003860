/* 📖 # Why an API module in flowboard_engine?

The api module turns HTTP requests into store appends and outgoing mail. ApiService
implements the HttpService trait from flowboard_base, so the same service runs on
RealPal in production and on MockPal in tests.

Each endpoint lives in its own file as an `impl ApiService` block; `service.rs` owns
routing, CORS and the shared helpers, `error.rs` the mapping from handler failures to
responses, and `forms.rs` the request body decoding.
*/

mod admin;
mod contact;
mod demo;
mod error;
mod forms;
mod service;
mod signup;
mod status;

pub use admin::RECENT_LEADS_LIMIT;
pub use error::ApiError;
pub use service::ApiService;
pub use status::SERVICE_VERSION;
