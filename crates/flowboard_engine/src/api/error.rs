/* 📖 # How do handler failures reach the client?

Clients only ever see two kinds of failure, each with a fixed message:
- `Validation`: the request itself is unusable (missing fields, malformed JSON). 400.
- `Dispatch`: the request was fine but a side effect failed: appending to a store,
  sending mail or serializing the answer. 500, with a generic message per endpoint.

The underlying `FlowboardError` of a dispatch failure is logged and never returned.
Handlers never hand a raw `FlowboardError` to the HTTP layer; every fallible step is
turned into an `ApiError` through `or_dispatch`, which names the message the client
sees if that step fails.
*/

use serde_json::json;
use tracing::error;

use flowboard_base::pal::http::{HttpResponse, HttpStatusCode};
use flowboard_base::{FlowboardError, FlowboardResult};

pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// Message for failures of endpoints that have no message of their own.
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// Rejected input; nothing was stored or sent.
    Validation(&'static str),
    /// A store append, mail send or serialization failed.
    Dispatch {
        message: &'static str,
        cause: Box<FlowboardError>,
    },
}

impl ApiError {
    pub fn invalid_body() -> Self {
        ApiError::Validation(INVALID_JSON_BODY)
    }

    /// Turn the error into the response a client sees.
    pub fn into_response(self) -> HttpResponse {
        let (status, message) = match self {
            ApiError::Validation(message) => (HttpStatusCode::BadRequest, message),
            ApiError::Dispatch { message, cause } => {
                error!(error = ?cause, "{}", message);
                (HttpStatusCode::InternalServerError, message)
            }
        };
        HttpResponse::json(status, json!({ "error": message }).to_string())
    }
}

/// Attach the client-facing message to a fallible step of a handler.
pub(super) trait OrDispatch<T> {
    fn or_dispatch(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> OrDispatch<T> for FlowboardResult<T> {
    fn or_dispatch(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|cause| ApiError::Dispatch { message, cause })
    }
}
