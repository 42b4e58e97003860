use serde::de::DeserializeOwned;
use tracing::debug;

use flowboard_base::pal::http::HttpRequest;

use super::error::ApiError;

/// Decode a JSON object request body into a form.
///
/// An empty body decodes as an empty form, so it fails the endpoint's presence checks
/// rather than the JSON check. Anything that is not a JSON object, or whose known
/// fields are not strings or null, is rejected.
pub fn parse_form<T: DeserializeOwned + Default>(request: &HttpRequest) -> Result<T, ApiError> {
    let body = request.body().as_bytes();
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting malformed JSON body");
        ApiError::invalid_body()
    })?;
    if !value.is_object() {
        debug!("rejecting JSON body that is not an object");
        return Err(ApiError::invalid_body());
    }
    serde_json::from_value(value).map_err(|e| {
        debug!(error = %e, "rejecting JSON body with mistyped fields");
        ApiError::invalid_body()
    })
}

/// A submitted field, with `null`, missing and `""` all treated as absent.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
