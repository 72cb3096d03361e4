//! Request body decoding for the write routes.

use actix_web::{HttpMessage, HttpRequest, web};
use serde_json::{Map, Value};

use crate::middleware::error::{AppError, AppResult};

/// Decode a write-route body into a JSON value.
///
/// A body that is not declared as JSON, or is empty, reads as `{}` so that
/// the schema reports the missing fields. Declared JSON that does not parse
/// is a validation error.
pub fn json_body(req: &HttpRequest, body: &web::Bytes) -> AppResult<Value> {
    if !is_json(req.content_type()) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(vec![format!("Invalid JSON: {e}")]))
}

/// `application/json` or any `+json` media type.
fn is_json(content_type: &str) -> bool {
    content_type.eq_ignore_ascii_case("application/json")
        || content_type.to_ascii_lowercase().ends_with("+json")
}
