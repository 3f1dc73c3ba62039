//! Common utilities shared across handlers.

use axum::{
    http::{header, StatusCode},
    response::Response,
};
use serde_json::json;

use uvd_common::UvdError;

/// Render an error as the JSON envelope all endpoints share.
pub fn json_error(err: &UvdError) -> Response {
    let body = json!({
        "error": {
            "code": err.code(),
            "message": err.to_string(),
        }
    });
    Response::builder()
        .status(StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.to_string().into())
        .unwrap()
}

/// Shorthand for a 400 with a named offending parameter.
pub fn invalid_parameter(param: &str, message: impl Into<String>) -> Response {
    json_error(&UvdError::InvalidParameter {
        param: param.to_string(),
        message: message.into(),
    })
}
