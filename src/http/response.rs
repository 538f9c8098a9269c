//! Error responses.
//!
//! # Responsibilities
//! - Map routing errors to HTTP status codes
//! - Render a JSON `{"error": ...}` body
//! - Advertise allowed methods on 405 via the `Allow` header
//! - Keep the error of an opaque 500 in the response extensions, so a host
//!   in debug mode can expose it

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::routing::RoutingError;

/// JSON error body with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for RoutingError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if !self.is_resolution_error() {
            tracing::error!(error = %self, "Routing error reached a client");
            let mut response = json_error(status, "Internal Server Error");
            response.extensions_mut().insert(self);
            return response;
        }

        let mut response = json_error(status, self.to_string());
        if let RoutingError::MethodNotAllowed { allowed, .. } = &self {
            if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}
