//! Request handling helpers.
//!
//! # Responsibilities
//! - Expose the request ID assigned by the request-id layer
//! - Produce the decoded path the router resolves against
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Paths are percent-decoded once, before resolution; `+` is literal in paths

use std::borrow::Cow;

use axum::extract::Request;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that assigns a UUID v4 request ID unless the client sent one.
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Access to the request ID on a request.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for axum::http::Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }
}

/// The decoded path of a request.
pub fn request_path(request: &Request) -> Cow<'_, str> {
    decode_path(request.uri().path())
}

/// Percent-decode a URL path.
///
/// Invalid escapes are kept as-is; invalid UTF-8 is replaced lossily.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    if !path.contains('%') {
        return Cow::Borrowed(path);
    }

    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                decoded.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    Cow::Owned(String::from_utf8_lossy(&decoded).into_owned())
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_plain_path_is_borrowed() {
        assert!(matches!(decode_path("/users/1"), Cow::Borrowed("/users/1")));
    }

    #[test]
    fn test_decodes_escapes() {
        assert_eq!(decode_path("/files/my%20doc.txt"), "/files/my doc.txt");
        assert_eq!(decode_path("/caf%C3%A9"), "/café");
        assert_eq!(decode_path("/a+b"), "/a+b");
    }

    #[test]
    fn test_invalid_escapes_kept() {
        assert_eq!(decode_path("/100%"), "/100%");
        assert_eq!(decode_path("/%zz"), "/%zz");
        assert_eq!(decode_path("/%2"), "/%2");
    }

    #[test]
    fn test_request_id_ext() {
        let request = axum::http::Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request.request_id(), Some("abc-123"));

        let request = axum::http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(request.request_id(), None);
    }
}
