//! REST response types

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Result type of every client operation
pub type Response<R, E = HttpError> = Result<R, E>;

/// Fully read node response with status and headers
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    pub(crate) fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Response<T> {
        decode_body(&self.body)
    }
}

/// Decode a JSON body; an empty body reads as `null`
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Response<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null).map_err(HttpError::from);
    }

    serde_json::from_slice(body).map_err(HttpError::from)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn test_response_type_is_result() {
        let success: Response<i32> = Ok(42);
        assert!(matches!(success, Ok(42)));

        let error: Response<i32> = Err(HttpError::InvalidUrl("x".to_string()));
        assert!(matches!(error, Err(HttpError::InvalidUrl(_))));
    }

    #[test]
    fn test_raw_response_status_classes() {
        let ok = RawResponse::new(204, HeaderMap::new(), Vec::new());
        assert!(ok.is_success());
        assert!(!ok.is_client_error());

        let missing = RawResponse::new(404, HeaderMap::new(), b"Not Found".to_vec());
        assert!(missing.is_client_error());
        assert_eq!(missing.text(), "Not Found");

        let broken = RawResponse::new(503, HeaderMap::new(), Vec::new());
        assert!(broken.is_server_error());
    }

    #[test]
    fn test_decode_empty_body_as_null() {
        let result: Response<()> = decode_body(b"");
        assert!(result.is_ok());

        let value: Value = decode_body(b"  \n").expect("Blank body decodes to null");
        assert_eq!(value, Value::Null);

        let missing: Option<Value> = decode_body(b"").expect("Empty body decodes to None");
        assert!(missing.is_none());
    }

    #[test]
    fn test_decode_json_body() {
        let value: Value = decode_body(br#"{"ok":true}"#).expect("Valid JSON");
        assert_eq!(value, json!({"ok": true}));

        let result: Response<Value> = decode_body(b"<html>");
        assert!(matches!(result, Err(HttpError::Serialization(_))));
    }
}
