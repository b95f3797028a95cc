//! Error types for the feather API client.
//!
//! # Design
//! A single `ApiError` covers every recoverable failure of a call. The
//! variants fall into three groups:
//!
//! - `Unauthorized`, `NotFound`, `Response` are reserved for status-code
//!   classification at the endpoint layer. Nothing in the request pipeline
//!   produces them; a 404 reply is still a successful `Content`.
//! - `InvalidResponse` and `Unknown` come from the transport.
//! - `Decoding` and `Encoding` come from the body codec.
//!
//! Misconfiguration (a malformed base URL) is not represented here. It panics.

/// Opaque failure reported by a `Transport` before any reply was received.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `FeatherClient` calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server replied with an unexpected response.
    #[error("unexpected response")]
    Response,

    /// The transport replied with something that is not an HTTP response.
    #[error("invalid HTTP response")]
    InvalidResponse,

    /// The transport failed before a reply arrived (DNS, connect, timeout...).
    #[error("transport failure")]
    Unknown(#[source] TransportError),

    /// The response body could not be decoded into the expected type.
    #[error("decoding failed: {0}")]
    Decoding(String),

    /// The request payload could not be encoded.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn unknown_reports_cause_only_through_source() {
        let cause: TransportError = "connection refused".into();
        let err = ApiError::Unknown(cause);
        assert_eq!(err.to_string(), "transport failure");
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
    }

    #[test]
    fn decoding_message_is_displayed() {
        let err = ApiError::Decoding("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.to_string(),
            "decoding failed: expected value at line 1 column 1"
        );
    }
}
