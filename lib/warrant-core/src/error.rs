//! Error types for warrant.

use bytes::Bytes;
use derive_more::{Display, Error, From};

/// Boxed error used to carry foreign failures (authenticator, transport)
/// without losing their identity. Callers can downcast to recover the
/// original type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Decoding Reasons
// ============================================================================

/// Reason attached to an [`Error::Decoding`] failure.
///
/// JSON parse failures, missing key paths, and typed mapping failures all
/// surface as one error kind, distinguished by this reason.
#[derive(Debug, Display)]
pub enum DecodeReason {
    /// The response body is not valid JSON.
    #[display("invalid JSON: {_0}")]
    Syntax(String),

    /// The parsed JSON is not an object, or the object has no such key.
    #[display("key path '{_0}' not found in response object")]
    KeyPath(String),

    /// The JSON value does not map onto the requested type.
    #[display("value mapping failed at '{path}': {message}")]
    Mapping {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for warrant operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The authenticator rejected the request.
    ///
    /// Wraps the authenticator's own error unchanged; downcast the boxed
    /// source to inspect it.
    #[display("authentication failed: {_0}")]
    #[from(skip)]
    Authentication(#[error(not(source))] BoxError),

    /// The base request could not be built from its target description
    /// (e.g., unresolvable URL). The authenticator is never consulted.
    #[display("request construction failed: {_0}")]
    #[from(skip)]
    RequestConstruction(#[error(not(source))] String),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Response status outside the accepted 200-399 range.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical status message.
        message: String,
        /// Raw response body, kept for caller inspection.
        #[error(not(source))]
        body: Bytes,
    },

    /// The response body could not be decoded into the requested type.
    #[display("decoding error: {_0}")]
    #[from(skip)]
    Decoding(#[error(not(source))] DecodeReason),

    /// The provider was discarded before the request settled.
    #[display("request canceled: provider dropped before completion")]
    #[from(skip)]
    Canceled,

    /// JSON serialization error (request bodies).
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error (request bodies).
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an authentication error wrapping a foreign failure.
    #[must_use]
    pub fn authentication(source: impl Into<BoxError>) -> Self {
        Self::Authentication(source.into())
    }

    /// Create a request construction error.
    #[must_use]
    pub fn request_construction(message: impl Into<String>) -> Self {
        Self::RequestConstruction(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an HTTP status error carrying the raw response body.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>, body: Bytes) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body,
        }
    }

    /// Create a decoding error with the given reason.
    #[must_use]
    pub const fn decoding(reason: DecodeReason) -> Self {
        Self::Decoding(reason)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the authenticator rejected the request.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns `true` if the request was canceled by provider disposal.
    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Returns the HTTP status code if this is an HTTP status error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns the response body if this is an HTTP status error.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body as JSON.
    ///
    /// Returns `Some(Ok(value))` if the error carries a body that
    /// deserializes successfully, `Some(Err(error))` if deserialization
    /// fails, or `None` if this is not an HTTP status error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::http(404, "Not Found", Bytes::new());
        assert_eq!(err.to_string(), "HTTP error 404: Not Found");

        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::request_construction("no resolvable URL");
        assert_eq!(
            err.to_string(),
            "request construction failed: no resolvable URL"
        );

        let err = Error::decoding(DecodeReason::KeyPath("data".to_string()));
        assert_eq!(
            err.to_string(),
            "decoding error: key path 'data' not found in response object"
        );
    }

    #[test]
    fn error_status() {
        let err = Error::http(404, "Not Found", Bytes::new());
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = Error::http(500, "Internal Server Error", Bytes::new());
        assert!(err.is_server_error());

        assert_eq!(Error::Timeout.status(), None);
    }

    #[test]
    fn error_predicates() {
        assert!(Error::Timeout.is_timeout());
        assert!(Error::connection("failed").is_connection());
        assert!(Error::Canceled.is_canceled());
        assert!(Error::authentication("token expired").is_authentication());
        assert!(!Error::Timeout.is_authentication());
    }

    #[test]
    fn error_authentication_preserves_source() {
        #[derive(Debug, PartialEq)]
        struct TokenExpired;

        impl std::fmt::Display for TokenExpired {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "token expired")
            }
        }

        impl std::error::Error for TokenExpired {}

        let err = Error::authentication(TokenExpired);
        assert_eq!(err.to_string(), "authentication failed: token expired");

        let Error::Authentication(source) = err else {
            panic!("expected authentication error");
        };
        assert!(source.is::<TokenExpired>());
    }

    #[test]
    fn error_body() {
        let body = Bytes::from(r#"{"error":"not found"}"#);
        let err = Error::http(404, "Not Found", body.clone());
        assert_eq!(err.body(), Some(&body));

        assert!(Error::Timeout.body().is_none());
    }

    #[test]
    fn error_decode_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct ApiError {
            error: String,
        }

        let body = Bytes::from(r#"{"error":"not found"}"#);
        let err = Error::http(404, "Not Found", body);

        let decoded = err.decode_body::<ApiError>().expect("should have body");
        assert_eq!(
            decoded.expect("should decode"),
            ApiError {
                error: "not found".to_string()
            }
        );

        assert!(Error::Timeout.decode_body::<ApiError>().is_none());
    }
}
