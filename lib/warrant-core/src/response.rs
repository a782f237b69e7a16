//! HTTP response handling and typed JSON decoding.
//!
//! [`Response`] gives access to status, headers, and body. The decoding
//! methods [`Response::object`] and [`Response::collection`] run the full
//! validation pipeline: status filtering (200-399 accepted), JSON parsing,
//! optional key-path scoping, and typed decode via serde.
//!
//! # Example
//!
//! ```ignore
//! // Decode the whole body
//! let user: User = response.object(None)?;
//!
//! // Decode the value under the top-level "data" key
//! let user: User = response.object(Some("data"))?;
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::DecodeReason;
use crate::{Error, Result};

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<Bytes> {
    /// Accept successful and redirect status codes (200-399 inclusive).
    ///
    /// # Errors
    ///
    /// Any other status fails with [`Error::Http`] carrying the raw body
    /// for caller inspection.
    pub fn filter_success_and_redirect(self) -> Result<Self> {
        if (200..400).contains(&self.status) {
            return Ok(self);
        }

        let message = http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("unexpected status")
            .to_string();

        Err(Error::http(self.status, message, self.body))
    }

    /// Decode the body into a single value of type `T`.
    ///
    /// Validates the status (200-399), parses the body as JSON, optionally
    /// scopes to the value under `key_path` (the parsed JSON must then be an
    /// object containing that key), and decodes the result into `T`.
    ///
    /// Consumes the response; the body may be single-consumption depending
    /// on the transport.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Http`] on a rejected status, or [`Error::Decoding`]
    /// on parse, key-path, or mapping failures.
    pub fn object<T: serde::de::DeserializeOwned>(self, key_path: Option<&str>) -> Result<T> {
        let checked = self.filter_success_and_redirect()?;
        match key_path {
            None => crate::from_json(&checked.body),
            Some(key) => decode_scoped(scope_to_key(&checked.body, key)?, key),
        }
    }

    /// Decode the body into a sequence of values of type `T`.
    ///
    /// Same pipeline as [`Response::object`]; the (possibly scoped) JSON
    /// value must be an array. Order is preserved from the source array.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Http`] on a rejected status, or [`Error::Decoding`]
    /// on parse, key-path, or mapping failures.
    pub fn collection<T: serde::de::DeserializeOwned>(
        self,
        key_path: Option<&str>,
    ) -> Result<Vec<T>> {
        let checked = self.filter_success_and_redirect()?;
        match key_path {
            None => crate::from_json(&checked.body),
            Some(key) => decode_scoped(scope_to_key(&checked.body, key)?, key),
        }
    }

    /// Deserialize the raw body as JSON without status validation.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

/// Parse the body and extract the value under a top-level key.
fn scope_to_key(body: &Bytes, key: &str) -> Result<serde_json::Value> {
    let parsed: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| Error::decoding(DecodeReason::Syntax(e.to_string())))?;

    let serde_json::Value::Object(mut object) = parsed else {
        return Err(Error::decoding(DecodeReason::KeyPath(key.to_string())));
    };

    object
        .remove(key)
        .ok_or_else(|| Error::decoding(DecodeReason::KeyPath(key.to_string())))
}

/// Decode a scoped JSON value, reporting the key as the error path.
fn decode_scoped<T: serde::de::DeserializeOwned>(value: serde_json::Value, key: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        Error::decoding(DecodeReason::Mapping {
            path: key.to_string(),
            message: e.to_string(),
        })
    })
}
