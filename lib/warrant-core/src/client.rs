//! HTTP client trait.
//!
//! [`HttpClient`] is the consumed transport capability: the provider hands it
//! a fully authenticated request and gets back the raw HTTP exchange result.
//! Implementations decide their own scheduling; the trait only requires that
//! execution happens off the caller's thread of control (`Send` futures).

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// This trait defines the interface for executing HTTP requests.
/// Implementations should be async-first and support connection pooling.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid response
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}
