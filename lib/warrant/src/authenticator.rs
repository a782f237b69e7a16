//! Asynchronous request authentication.
//!
//! An [`Authenticator`] receives every outgoing request before transmission
//! and either returns an authenticated replacement or fails. Authentication
//! strictly gates transmission: the transport never sees a request the
//! authenticator has not approved.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{BoxError, Request};

/// Capability that authenticates outgoing requests.
///
/// Implementations are shared read-only across all requests issued by one
/// provider, and may suspend (e.g., to refresh a token) before resolving.
/// The returned request should be the input unchanged apart from whatever
/// credentials the authenticator attaches.
///
/// # Example
///
/// ```ignore
/// struct TokenStore { /* ... */ }
///
/// impl Authenticator for TokenStore {
///     async fn authenticate(&self, mut request: Request<Bytes>) -> Result<Request<Bytes>, BoxError> {
///         let token = self.fresh_token().await?;
///         request
///             .headers_mut()
///             .insert("Authorization".to_string(), format!("Bearer {token}"));
///         Ok(request)
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Produce the authenticated version of `request`, or fail.
    ///
    /// # Errors
    ///
    /// The error is surfaced to the caller unchanged, wrapped in
    /// [`crate::Error::Authentication`].
    fn authenticate(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Request<Bytes>, BoxError>> + Send;
}

/// Authenticator that attaches a static bearer token.
///
/// # Example
///
/// ```ignore
/// use warrant::{BearerAuthenticator, Provider};
///
/// let provider = Provider::new(BearerAuthenticator::new("my-secret-token"));
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuthenticator {
    token: Arc<str>,
}

impl BearerAuthenticator {
    /// Create a new bearer authenticator with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl Authenticator for BearerAuthenticator {
    async fn authenticate(
        &self,
        mut request: Request<Bytes>,
    ) -> Result<Request<Bytes>, BoxError> {
        request.headers_mut().insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token),
        );
        Ok(request)
    }
}
