//! Endpoint target descriptions.

use bytes::Bytes;

use crate::{Request, Result};

/// An opaque description of one endpoint/operation.
///
/// Targets are produced by the consuming application, typically as an enum
/// with one variant per endpoint. The provider only asks a target to render
/// itself into an outgoing [`Request`]; URL construction and routing stay on
/// the application side.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use warrant_core::{Error, Method, Request, Result, Target};
///
/// enum UserApi {
///     GetUser { base: url::Url, id: u64 },
/// }
///
/// impl Target for UserApi {
///     fn try_request(&self) -> Result<Request<Bytes>> {
///         match self {
///             Self::GetUser { base, id } => {
///                 let url = base
///                     .join(&format!("users/{id}"))
///                     .map_err(|e| Error::request_construction(e.to_string()))?;
///                 Ok(Request::builder(Method::Get, url).build())
///             }
///         }
///     }
/// }
/// ```
pub trait Target {
    /// Build the outgoing request for this endpoint.
    ///
    /// This is the base request construction step of the pipeline. When it
    /// fails the provider surfaces the error immediately and the
    /// authenticator is never consulted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RequestConstruction`] if the request cannot
    /// be built (e.g., no resolvable URL).
    fn try_request(&self) -> Result<Request<Bytes>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    struct Ping {
        base: url::Url,
    }

    impl Target for Ping {
        fn try_request(&self) -> Result<Request<Bytes>> {
            let url = self
                .base
                .join("ping")
                .map_err(|e| crate::Error::request_construction(e.to_string()))?;
            Ok(Request::builder(Method::Get, url).build())
        }
    }

    #[test]
    fn target_builds_request() {
        let target = Ping {
            base: url::Url::parse("https://api.example.com/").expect("valid URL"),
        };

        let request = target.try_request().expect("request");
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://api.example.com/ping");
    }
}
