//! Authenticated HTTP request provider with typed, promise-style JSON
//! responses.
//!
//! warrant wraps an HTTP transport with two capabilities: every outgoing
//! request is intercepted and handed to an [`Authenticator`] before it is
//! sent, and every response is validated and decoded into a typed value or
//! typed collection, optionally scoped to a key path within the response
//! body.
//!
//! # Example
//!
//! ```ignore
//! use warrant::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     username: String,
//! }
//!
//! enum UserApi {
//!     GetUser { id: u64 },
//! }
//!
//! impl Target for UserApi {
//!     fn try_request(&self) -> warrant::Result<Request> {
//!         // render the endpoint into a request
//!     }
//! }
//!
//! let provider = Provider::new(BearerAuthenticator::new("my-secret-token"));
//! let user: User = provider
//!     .request_object(UserApi::GetUser { id: 42 }, None)
//!     .await?;
//! ```

mod authenticator;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod provider;

// Re-export provider and client types
pub use authenticator::{Authenticator, BearerAuthenticator};
pub use client::{HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use provider::Provider;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use warrant_core::{
    BoxError, DecodeReason, Error, HttpClient, Method, Request, RequestBuilder, Response, Result,
    Target, from_json, to_form, to_json,
};

// Re-export http types for status codes and headers
pub use warrant_core::{StatusCode, header};
