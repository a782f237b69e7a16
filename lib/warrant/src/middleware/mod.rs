//! Tower middleware layers for the warrant HTTP client.
//!
//! Layers compose over the transport service via [`crate::HyperClient`]'s
//! builder. Request authentication is deliberately not a layer here: the
//! [`crate::Authenticator`] runs in the provider pipeline, before the
//! transport service is ever invoked.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use warrant::HyperClient;
//! use warrant::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
