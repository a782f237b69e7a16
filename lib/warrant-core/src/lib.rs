//! Core types for the warrant authenticated HTTP provider.
//!
//! This crate provides the foundational types used by warrant:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type with typed, key-path-aware JSON decoding
//! - [`Target`] - Opaque endpoint description, rendered into a request
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod client;
mod error;
mod method;
pub mod prelude;
mod request;
mod response;
mod target;

pub use body::{from_json, to_form, to_json};
pub use client::HttpClient;
pub use error::{BoxError, DecodeReason, Error, Result};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use target::Target;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
