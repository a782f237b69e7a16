//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use warrant::prelude::*;
//! ```

pub use crate::{
    Authenticator, BearerAuthenticator, ClientConfig, Error, HttpClient, HyperClient, Method,
    Provider, Request, RequestBuilder, Response, Result, StatusCode, Target, from_json, header,
    to_form, to_json,
};
pub use serde::{Deserialize, Serialize};
