//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use warrant_core::prelude::*;
//! ```

pub use crate::{
    Error, HttpClient, Method, Request, RequestBuilder, Response, Result, Target, from_json,
    to_form, to_json,
};
