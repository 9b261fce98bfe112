//! Prelude module for convenient imports.
//!
//! ```ignore
//! use rekwest_core::prelude::*;
//! ```

pub use crate::{
    Cancellation, ContentType, Decode, Error, ErrorAccumulator, HttpClient, Method, MultiError,
    Request, RequestBuilder, Response, ResponseFormat, Result, Strategy,
};
