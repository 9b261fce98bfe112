//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions for easy
//! glob importing:
//!
//! ```ignore
//! use rekwest::prelude::*;
//! ```

pub use crate::{
    Cancellation, ClientConfig, ContentType, Decode, Error, HttpClient, HyperClient, Method,
    Rekwest, ResponseFormat, Result, StatusCode, from_json, from_xml, header, to_json, to_xml,
};
pub use serde::{Deserialize, Serialize};
