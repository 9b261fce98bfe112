//! Single-shot HTTP requests, raced against a timeout and a cancellation.
//!
//! A [`Rekwest`] is configured by chaining. Mistakes made while configuring
//! are recorded rather than returned, and reported all at once when the
//! request is executed. The response is then decoded into any number of
//! destinations, as JSON, XML or raw bytes depending on the response
//! `Content-Type` or an explicit [`ResponseFormat`].
//!
//! # Example
//!
//! ```ignore
//! use rekwest::prelude::*;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let mut user = User::default();
//! Rekwest::new("https://api.example.com/users/42")
//!     .bearer_token("secret")
//!     .timeout(Duration::from_secs(5))
//!     .execute(&mut [&mut user])
//!     .await?;
//! ```

mod client;
mod config;
mod connector;
mod execute;
pub mod middleware;
pub mod prelude;
mod rekwest;

// Re-export client types
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use rekwest::Rekwest;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use rekwest_core::{
    ACCEPT_JSON, ACCEPT_XML, Cancellation, ContentType, Decode, Error, ErrorAccumulator,
    HttpClient, MultiError, Request, RequestBuilder, Resolution, Response, ResponseFormat,
    Result, Strategy, decode, from_json, from_xml, to_json, to_xml,
};

// Re-export http types for methods, status codes and headers
pub use rekwest_core::{Method, StatusCode, header};
