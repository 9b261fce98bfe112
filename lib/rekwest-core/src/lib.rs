//! Core types for rekwest.
//!
//! This crate holds everything the request executor needs besides the network:
//! - [`ErrorAccumulator`] and [`MultiError`] - Deferred, composite errors
//! - [`ResponseFormat`] and [`Strategy`] - Response format negotiation
//! - [`Decode`] and [`decode`] - Writing a response body into destinations
//! - [`Cancellation`] - Caller-supplied cancellation signal
//! - [`Request`] and [`Response`] - Wire types exchanged with the transport
//! - [`HttpClient`] - Transport trait
//! - [`Error`] and [`Result`] - Error handling

mod accumulator;
mod body;
mod cancel;
mod client;
mod decode;
mod error;
mod format;
pub mod prelude;
mod request;
mod response;

pub use accumulator::{ErrorAccumulator, MultiError};
pub use body::{ContentType, from_json, from_xml, to_json, to_xml};
pub use cancel::Cancellation;
pub use client::HttpClient;
pub use decode::{Decode, decode};
pub use error::{Error, Result};
pub use format::{ACCEPT_JSON, ACCEPT_XML, Resolution, ResponseFormat, Strategy};
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for methods, status codes and headers
pub use http::{Method, StatusCode, header};
