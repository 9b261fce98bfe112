//! Tower layers for the [`crate::HyperClient`] transport.
//!
//! Layers wrap the transport, not the executor: they see every wire request
//! and buffered response, and run inside the dispatch task.
//!
//! - [`LoggingLayer`] - Logs exchanges using `tracing`
//!
//! Any other `tower::Layer` over `Request<Bytes>` / `Response<Bytes>` can be
//! added with [`crate::HyperClientBuilder::layer`].

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
