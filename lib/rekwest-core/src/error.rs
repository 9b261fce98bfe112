//! Error types for rekwest.

use std::time::Duration;

use derive_more::{Display, Error, From};

use crate::MultiError;

/// Main error type for rekwest operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The response carried a client or server error status (>= 400).
    #[display("request failed with status {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body as text, or the reason it could not be read as text.
        message: String,
        /// Raw response body.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Transport-level timeout, raised by the HTTP client itself.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The request-level timeout elapsed before the response arrived.
    #[display("exceeded request timeout of {_0:?}")]
    #[from(skip)]
    RequestTimeout(#[error(not(source))] Duration),

    /// The cancellation signal was fired.
    #[display("request canceled")]
    #[from(skip)]
    Canceled,

    /// The cancellation signal reached its deadline.
    #[display("cancellation deadline exceeded")]
    #[from(skip)]
    DeadlineExceeded,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// The configured method is not a valid HTTP method token.
    #[display("invalid HTTP method: {_0}")]
    #[from(skip)]
    InvalidMethod(#[error(not(source))] String),

    /// A configured header name or value is not valid.
    #[display("invalid header {name}: {reason}")]
    #[from(skip)]
    InvalidHeader {
        /// Header name as given.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// JSON encoding or decoding error, reported verbatim.
    #[display("{_0}")]
    #[from]
    Json(serde_json::Error),

    /// XML decoding error, reported verbatim.
    #[display("{_0}")]
    #[from]
    XmlDecode(quick_xml::DeError),

    /// XML encoding error, reported verbatim.
    #[display("{_0}")]
    #[from]
    XmlEncode(quick_xml::SeError),

    /// I/O error while reading a request body.
    #[display("{_0}")]
    #[from]
    Io(std::io::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// The response `Content-Type` header could not be parsed.
    #[display("invalid media type: {_0}")]
    #[from]
    MediaType(mime::FromStrError),

    /// The configured response format is not one rekwest knows.
    #[display("found unknown response format {_0}")]
    #[from(skip)]
    UnknownFormat(#[error(not(source))] String),

    /// A raw-bytes response was routed to a destination that cannot hold bytes.
    #[display("expected byte vector destination, encountered {shape} when decoding into target element")]
    #[from(skip)]
    DestinationShape {
        /// Type name of the offending destination.
        shape: &'static str,
    },

    /// Several errors accumulated while configuring or decoding.
    #[display("{_0}")]
    #[from(skip)]
    Multiple(#[error(not(source))] MultiError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP status error from status code and body.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create an HTTP status error keeping the raw body.
    #[must_use]
    pub fn http_with_body(status: u16, message: impl Into<String>, body: bytes::Bytes) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid header error.
    #[must_use]
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for transport or request-level timeouts.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout | Self::RequestTimeout(_))
    }

    /// Returns `true` if the cancellation signal ended the request.
    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled | Self::DeadlineExceeded)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Constituent errors if this is a composite error.
    #[must_use]
    pub fn as_multiple(&self) -> Option<&MultiError> {
        match self {
            Self::Multiple(multi) => Some(multi),
            _ => None,
        }
    }
}
