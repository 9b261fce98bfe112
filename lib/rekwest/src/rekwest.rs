//! Chainable request configuration.
//!
//! Configuration never fails on the spot: invalid input is recorded and
//! reported by [`Rekwest::execute`], which then refuses to touch the network.

use std::io::Read;
use std::sync::LazyLock;
use std::time::Duration;

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use http::HeaderMap;
use serde::Serialize;

use crate::{
    Cancellation, ContentType, Error, ErrorAccumulator, HttpClient, HyperClient, Method,
    ResponseFormat, to_json, to_xml,
};

#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

/// A single HTTP request, configured by chaining and performed by
/// [`Rekwest::execute`].
///
/// Defaults to a `GET` without body, a response format driven by the
/// response `Content-Type`, no timeout and a cancellation that never fires.
///
/// # Example
///
/// ```ignore
/// use rekwest::Rekwest;
/// use std::time::Duration;
///
/// #[derive(Debug, Default, serde::Deserialize)]
/// struct Animal {
///     ok: bool,
///     animal: String,
/// }
///
/// let mut animal = Animal::default();
/// Rekwest::new("https://zoo.example.com/animals/1")
///     .bearer_token("secret")
///     .timeout(Duration::from_secs(5))
///     .execute(&mut [&mut animal])
///     .await?;
/// ```
#[derive(Debug)]
pub struct Rekwest<C = HyperClient> {
    pub(crate) client: C,
    pub(crate) errors: ErrorAccumulator,
    pub(crate) url: String,
    pub(crate) method: Method,
    pub(crate) body: Option<Bytes>,
    pub(crate) headers: HeaderMap,
    pub(crate) basic_auth: Option<Credentials>,
    pub(crate) bearer_token: Option<String>,
    pub(crate) cancellation: Cancellation,
    pub(crate) response_format: ResponseFormat,
    pub(crate) timeout: Option<Duration>,
}

static DEFAULT_CLIENT: LazyLock<HyperClient> = LazyLock::new(HyperClient::new);

impl Rekwest<HyperClient> {
    /// Create a request against `url` using the process-wide default
    /// [`HyperClient`], whose connection pool every such request shares.
    ///
    /// Use [`Rekwest::client`] or [`Rekwest::with_client`] for another transport.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, DEFAULT_CLIENT.clone())
    }
}

impl<C> Rekwest<C> {
    /// Create a request against `url` performed by `client`.
    #[must_use]
    pub fn with_client(url: impl Into<String>, client: C) -> Self {
        Self {
            client,
            errors: ErrorAccumulator::new(),
            url: url.into(),
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
            basic_auth: None,
            bearer_token: None,
            cancellation: Cancellation::default(),
            response_format: ResponseFormat::ContentType,
            timeout: None,
        }
    }

    /// Set the request method. An invalid method token is recorded as an error.
    #[must_use]
    pub fn method(mut self, method: impl AsRef<str>) -> Self {
        let method = method.as_ref();
        match Method::from_bytes(method.as_bytes()) {
            Ok(method) => self.method = method,
            Err(_) => self.errors.push(Error::InvalidMethod(method.to_string())),
        }
        self
    }

    /// Use the given bytes as request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Use a copy of the given slice as request body.
    #[must_use]
    pub fn bytes_body(self, body: &[u8]) -> Self {
        self.body(Bytes::copy_from_slice(body))
    }

    /// Read `reader` to the end and use its content as request body.
    ///
    /// The reader is consumed right away; a read failure is recorded.
    #[must_use]
    pub fn reader_body(mut self, mut reader: impl Read) -> Self {
        let mut buffer = Vec::new();
        match reader.read_to_end(&mut buffer) {
            Ok(_) => self.body(buffer),
            Err(err) => {
                self.errors.push(err);
                self
            }
        }
    }

    /// Marshal `value` with `marshal` and use the result as request body.
    ///
    /// A marshal failure is recorded and leaves the body unchanged.
    #[must_use]
    pub fn marshal_body<T, F>(mut self, value: &T, marshal: F) -> Self
    where
        T: ?Sized,
        F: FnOnce(&T) -> crate::Result<Bytes>,
    {
        match marshal(value) {
            Ok(body) => self.body(body),
            Err(err) => {
                self.errors.push(err);
                self
            }
        }
    }

    /// Send `value` as JSON, with a `Content-Type: application/json` header.
    #[must_use]
    pub fn json_body<T: Serialize + ?Sized>(self, value: &T) -> Self {
        self.encoded_body(value, to_json, ContentType::Json)
    }

    /// Send `value` as XML, with a `Content-Type: application/xml` header.
    #[must_use]
    pub fn xml_body<T: Serialize + ?Sized>(self, value: &T) -> Self {
        self.encoded_body(value, to_xml, ContentType::Xml)
    }

    fn encoded_body<T, F>(self, value: &T, marshal: F, content_type: ContentType) -> Self
    where
        T: ?Sized,
        F: FnOnce(&T) -> crate::Result<Bytes>,
    {
        let errors_before = self.errors.errors().len();
        let this = self.marshal_body(value, marshal);
        if this.errors.errors().len() == errors_before {
            this.header(CONTENT_TYPE, content_type.as_str())
        } else {
            this
        }
    }

    /// Add a header value. Values added to the same name after the first one
    /// are kept but not sent.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let (name, value) = (name.as_ref(), value.as_ref());
        let header_name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(header_name) => header_name,
            Err(err) => {
                self.errors.push(Error::invalid_header(name, err));
                return self;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(header_value) => {
                self.headers.append(header_name, header_value);
            }
            Err(err) => self.errors.push(Error::invalid_header(name, err)),
        }
        self
    }

    /// Add every `(name, value)` pair, see [`Rekwest::header`].
    #[must_use]
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        headers
            .into_iter()
            .fold(self, |this, (name, value)| this.header(name, value))
    }

    /// Authenticate with HTTP basic auth.
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Send `Authorization: Bearer <token>`. Takes precedence over basic auth.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.bearer_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Race the request against `cancellation`.
    #[must_use]
    pub fn cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Set the expected response format.
    ///
    /// Forcing JSON or XML also adds the matching `Accept` header.
    #[must_use]
    pub fn response_format(self, format: impl Into<ResponseFormat>) -> Self {
        let format = format.into();
        let mut this = match format.accept() {
            Some(accept) => self.header(ACCEPT, accept),
            None => self,
        };
        this.response_format = format;
        this
    }

    /// Give up on the request after `timeout`, counted from the call to
    /// [`Rekwest::execute`].
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Perform the request with `client`.
    #[must_use]
    pub fn client<D: HttpClient>(self, client: D) -> Rekwest<D> {
        Rekwest {
            client,
            errors: self.errors,
            url: self.url,
            method: self.method,
            body: self.body,
            headers: self.headers,
            basic_auth: self.basic_auth,
            bearer_token: self.bearer_token,
            cancellation: self.cancellation,
            response_format: self.response_format,
            timeout: self.timeout,
        }
    }

    /// Errors recorded so far, while configuring or decoding.
    pub fn errors(&self) -> impl ExactSizeIterator<Item = &Error> {
        self.errors.errors()
    }

    /// Returns `true` while no error has been recorded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_ok()
    }

    /// Target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}
