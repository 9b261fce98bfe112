//! Response format negotiation.
//!
//! A [`ResponseFormat`] selector decides, per destination, which [`Strategy`]
//! decodes the response body: either forced explicitly, or sniffed from the
//! response `Content-Type`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// `Accept` header sent when JSON is forced.
pub const ACCEPT_JSON: &str = "application/json";

/// `Accept` header sent when XML is forced.
pub const ACCEPT_XML: &str = "text/xml, application/xml";

/// Expected encoding of the response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    /// Pick the strategy from the response `Content-Type` header.
    #[default]
    ContentType,
    /// Always decode as JSON.
    Json,
    /// Always decode as XML.
    Xml,
    /// Always copy the raw body bytes.
    Bytes,
    /// A selector rekwest does not recognize; resolving it fails.
    Unknown(String),
}

/// How a response body is written into a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Structured JSON decode.
    Json,
    /// Structured XML decode.
    Xml,
    /// Raw byte copy.
    Bytes,
}

/// Outcome of resolving a [`ResponseFormat`].
///
/// `error` is set when the `Content-Type` header could not be parsed; the
/// strategy then falls back to [`Strategy::Bytes`].
#[derive(Debug)]
pub struct Resolution {
    /// Strategy to apply.
    pub strategy: Strategy,
    /// Non-fatal media type parse failure.
    pub error: Option<Error>,
}

impl Resolution {
    const fn of(strategy: Strategy) -> Self {
        Self {
            strategy,
            error: None,
        }
    }
}

impl ResponseFormat {
    /// The selector keyword.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ContentType => "content-type",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Bytes => "bytes",
            Self::Unknown(value) => value,
        }
    }

    /// `Accept` header value implied by this selector, if any.
    #[must_use]
    pub const fn accept(&self) -> Option<&'static str> {
        match self {
            Self::Json => Some(ACCEPT_JSON),
            Self::Xml => Some(ACCEPT_XML),
            _ => None,
        }
    }

    /// Resolve the decode strategy.
    ///
    /// `content_type` is only called for [`ResponseFormat::ContentType`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormat`] for an unrecognized selector.
    pub fn resolve<'a, F>(&self, content_type: F) -> Result<Resolution>
    where
        F: FnOnce() -> Option<&'a str>,
    {
        match self {
            Self::Json => Ok(Resolution::of(Strategy::Json)),
            Self::Xml => Ok(Resolution::of(Strategy::Xml)),
            Self::Bytes => Ok(Resolution::of(Strategy::Bytes)),
            Self::ContentType => Ok(content_type().map_or(Resolution::of(Strategy::Bytes), sniff)),
            Self::Unknown(value) => Err(Error::UnknownFormat(value.clone())),
        }
    }
}

fn sniff(content_type: &str) -> Resolution {
    match content_type.parse::<mime::Mime>() {
        Ok(media_type) => Resolution::of(strategy_for(&media_type)),
        Err(err) => Resolution {
            strategy: Strategy::Bytes,
            error: Some(err.into()),
        },
    }
}

fn strategy_for(media_type: &mime::Mime) -> Strategy {
    let essence = media_type.essence_str();
    if essence.eq_ignore_ascii_case("application/json") {
        Strategy::Json
    } else if essence.eq_ignore_ascii_case("text/xml")
        || essence.eq_ignore_ascii_case("application/xml")
    {
        Strategy::Xml
    } else {
        Strategy::Bytes
    }
}

impl FromStr for ResponseFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "content-type" => Self::ContentType,
            "json" => Self::Json,
            "xml" => Self::Xml,
            "bytes" => Self::Bytes,
            other => Self::Unknown(other.to_string()),
        })
    }
}

impl From<&str> for ResponseFormat {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn strategy(format: &ResponseFormat, content_type: Option<&str>) -> Strategy {
        let resolution = format.resolve(|| content_type).expect("known format");
        resolution.strategy
    }

    #[test]
    fn forced_formats_ignore_content_type() {
        let untouched = || -> Option<&'static str> { panic!("content type must not be read") };

        check!(ResponseFormat::Json.resolve(untouched).expect("json").strategy == Strategy::Json);
        check!(ResponseFormat::Xml.resolve(untouched).expect("xml").strategy == Strategy::Xml);
        check!(
            ResponseFormat::Bytes
                .resolve(untouched)
                .expect("bytes")
                .strategy
                == Strategy::Bytes
        );
    }

    #[test]
    fn content_type_sniffing() {
        let format = ResponseFormat::ContentType;
        check!(strategy(&format, Some("application/json")) == Strategy::Json);
        check!(strategy(&format, Some("application/json; charset=utf-8")) == Strategy::Json);
        check!(strategy(&format, Some("text/xml")) == Strategy::Xml);
        check!(strategy(&format, Some("application/xml; charset=utf-8")) == Strategy::Xml);
        check!(strategy(&format, Some("text/plain")) == Strategy::Bytes);
        check!(strategy(&format, Some("application/octet-stream")) == Strategy::Bytes);
        check!(strategy(&format, None) == Strategy::Bytes);
    }

    #[test]
    fn unparsable_content_type_falls_back_to_bytes() {
        let resolution = ResponseFormat::ContentType
            .resolve(|| Some("not a media type"))
            .expect("resolution");

        check!(resolution.strategy == Strategy::Bytes);
        let_assert!(Some(Error::MediaType(_)) = resolution.error);
    }

    #[test]
    fn unknown_format_fails() {
        let format = ResponseFormat::from("zalgo");
        let_assert!(Err(err) = format.resolve(|| Some("application/json")));
        check!(err.to_string() == "found unknown response format zalgo");

        let_assert!(Err(err) = ResponseFormat::from("").resolve(|| None));
        check!(matches!(err, Error::UnknownFormat(ref value) if value.is_empty()));
    }

    #[test]
    fn parse_keywords() {
        check!(ResponseFormat::from("content-type") == ResponseFormat::ContentType);
        check!(ResponseFormat::from("json") == ResponseFormat::Json);
        check!(ResponseFormat::from("xml") == ResponseFormat::Xml);
        check!(ResponseFormat::from("bytes") == ResponseFormat::Bytes);
        check!(ResponseFormat::from("JSON") == ResponseFormat::Unknown("JSON".to_string()));
        check!(ResponseFormat::default() == ResponseFormat::ContentType);
    }

    #[test]
    fn accept_headers() {
        check!(ResponseFormat::Json.accept() == Some(ACCEPT_JSON));
        check!(ResponseFormat::Xml.accept() == Some(ACCEPT_XML));
        check!(ResponseFormat::Bytes.accept().is_none());
        check!(ResponseFormat::ContentType.accept().is_none());
    }
}
