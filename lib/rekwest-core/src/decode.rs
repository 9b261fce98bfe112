//! Writing a response body into caller-owned destinations.

use std::any::Any;

use serde::de::DeserializeOwned;

use crate::{Error, Result, Strategy};

/// A caller-owned value a response body can be decoded into.
///
/// Implemented for every `T: DeserializeOwned + 'static`, so any serde type
/// works as a destination. Raw-bytes decoding additionally requires the
/// destination to be a `Vec<u8>`, see [`Decode::byte_sink`].
pub trait Decode {
    /// Replace the value with the JSON decoded from `body`.
    ///
    /// On failure the value is left untouched.
    fn decode_json(&mut self, body: &[u8]) -> Result<()>;

    /// Replace the value with the XML decoded from `body`.
    ///
    /// On failure the value is left untouched.
    fn decode_xml(&mut self, body: &[u8]) -> Result<()>;

    /// Mutable byte buffer, if this destination is one.
    fn byte_sink(&mut self) -> Option<&mut Vec<u8>>;

    /// Type name reported when the destination has the wrong shape.
    fn shape(&self) -> &'static str;
}

impl<T> Decode for T
where
    T: DeserializeOwned + Any,
{
    fn decode_json(&mut self, body: &[u8]) -> Result<()> {
        *self = crate::from_json(body)?;
        Ok(())
    }

    fn decode_xml(&mut self, body: &[u8]) -> Result<()> {
        *self = crate::from_xml(body)?;
        Ok(())
    }

    fn byte_sink(&mut self) -> Option<&mut Vec<u8>> {
        (self as &mut dyn Any).downcast_mut::<Vec<u8>>()
    }

    fn shape(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Decode `body` into `destination` with the given strategy.
///
/// # Errors
///
/// Structured decode errors are returned as-is. A [`Strategy::Bytes`] decode
/// into anything but a byte vector fails with [`Error::DestinationShape`].
pub fn decode(destination: &mut (dyn Decode + '_), strategy: Strategy, body: &[u8]) -> Result<()> {
    match strategy {
        Strategy::Json => destination.decode_json(body),
        Strategy::Xml => destination.decode_xml(body),
        Strategy::Bytes => {
            let shape = destination.shape();
            let sink = destination
                .byte_sink()
                .ok_or(Error::DestinationShape { shape })?;
            sink.clear();
            sink.extend_from_slice(body);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Payload {
        ok: bool,
        animal: String,
    }

    #[test]
    fn json_into_struct() {
        let mut payload = Payload::default();
        decode(&mut payload, Strategy::Json, br#"{"ok":true, "animal":"platypus"}"#)
            .expect("decode");

        check!(
            payload
                == Payload {
                    ok: true,
                    animal: "platypus".to_string()
                }
        );
    }

    #[test]
    fn xml_into_struct() {
        let mut payload = Payload::default();
        let body = b"<payload><ok>true</ok><animal>platypus</animal></payload>";
        decode(&mut payload, Strategy::Xml, body).expect("decode");

        check!(payload.ok);
        check!(payload.animal == "platypus");
    }

    #[test]
    fn malformed_json_error_is_verbatim() {
        let mut payload = Payload::default();
        let body = br#"{"animal": "platypus", "ok}"#;
        let expected = serde_json::from_slice::<Payload>(body)
            .expect_err("malformed")
            .to_string();

        let_assert!(Err(err) = decode(&mut payload, Strategy::Json, body));
        check!(err.to_string() == expected);
        check!(payload == Payload::default());
    }

    #[test]
    fn malformed_xml_fails() {
        let mut payload = Payload::default();
        let_assert!(Err(Error::XmlDecode(_)) = decode(&mut payload, Strategy::Xml, b"<animal"));
        check!(payload == Payload::default());
    }

    #[test]
    fn bytes_replace_content() {
        let mut raw = b"previous content".to_vec();
        decode(&mut raw, Strategy::Bytes, b"ok!").expect("decode");
        check!(raw == b"ok!".to_vec());
    }

    #[test]
    fn bytes_into_wrong_shape() {
        let mut lines = vec!["unchanged".to_string()];
        let_assert!(Err(err) = decode(&mut lines, Strategy::Bytes, b"OK"));

        let_assert!(Error::DestinationShape { shape } = &err);
        check!(shape.contains("Vec<alloc::string::String>"));
        check!(err.to_string().starts_with("expected byte vector destination, encountered "));
        check!(lines == vec!["unchanged".to_string()]);
    }

    #[test]
    fn byte_sink_capability() {
        let mut raw: Vec<u8> = Vec::new();
        let mut text = String::new();
        check!(raw.byte_sink().is_some());
        check!(text.byte_sink().is_none());
    }
}
