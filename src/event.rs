//! Function-invocation events and responses.
//!
//! The platform hands us the HTTP request as an event with a string `body`
//! and expects `{statusCode, body}` back, where `body` is itself a JSON
//! document rendered to a string.

use std::io;

use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use tracing::{debug, error, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl InboundEvent {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    /// Parse the body into `T`, falling back to `T::default()` when the body
    /// is missing, undecodable or of the wrong shape.
    pub fn parse_body<T: DeserializeOwned + Default>(&self) -> T {
        let Some(text) = self.body_text() else {
            debug!("event has no body");
            return T::default();
        };
        match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "ignoring unparsable request body");
                T::default()
            }
        }
    }

    fn body_text(&self) -> Option<String> {
        let body = self.body.as_deref()?;
        if !self.is_base64_encoded {
            return Some(body.to_string());
        }
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(body)
            .map_err(|err| warn!(error = %err, "request body is not valid base64"))
            .ok()?;
        String::from_utf8(decoded)
            .map_err(|err| warn!(error = %err, "request body is not UTF-8"))
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub status_code: u16,
    pub body: String,
}

impl OutboundResponse {
    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Self {
        let body = to_body_string(payload).unwrap_or_else(|err| {
            error!(error = %err, "failed to render response body");
            r#"{"error": "Internal Server Error"}"#.to_string()
        });
        Self { status_code, body }
    }
}

/// Render `value` as compact JSON with `", "` and `": "` separators and
/// non-ASCII characters left as is.
pub fn to_body_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
