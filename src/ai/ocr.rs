use anyhow::{Context, Result};
use base64::Engine as _;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::ai::common::send_request;

/// Image bytes pulled out of the inbound `image` field.
#[derive(Debug, PartialEq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl ImagePayload {
    /// Decode a `data:<mime>;base64,<payload>` URL. Anything else is passed
    /// through as its UTF-8 bytes.
    pub fn from_field(image: &str) -> Result<Self> {
        let Some((header, payload)) = image
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
        else {
            return Ok(Self {
                bytes: image.as_bytes().to_vec(),
                mime: None,
            });
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .context("image data URL is not valid base64")?;
        let mime = (!header.is_empty()).then(|| header.to_string());
        Ok(Self { bytes, mime })
    }

    fn into_part(self) -> Result<Part> {
        let part = Part::bytes(self.bytes).file_name("image");
        match self.mime {
            Some(mime) => part
                .mime_str(&mime)
                .with_context(|| format!("unsupported image type {mime}")),
            None => Ok(part),
        }
    }
}

/// Upload an image to the OCR endpoint and return its JSON answer as is.
#[instrument(level = "trace", skip(client, api_key, image))]
pub async fn request_ocr(
    client: &reqwest::Client,
    api_key: &str,
    url: &str,
    image: ImagePayload,
) -> Result<Value> {
    debug!(url, size = image.bytes.len(), "sending OCR request");

    let form = Form::new()
        .part("file", image.into_part()?)
        .text("apiKey", api_key.to_string());
    let raw = send_request(client.post(url).multipart(form)).await?;
    serde_json::from_str(&raw).context("OCR response is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_is_decoded() {
        let image = ImagePayload::from_field("data:image/png;base64,aW1n").unwrap();
        assert_eq!(image.bytes, b"img");
        assert_eq!(image.mime.as_deref(), Some("image/png"));
    }

    #[test]
    fn plain_string_is_sent_verbatim() {
        let image = ImagePayload::from_field("aW1n").unwrap();
        assert_eq!(image.bytes, b"aW1n");
        assert_eq!(image.mime, None);
    }

    #[test]
    fn broken_base64_is_an_error() {
        assert!(ImagePayload::from_field("data:image/png;base64,!!!").is_err());
    }
}
