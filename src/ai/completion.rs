use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::ai::common::{parse_json_object, send_request};

/// Fallback message when the service reports an error without details.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Body of a completion request. The generation parameters are fixed.
#[derive(Debug, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub candidate_count: u32,
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    pub fn new(prompt: String) -> Self {
        Self {
            prompt,
            candidate_count: 1,
            max_output_tokens: 100,
            temperature: 0.5,
        }
    }
}

/// What the completion service answered.
#[derive(Debug, PartialEq)]
pub enum CompletionOutcome {
    Success { completion: String },
    Failure { message: String },
}

/// POST the request to `url` with the key as a query parameter.
#[instrument(level = "trace", skip(client, api_key, request))]
pub async fn request_completion(
    client: &reqwest::Client,
    api_key: &str,
    url: &str,
    request: &CompletionRequest,
) -> Result<CompletionOutcome> {
    debug!(url, "sending completion request");

    let builder = client.post(url).query(&[("key", api_key)]).json(request);
    let raw = send_request(builder).await?;
    interpret_completion(&raw)
}

#[derive(Deserialize)]
struct RemoteError {
    #[serde(default)]
    message: Option<String>,
}

/// Classify a completion response body.
///
/// An `error` object marks a failure. Anything off-shape is an error: a body
/// that is not a JSON object, an `error` that is not an object, or a
/// `completion` that is present but not a string.
pub fn interpret_completion(raw: &str) -> Result<CompletionOutcome> {
    let mut body = parse_json_object(raw)?;

    if let Some(error) = body.remove("error") {
        let error: RemoteError = serde_json::from_value(error)
            .context("remote error has an unexpected shape")?;
        let message = error.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        return Ok(CompletionOutcome::Failure { message });
    }

    let completion = match body.remove("completion") {
        None => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => bail!("remote completion is not a string: {other}"),
    };
    Ok(CompletionOutcome::Success { completion })
}
