use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Send a prepared request and return the raw response body.
///
/// The HTTP status is logged but not checked: the Gemini endpoints describe
/// failures in the JSON body and callers decide what to do with it.
///
/// Errors never carry the request URL, which may hold an API key.
pub async fn send_request(builder: reqwest::RequestBuilder) -> Result<String> {
    let resp = builder
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .context("request to remote service failed")?;
    let status = resp.status();
    let raw = resp
        .text()
        .await
        .map_err(reqwest::Error::without_url)
        .context("failed to read remote response body")?;
    debug!(%status, snippet = %snippet(&raw), "remote response body");
    trace!(raw = %raw, "remote response");
    Ok(raw)
}

/// Parse a response body that must be a JSON object.
pub fn parse_json_object(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).context("remote response is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!(
            "remote response is not a JSON object: {}",
            snippet(&other.to_string())
        )),
    }
}

/// First 200 characters of a body, for log lines.
pub fn snippet(raw: &str) -> String {
    raw.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_object_rejects_arrays() {
        let err = parse_json_object("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn parse_json_object_rejects_html() {
        let err = parse_json_object("<html>Bad Gateway</html>").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let text = "牛".repeat(300);
        assert_eq!(snippet(&text).chars().count(), 200);
    }
}
