use std::env;

use tracing::warn;

pub const DEFAULT_COMPLETION_URL: &str = "https://gemini.googleapis.com/v1/complete";
pub const DEFAULT_OCR_URL: &str = "https://api.gemini.com/ocr";

/// Settings for the remote Gemini services, read once per cold start and
/// handed to each handler.
#[derive(Clone, Debug)]
pub struct AiConfig {
    pub completion_api_key: String,
    pub completion_url: String,
    pub ocr_api_key: String,
    pub ocr_url: String,
}

impl AiConfig {
    pub fn from_env() -> Self {
        Self {
            completion_api_key: secret_from_env("GOOGLE_AI_STUDIO_API_KEY"),
            completion_url: env::var("GEMINI_COMPLETION_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
            ocr_api_key: secret_from_env("GEMINI_API_KEY"),
            ocr_url: env::var("GEMINI_OCR_URL").unwrap_or_else(|_| DEFAULT_OCR_URL.to_string()),
        }
    }
}

// A missing key is not fatal: the remote service reports it back to the caller.
fn secret_from_env(name: &str) -> String {
    match env::var(name) {
        Ok(value) => value,
        Err(_) => {
            warn!(variable = name, "API key is not set");
            String::new()
        }
    }
}
