use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::ai::completion::{request_completion, CompletionOutcome, CompletionRequest};
use crate::ai::config::AiConfig;
use crate::ai::prompts::build_shopping_list_prompt;
use crate::event::{InboundEvent, OutboundResponse};

#[derive(Debug, Default, Deserialize)]
struct ShoppingListRequest {
    #[serde(default, rename = "ocrText")]
    ocr_text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShoppingListBody<'a> {
    shopping_list: &'a str,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Turns OCR text into a shopping list through the completion service.
#[derive(Clone)]
pub struct ShoppingListHandler {
    config: AiConfig,
    client: reqwest::Client,
}

impl ShoppingListHandler {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Handle one invocation. Never fails: local errors become a 500 and
    /// errors reported by the service become a 400.
    #[instrument(level = "debug", skip_all)]
    pub async fn handle(&self, event: InboundEvent) -> OutboundResponse {
        match self.convert(&event).await {
            Ok(CompletionOutcome::Success { completion }) => {
                info!(chars = completion.chars().count(), "shopping list generated");
                OutboundResponse::json(
                    200,
                    &ShoppingListBody {
                        shopping_list: &completion,
                    },
                )
            }
            Ok(CompletionOutcome::Failure { message }) => {
                warn!(%message, "completion service returned an error");
                OutboundResponse::json(400, &ErrorBody { error: &message })
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "shopping list conversion failed");
                let message = format!("Internal Server Error: {err:#}");
                OutboundResponse::json(500, &ErrorBody { error: &message })
            }
        }
    }

    async fn convert(&self, event: &InboundEvent) -> Result<CompletionOutcome> {
        let request: ShoppingListRequest = event.parse_body();
        let prompt = build_shopping_list_prompt(&request.ocr_text);
        let payload = CompletionRequest::new(prompt);
        request_completion(
            &self.client,
            &self.config.completion_api_key,
            &self.config.completion_url,
            &payload,
        )
        .await
    }
}
