use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::ai::config::AiConfig;
use crate::ai::ocr::{request_ocr, ImagePayload};
use crate::event::{InboundEvent, OutboundResponse};

/// Message returned to the client whenever OCR fails.
pub const OCR_FAILED_MESSAGE: &str = "OCR処理中にエラーが発生しました";

#[derive(Debug, Default, Deserialize)]
struct OcrRequest {
    #[serde(default)]
    image: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Forwards an uploaded image to the OCR service and relays its answer.
#[derive(Clone)]
pub struct OcrHandler {
    config: AiConfig,
    client: reqwest::Client,
}

impl OcrHandler {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn handle(&self, event: InboundEvent) -> OutboundResponse {
        match self.recognise(&event).await {
            Ok(result) => {
                info!("OCR completed");
                OutboundResponse::json(200, &result)
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "OCR request failed");
                OutboundResponse::json(
                    500,
                    &ErrorBody {
                        error: OCR_FAILED_MESSAGE,
                    },
                )
            }
        }
    }

    async fn recognise(&self, event: &InboundEvent) -> Result<Value> {
        let request: OcrRequest = event.parse_body();
        let image = ImagePayload::from_field(&request.image)?;
        request_ocr(
            &self.client,
            &self.config.ocr_api_key,
            &self.config.ocr_url,
            image,
        )
        .await
    }
}
