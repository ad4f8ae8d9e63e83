use dotenvy::dotenv;
use lambda_runtime::{service_fn, Error, LambdaEvent};

pub mod ai;
pub mod event;
pub mod handlers;
mod system_info;

pub use ai::config::AiConfig;
pub use event::{InboundEvent, OutboundResponse};
pub use handlers::{OcrHandler, ShoppingListHandler};
pub use system_info::get_system_info;

// ──────────────────────────────────────────────────────────────
// Cold start
// ──────────────────────────────────────────────────────────────

fn init() -> AiConfig {
    // Load .env file if it exists (for local development)
    dotenv().ok();

    // The platform owns timestamps and colours in its log stream.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .without_time()
        .init();

    tracing::info!("{}", get_system_info());

    AiConfig::from_env()
}

/// Serve the OCR-text to shopping-list function.
pub async fn run_shopping_list() -> Result<(), Error> {
    let handler = ShoppingListHandler::new(init());
    tracing::info!("Starting shopping list function...");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<InboundEvent>| {
        let handler = handler.clone();
        async move { Ok::<_, Error>(handler.handle(event.payload).await) }
    }))
    .await
}

/// Serve the image OCR forwarding function.
pub async fn run_ocr() -> Result<(), Error> {
    let handler = OcrHandler::new(init());
    tracing::info!("Starting OCR function...");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<InboundEvent>| {
        let handler = handler.clone();
        async move { Ok::<_, Error>(handler.handle(event.payload).await) }
    }))
    .await
}
