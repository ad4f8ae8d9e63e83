#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    shoplist_fn::run_ocr().await
}
