#[tokio::main]
async fn main() {
    folio_api::run().await;
}
