#[tokio::main]
async fn main() {
    onboard_backend::run().await;
}
