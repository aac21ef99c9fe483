#[tokio::main]
async fn main() {
    appointment_backend::run().await;
}
