//! Nitrous API - binary entry point.
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    nitrous_backend::run().await;
}
