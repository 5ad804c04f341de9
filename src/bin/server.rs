//! One-route HTTP server.
//!
//! Serves a fixed text payload on `GET /` and nothing else. Unrelated to the
//! game session; it shares nothing with it but the repository.

use axum::{routing::get, Router};
use tracing_subscriber::EnvFilter;

const GREETING: &str = "coucou ❤️‍🔥";
const ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = Router::new().route("/", get(|| async { GREETING }));

    let listener = tokio::net::TcpListener::bind(ADDR)
        .await
        .expect("failed to bind");
    tracing::info!("listening on http://{ADDR}");
    axum::serve(listener, app).await.expect("server error");
}
