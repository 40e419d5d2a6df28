//! Root greeting route

use axum::Json;
use serde::Serialize;

pub const GREETING: &str = "Hello from Go Example";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

pub async fn index() -> Json<RootResponse> {
    Json(RootResponse {
        message: GREETING,
        version: env!("CARGO_PKG_VERSION"),
    })
}
