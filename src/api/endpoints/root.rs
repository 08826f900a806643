use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
}

/// `GET /`: service banner.
pub async fn index() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hybrid Model Disease Diagnosis API",
        status: "running",
    })
}
