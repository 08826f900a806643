//! Liveness probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::{ApiContext, SubsystemStatuses, STATUS_LOADED};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub models: SubsystemStatuses<&'static str>,
}

/// `GET /health`: always healthy while the process serves requests.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: crate::config::APP_VERSION,
        models: SubsystemStatuses {
            clinical_bert: ctx.encoder_status(),
            xgboost: STATUS_LOADED,
            rag_system: ctx.knowledge_status(),
        },
    })
}
