use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::{ApiContext, SubsystemStatuses, STATUS_LOADED};

/// Risk scorer version string reported to clients.
const RISK_MODEL_VERSION: &str = "1.7.0";

#[derive(Serialize)]
pub struct SubsystemStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub description: &'static str,
}

/// `GET /models/status`: per-subsystem load state.
pub async fn models(State(ctx): State<ApiContext>) -> Json<SubsystemStatuses<SubsystemStatus>> {
    let encoder_name = if ctx.core.encoder().is_available() {
        ctx.core.encoder().name().to_string()
    } else {
        crate::config::TEXT_MODEL_ID.to_string()
    };

    Json(SubsystemStatuses {
        clinical_bert: SubsystemStatus {
            status: ctx.encoder_status(),
            version: Some(encoder_name),
            description: "ClinicalBERT model for analyzing clinical notes",
        },
        xgboost: SubsystemStatus {
            status: STATUS_LOADED,
            version: Some(RISK_MODEL_VERSION.to_string()),
            description: "XGBoost model for structured data analysis",
        },
        rag_system: SubsystemStatus {
            status: ctx.knowledge_status(),
            version: None,
            description: "Medical knowledge retrieval system",
        },
    })
}
