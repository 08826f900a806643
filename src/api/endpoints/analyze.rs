//! Patient analysis endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::PatientRecord;
use crate::pipeline::{AnalysisReport, PipelineError};

/// `POST /analyze`: run the full diagnosis pipeline for one patient.
///
/// The encoder may block, so the pipeline runs on the blocking pool.
/// A panic anywhere in the pipeline surfaces as `ANALYSIS_FAILED`.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(patient): Json<PatientRecord>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let core = ctx.core.clone();
    let report = tokio::task::spawn_blocking(move || core.pipeline().run(&patient))
        .await
        .map_err(|e| PipelineError::Worker(e.to_string()))?;

    Ok(Json(report))
}
