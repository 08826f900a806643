use chrono::Utc;

use super::encoder::TextEncoder;
use super::fusion::{fuse, recommendations};
use super::guidelines::retrieve_guidance;
use super::risk::score_risk;
use super::text_analyzer::analyze_notes;
use super::types::AnalysisReport;
use crate::knowledge::KnowledgeBaseIndex;
use crate::models::PatientRecord;

/// Per-request diagnosis pipeline.
///
/// Coordinates: text analysis → risk scoring → guideline retrieval → fusion.
/// Borrows the shared encoder and index; holds no state of its own.
pub struct DiagnosisPipeline<'a> {
    encoder: &'a dyn TextEncoder,
    index: Option<&'a KnowledgeBaseIndex>,
}

impl<'a> DiagnosisPipeline<'a> {
    pub fn new(encoder: &'a dyn TextEncoder, index: Option<&'a KnowledgeBaseIndex>) -> Self {
        Self { encoder, index }
    }

    /// Run every stage for one patient. Blocks while the encoder runs.
    pub fn run(&self, patient: &PatientRecord) -> AnalysisReport {
        tracing::info!(age = patient.age, gender = %patient.gender, "Starting patient analysis");

        // Step 1: Clinical notes
        let text_analysis = analyze_notes(self.encoder, patient.clinical_notes.as_deref());

        // Step 2: Structured risk
        let risk_analysis = score_risk(patient);

        // Step 3: Guidelines for detected diseases
        let disease_labels = text_analysis.disease_labels();
        let guidance = retrieve_guidance(&disease_labels, &text_analysis.symptoms, self.index);

        // Step 4: Fusion
        let fusion = fuse(&text_analysis, &risk_analysis);
        let recommendations = recommendations(&text_analysis, &risk_analysis, &guidance);

        tracing::info!(
            confidence = fusion.confidence,
            primary = %fusion.primary_diagnosis,
            risk = %risk_analysis.risk_level,
            "Patient analysis completed"
        );

        AnalysisReport {
            success: true,
            timestamp: Utc::now().to_rfc3339(),
            confidence_score: fusion.confidence,
            text_analysis,
            risk_analysis,
            guidance,
            fusion,
            recommendations,
        }
    }
}
