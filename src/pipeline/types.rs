use serde::Serialize;

use crate::knowledge::TaxonomyLevels;
use crate::models::{DiseaseCategory, RiskLevel, Urgency};

// ═══════════════════════════════════════════════════════════
// Text analysis
// ═══════════════════════════════════════════════════════════

/// Which branch of the text analyzer produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPath {
    /// No notes supplied.
    Empty,
    /// Encoder succeeded; full keyword groups.
    Encoded,
    /// Encoder failed; narrowed keyword groups.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    /// Detection order.
    #[serde(rename = "diseases_detected")]
    pub diseases: Vec<DiseaseCategory>,
    /// Duplicates allowed.
    #[serde(rename = "symptoms_identified")]
    pub symptoms: Vec<String>,
    pub confidence: f64,
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_dim: Option<usize>,
    #[serde(skip)]
    pub path: AnalysisPath,
}

impl AnalysisOutcome {
    pub fn disease_labels(&self) -> Vec<String> {
        self.diseases.iter().map(|d| d.as_str().to_string()).collect()
    }
}

// ═══════════════════════════════════════════════════════════
// Risk scoring
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskPredictions {
    pub cardiovascular_risk: f64,
    pub diabetes_risk: f64,
    pub hypertension_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskOutcome {
    /// Sum of triggered contributions; may exceed 1.0.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub predictions: RiskPredictions,
}

// ═══════════════════════════════════════════════════════════
// Guideline retrieval
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Differential {
    pub pair: [String; 2],
    pub distinguishing_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceOutcome {
    pub guidelines: Vec<String>,
    pub treatments: Vec<String>,
    pub sources: Vec<String>,
    pub levels: Vec<TaxonomyLevels>,
    pub follow_up_questions: Vec<String>,
    pub differentials: Vec<Differential>,
}

// ═══════════════════════════════════════════════════════════
// Fusion
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionOutcome {
    pub primary_diagnosis: String,
    pub differential_diagnoses: Vec<String>,
    pub risk_assessment: RiskLevel,
    /// Not clamped to [0, 1].
    pub confidence: f64,
    pub urgency: Urgency,
}

/// Full `/analyze` response. Field names match the web client.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub timestamp: String,
    #[serde(rename = "clinical_bert_analysis")]
    pub text_analysis: AnalysisOutcome,
    #[serde(rename = "xgboost_analysis")]
    pub risk_analysis: RiskOutcome,
    #[serde(rename = "rag_insights")]
    pub guidance: GuidanceOutcome,
    #[serde(rename = "fusion_result")]
    pub fusion: FusionOutcome,
    pub recommendations: Vec<String>,
    pub confidence_score: f64,
}
