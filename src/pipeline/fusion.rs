//! Merges the three analyzer outcomes into one diagnostic summary.

use crate::models::{RiskLevel, Urgency};

use super::types::{AnalysisOutcome, FusionOutcome, GuidanceOutcome, RiskOutcome};

/// Fixed third signal in the confidence average.
pub const GUIDANCE_PRIOR: f64 = 0.8;
pub const NO_DIAGNOSIS: &str = "Further examination needed";

pub const URGENT_ATTENTION: &str = "Recommend immediate medical attention";
pub const SPECIALIST_CONSULTATION: &str = "Recommend specialist consultation";

/// Confidence is not clamped; a risk score above 1.0
/// pulls it below the usual range.
pub fn fuse(analysis: &AnalysisOutcome, risk: &RiskOutcome) -> FusionOutcome {
    let confidence = (analysis.confidence + (1.0 - risk.risk_score) + GUIDANCE_PRIOR) / 3.0;
    let labels = analysis.disease_labels();

    let (primary_diagnosis, differential_diagnoses) = match labels.split_first() {
        Some((first, rest)) => (first.clone(), rest.to_vec()),
        None => (NO_DIAGNOSIS.to_string(), Vec::new()),
    };

    FusionOutcome {
        primary_diagnosis,
        differential_diagnoses,
        risk_assessment: risk.risk_level,
        confidence,
        urgency: Urgency::from(risk.risk_level),
    }
}

/// Guidelines plus escalation notes.
pub fn recommendations(
    analysis: &AnalysisOutcome,
    risk: &RiskOutcome,
    guidance: &GuidanceOutcome,
) -> Vec<String> {
    let mut out = guidance.guidelines.clone();
    if risk.risk_level == RiskLevel::High {
        out.push(URGENT_ATTENTION.to_string());
    }
    if !analysis.diseases.is_empty() {
        out.push(SPECIALIST_CONSULTATION.to_string());
    }
    out
}
