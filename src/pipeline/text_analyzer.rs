//! Clinical-note analysis: encoder call plus keyword tagging.
//!
//! The embedding itself never drives classification. It only decides
//! which keyword path runs and is reported as `embedding_dim`.

use crate::knowledge::tables::{fallback_group, primary_group, KeywordGroup, SYMPTOM_CHECKS};
use crate::models::DiseaseCategory;

use super::encoder::TextEncoder;
use super::types::{AnalysisOutcome, AnalysisPath};

pub const ENCODED_CONFIDENCE: f64 = 0.8;
pub const FALLBACK_CONFIDENCE: f64 = 0.6;

pub fn analyze_notes(encoder: &dyn TextEncoder, notes: Option<&str>) -> AnalysisOutcome {
    let text = match notes {
        Some(t) if !t.is_empty() => t,
        _ => return empty_outcome(),
    };

    match encoder.encode(text) {
        Ok(embedding) => encoded_outcome(text, embedding.len()),
        Err(e) => {
            tracing::error!(encoder = encoder.name(), error = %e, "Text encoding failed, using keyword fallback");
            fallback_outcome(text)
        }
    }
}

fn empty_outcome() -> AnalysisOutcome {
    AnalysisOutcome {
        diseases: Vec::new(),
        symptoms: Vec::new(),
        confidence: 0.0,
        analysis: "No clinical notes provided".to_string(),
        embedding_dim: None,
        path: AnalysisPath::Empty,
    }
}

fn encoded_outcome(text: &str, embedding_dim: usize) -> AnalysisOutcome {
    let lower = text.to_lowercase();
    let (diseases, mut symptoms) = scan_groups(&lower, primary_group);

    for check in &SYMPTOM_CHECKS {
        push_if_match(check, &lower, &mut symptoms);
    }

    AnalysisOutcome {
        analysis: format!(
            "Text analysis completed, detected {} possible diseases",
            diseases.len()
        ),
        diseases,
        symptoms,
        confidence: ENCODED_CONFIDENCE,
        embedding_dim: Some(embedding_dim),
        path: AnalysisPath::Encoded,
    }
}

fn fallback_outcome(text: &str) -> AnalysisOutcome {
    let lower = text.to_lowercase();
    let (diseases, symptoms) = scan_groups(&lower, fallback_group);

    AnalysisOutcome {
        analysis: format!("Fallback analysis completed, detected {} diseases", diseases.len()),
        diseases,
        symptoms,
        confidence: FALLBACK_CONFIDENCE,
        embedding_dim: None,
        path: AnalysisPath::Fallback,
    }
}

/// Walk categories in detection order, collecting matched labels.
fn scan_groups(
    lower: &str,
    group_for: fn(DiseaseCategory) -> &'static KeywordGroup,
) -> (Vec<DiseaseCategory>, Vec<String>) {
    let mut diseases = Vec::new();
    let mut symptoms = Vec::new();

    for category in DiseaseCategory::DETECTION_ORDER {
        if push_if_match(group_for(category), lower, &mut symptoms) {
            diseases.push(category);
        }
    }

    (diseases, symptoms)
}

fn push_if_match(group: &KeywordGroup, lower: &str, symptoms: &mut Vec<String>) -> bool {
    if !group.matches(lower) {
        return false;
    }
    symptoms.extend(group.symptoms.iter().map(|s| s.to_string()));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encoder::{MockEncoder, UnavailableEncoder, CLINICAL_BERT_DIM};

    const CHEST_NOTES: &str = "Patient reports chest pain and shortness of breath";

    #[test]
    fn encoded_path_attaches_full_cardiovascular_labels() {
        let outcome = analyze_notes(&MockEncoder::new(), Some(CHEST_NOTES));

        assert_eq!(outcome.path, AnalysisPath::Encoded);
        assert_eq!(outcome.diseases, vec![DiseaseCategory::Cardiovascular]);
        for label in ["chest pain", "chest tightness", "palpitations", "shortness of breath"] {
            assert!(outcome.symptoms.iter().any(|s| s == label), "missing {label}");
        }
        assert_eq!(outcome.confidence, 0.8);
        assert_eq!(outcome.embedding_dim, Some(CLINICAL_BERT_DIM));
        assert_eq!(
            outcome.analysis,
            "Text analysis completed, detected 1 possible diseases"
        );
    }

    #[test]
    fn fallback_path_attaches_one_label_per_group() {
        let outcome = analyze_notes(&UnavailableEncoder::new("offline"), Some(CHEST_NOTES));

        assert_eq!(outcome.path, AnalysisPath::Fallback);
        assert_eq!(outcome.diseases, vec![DiseaseCategory::Cardiovascular]);
        assert_eq!(outcome.symptoms, vec!["chest pain".to_string()]);
        assert_eq!(outcome.confidence, 0.6);
        assert_eq!(outcome.embedding_dim, None);
        assert_eq!(outcome.analysis, "Fallback analysis completed, detected 1 diseases");
    }

    #[test]
    fn empty_or_absent_notes() {
        for notes in [None, Some("")] {
            let outcome = analyze_notes(&MockEncoder::new(), notes);
            assert_eq!(outcome.confidence, 0.0);
            assert!(outcome.diseases.is_empty());
            assert!(outcome.symptoms.is_empty());
            assert_eq!(outcome.analysis, "No clinical notes provided");
        }
    }

    #[test]
    fn detection_order_is_fixed() {
        // Text mentions hypertension before diabetes; order still follows the table.
        let notes = "History of hypertension, now elevated glucose and a heart murmur";
        let outcome = analyze_notes(&MockEncoder::new(), Some(notes));
        assert_eq!(
            outcome.diseases,
            vec![
                DiseaseCategory::Cardiovascular,
                DiseaseCategory::Diabetes,
                DiseaseCategory::Hypertension,
            ]
        );
    }

    #[test]
    fn single_symptom_checks_only_on_encoded_path() {
        let notes = "Fever and nausea since yesterday";

        let encoded = analyze_notes(&MockEncoder::new(), Some(notes));
        assert!(encoded.diseases.is_empty());
        assert_eq!(encoded.symptoms, vec!["fever".to_string(), "nausea".to_string()]);

        let fallback = analyze_notes(&UnavailableEncoder::new("offline"), Some(notes));
        assert!(fallback.symptoms.is_empty());
    }

    #[test]
    fn symptoms_may_repeat() {
        // "headache" comes from both the hypertension group and its own check.
        let outcome = analyze_notes(&MockEncoder::new(), Some("severe headache"));
        let count = outcome.symptoms.iter().filter(|s| *s == "headache").count();
        assert_eq!(count, 2);
    }

    #[test]
    fn fallback_uses_narrower_keywords() {
        // "glaucoma" is only a primary-path ophthalmic trigger.
        let notes = "glaucoma follow-up";
        let encoded = analyze_notes(&MockEncoder::new(), Some(notes));
        assert!(encoded.diseases.contains(&DiseaseCategory::Ophthalmic));

        let fallback = analyze_notes(&UnavailableEncoder::new("offline"), Some(notes));
        assert!(!fallback.diseases.contains(&DiseaseCategory::Ophthalmic));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let outcome = analyze_notes(&MockEncoder::new(), Some("CHEST PAIN"));
        assert_eq!(outcome.diseases, vec![DiseaseCategory::Cardiovascular]);
    }
}
