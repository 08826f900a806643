//! Guideline retrieval: static recommendations, CSV enrichment, taxonomy
//! levels, follow-up questions and differential pairs.

use std::collections::HashSet;
use std::str::FromStr;

use crate::knowledge::tables::knowledge_entry;
use crate::knowledge::taxonomy::hierarchical_levels;
use crate::knowledge::KnowledgeBaseIndex;
use crate::models::DiseaseCategory;

use super::types::{Differential, GuidanceOutcome};

pub const MAX_GUIDELINES: usize = 15;
pub const MAX_FOLLOW_UPS: usize = 12;
pub const MAX_DIFFERENTIALS: usize = 6;
/// Detected diseases looked up in the CSV index.
pub const MAX_INDEXED_DISEASES: usize = 3;

pub const BASELINE_SOURCES: [&str; 3] = [
    "Clinical guidelines",
    "Evidence-based medicine",
    "Expert consensus",
];
pub const LOCAL_CORPUS_SOURCE: &str = "Local data corpus";

const CARDIAC_ALERT_SYMPTOMS: [&str; 3] = ["chest pain", "chest tightness", "palpitations"];
const CARDIAC_ALERT_GUIDELINES: [&str; 3] = [
    "Recommend immediate ECG examination",
    "Consider cardiac marker testing",
    "Evaluate need for emergency treatment",
];

pub fn retrieve_guidance(
    diseases: &[String],
    symptoms: &[String],
    index: Option<&KnowledgeBaseIndex>,
) -> GuidanceOutcome {
    let mut guidelines: Vec<String> = Vec::new();
    let mut treatments: Vec<String> = Vec::new();

    for disease in diseases {
        let entry = DiseaseCategory::from_str(disease)
            .ok()
            .and_then(knowledge_entry);
        if let Some(entry) = entry {
            guidelines.extend(entry.recommendations.iter().map(|r| r.to_string()));
        }
    }

    // Exact, case-sensitive membership here.
    if symptoms
        .iter()
        .any(|s| CARDIAC_ALERT_SYMPTOMS.contains(&s.as_str()))
    {
        guidelines.extend(CARDIAC_ALERT_GUIDELINES.iter().map(|g| g.to_string()));
    }

    let mut sources: Vec<String> = BASELINE_SOURCES.iter().map(|s| s.to_string()).collect();

    if let Some(index) = index.filter(|_| !diseases.is_empty()) {
        for disease in diseases.iter().take(MAX_INDEXED_DISEASES) {
            let found = index.retrieve(disease);
            guidelines.extend(found.tests.iter().map(|t| format!("Consider test: {t}")));
            guidelines.extend(
                found
                    .measurements
                    .iter()
                    .map(|m| format!("Monitor measurement: {m}")),
            );
            treatments.extend(found.drugs.iter().map(|d| format!("Potential therapy: {d}")));
        }
        sources.push(LOCAL_CORPUS_SOURCE.to_string());
    }

    guidelines.truncate(MAX_GUIDELINES);

    GuidanceOutcome {
        guidelines,
        treatments,
        sources,
        levels: hierarchical_levels(diseases, symptoms),
        follow_up_questions: follow_up_questions(diseases, symptoms),
        differentials: differentials(symptoms),
    }
}

// ═══════════════════════════════════════════════════════════
// Follow-up questions
// ═══════════════════════════════════════════════════════════

struct FollowUpBlock {
    disease: Option<DiseaseCategory>,
    symptoms_any: &'static [&'static str],
    questions: &'static [&'static str],
}

static FOLLOW_UP_BLOCKS: [FollowUpBlock; 4] = [
    FollowUpBlock {
        disease: Some(DiseaseCategory::Cardiovascular),
        symptoms_any: &["chest pain", "chest tightness", "palpitations"],
        questions: &[
            "Chest pain is exertional and relieved by rest?",
            "Any radiation to left arm, jaw, or back?",
            "Associated diaphoresis or nausea?",
            "Duration and frequency of episodes?",
        ],
    },
    FollowUpBlock {
        disease: Some(DiseaseCategory::Diabetes),
        symptoms_any: &["excessive thirst", "frequent urination", "increased hunger"],
        questions: &[
            "Recent HbA1c and fasting glucose values?",
            "Unintentional weight change?",
            "Polyuria/nocturia severity and onset?",
            "Any neuropathy or visual blurring?",
        ],
    },
    // Symptom-triggered only.
    FollowUpBlock {
        disease: None,
        symptoms_any: &["diplopia", "double vision", "ptosis"],
        questions: &[
            "Do symptoms fluctuate with fatigue (suggesting myasthenia)?",
            "Any pupillary involvement or headache (for 3rd nerve palsy)?",
            "Onset abrupt vs progressive?",
        ],
    },
    FollowUpBlock {
        disease: Some(DiseaseCategory::Neurological),
        symptoms_any: &["weakness", "numbness", "tingling"],
        questions: &[
            "Symmetry and distribution of weakness/numbness?",
            "Back pain or radicular features?",
            "Bowel/bladder involvement?",
        ],
    },
];

/// Questions from every triggered block, in block order, deduplicated.
pub fn follow_up_questions(diseases: &[String], symptoms: &[String]) -> Vec<String> {
    let lowered = lowercase_all(symptoms);
    let mut seen = HashSet::new();

    FOLLOW_UP_BLOCKS
        .iter()
        .filter(|block| {
            block
                .disease
                .is_some_and(|d| diseases.iter().any(|x| x == d.as_str()))
                || any_present(block.symptoms_any, &lowered)
        })
        .flat_map(|block| block.questions.iter())
        .filter(|q| seen.insert(**q))
        .take(MAX_FOLLOW_UPS)
        .map(|q| q.to_string())
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Differential pairs
// ═══════════════════════════════════════════════════════════

struct DifferentialPair {
    pair: [&'static str; 2],
    points: &'static [&'static str],
}

struct DifferentialRule {
    symptoms_any: &'static [&'static str],
    pairs: &'static [DifferentialPair],
}

static DIFFERENTIAL_RULES: [DifferentialRule; 3] = [
    DifferentialRule {
        symptoms_any: &["chest pain", "chest tightness", "shortness of breath"],
        pairs: &[
            DifferentialPair {
                pair: ["Stable angina", "Gastroesophageal reflux"],
                points: &[
                    "Exertional chest pain relieved by rest favors angina",
                    "Burning postprandial pain lying down favors reflux",
                ],
            },
            DifferentialPair {
                pair: ["Acute coronary syndrome", "Musculoskeletal chest pain"],
                points: &[
                    "Pressure-like pain with diaphoresis suggests ACS",
                    "Reproducible chest wall tenderness suggests musculoskeletal",
                ],
            },
        ],
    },
    DifferentialRule {
        symptoms_any: &["back pain", "leg pain", "sciatica"],
        pairs: &[DifferentialPair {
            pair: ["Lumbar canal stenosis", "Sciatica"],
            points: &[
                "Pain relieved by sitting suggests canal stenosis",
                "Sitting worsens discomfort suggests sciatica",
            ],
        }],
    },
    DifferentialRule {
        symptoms_any: &["diplopia", "ptosis", "double vision"],
        pairs: &[DifferentialPair {
            pair: ["Myasthenia gravis", "Cranial nerve palsy"],
            points: &[
                "Fatigable ptosis/ophthalmoparesis favors MG",
                "Fixed pupil or severe headache suggests nerve palsy",
            ],
        }],
    },
];

pub fn differentials(symptoms: &[String]) -> Vec<Differential> {
    let lowered = lowercase_all(symptoms);

    DIFFERENTIAL_RULES
        .iter()
        .filter(|rule| any_present(rule.symptoms_any, &lowered))
        .flat_map(|rule| rule.pairs.iter())
        .take(MAX_DIFFERENTIALS)
        .map(|entry| Differential {
            pair: entry.pair.map(str::to_string),
            distinguishing_points: entry.points.iter().map(|p| p.to_string()).collect(),
        })
        .collect()
}

fn lowercase_all(symptoms: &[String]) -> Vec<String> {
    symptoms.iter().map(|s| s.to_lowercase()).collect()
}

fn any_present(keywords: &[&str], lowered: &[String]) -> bool {
    keywords.iter().any(|k| lowered.iter().any(|s| s == k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::csv_index::CsvTable;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn cardio_index() -> KnowledgeBaseIndex {
        let diagnoses = CsvTable::from_csv_text("diagnosis\nCardiovascular Disease\n");
        let tests = CsvTable::from_csv_text(
            "diagnosis,test\n\
             cardiovascular disease,Troponin\n\
             cardiovascular disease,Stress test\n\
             cardiovascular disease,Lipid panel\n",
        );
        let measurements = CsvTable::from_csv_text(
            "diagnosis,measurement\ncardiovascular disease,Heart rate\n",
        );
        let drugs = CsvTable::from_csv_text("diagnosis,drug\ncardiovascular disease,Aspirin\n");
        let empty = CsvTable::default();
        KnowledgeBaseIndex::from_tables(&diagnoses, &tests, &measurements, &drugs, &empty)
    }

    #[test]
    fn static_recommendations_and_cardiac_alert() {
        let diseases = strings(&["Cardiovascular Disease"]);
        let symptoms = strings(&["chest pain"]);
        let outcome = retrieve_guidance(&diseases, &symptoms, None);

        assert_eq!(outcome.guidelines.len(), 9);
        assert_eq!(outcome.guidelines[0], "Recommend ECG examination");
        assert_eq!(outcome.guidelines[6], "Recommend immediate ECG examination");
        assert!(outcome.treatments.is_empty());
        assert_eq!(outcome.sources, strings(&BASELINE_SOURCES));
    }

    #[test]
    fn categories_without_table_entry_add_nothing() {
        let outcome = retrieve_guidance(&strings(&["Ophthalmic Disorder"]), &[], None);
        assert!(outcome.guidelines.is_empty());
    }

    #[test]
    fn cardiac_alert_requires_exact_symptom() {
        let outcome = retrieve_guidance(&[], &strings(&["Chest Pain"]), None);
        assert!(outcome.guidelines.is_empty());
    }

    #[test]
    fn guidelines_capped_at_fifteen() {
        let diseases = strings(&["Cardiovascular Disease", "Diabetes", "Hypertension"]);
        let symptoms = strings(&["palpitations"]);
        let outcome = retrieve_guidance(&diseases, &symptoms, None);
        assert_eq!(outcome.guidelines.len(), MAX_GUIDELINES);
        assert_eq!(outcome.guidelines[12], "Regular blood pressure monitoring");
        assert_eq!(outcome.guidelines[14], "Moderate exercise");
    }

    #[test]
    fn index_enrichment_and_local_source() {
        let index = cardio_index();
        let diseases = strings(&["Cardiovascular Disease"]);
        let outcome = retrieve_guidance(&diseases, &[], Some(&index));

        assert!(outcome.guidelines.contains(&"Consider test: Lipid panel".to_string()));
        assert!(outcome.guidelines.contains(&"Monitor measurement: Heart rate".to_string()));
        assert_eq!(outcome.treatments, vec!["Potential therapy: Aspirin".to_string()]);
        assert_eq!(outcome.sources.last().map(String::as_str), Some(LOCAL_CORPUS_SOURCE));
        assert_eq!(outcome.sources.len(), 4);
    }

    #[test]
    fn index_without_diseases_adds_no_source() {
        let index = cardio_index();
        let outcome = retrieve_guidance(&[], &[], Some(&index));
        assert_eq!(outcome.sources.len(), 3);
    }

    #[test]
    fn follow_ups_deduplicated_and_capped() {
        let diseases = strings(&["Cardiovascular Disease", "Diabetes", "Neurological Disorder"]);
        let symptoms = strings(&["chest pain", "Double Vision", "numbness"]);
        let questions = follow_up_questions(&diseases, &symptoms);

        assert_eq!(questions.len(), MAX_FOLLOW_UPS);
        let unique: HashSet<_> = questions.iter().collect();
        assert_eq!(unique.len(), questions.len());
        assert_eq!(questions[0], "Chest pain is exertional and relieved by rest?");
        assert_eq!(questions[8], "Do symptoms fluctuate with fatigue (suggesting myasthenia)?");
    }

    #[test]
    fn follow_ups_triggered_by_symptom_alone() {
        let questions = follow_up_questions(&[], &strings(&["tingling"]));
        assert_eq!(
            questions,
            strings(&[
                "Symmetry and distribution of weakness/numbness?",
                "Back pain or radicular features?",
                "Bowel/bladder involvement?",
            ])
        );
    }

    #[test]
    fn no_follow_ups_for_unrelated_input() {
        assert!(follow_up_questions(&strings(&["Autoimmune Disorder"]), &strings(&["fever"])).is_empty());
    }

    #[test]
    fn differentials_in_rule_order() {
        let symptoms = strings(&["ptosis", "Shortness of Breath", "sciatica"]);
        let pairs = differentials(&symptoms);

        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0].pair, ["Stable angina".to_string(), "Gastroesophageal reflux".to_string()]);
        assert_eq!(pairs[2].pair[0], "Lumbar canal stenosis");
        assert_eq!(pairs[3].pair[1], "Cranial nerve palsy");
        assert_eq!(pairs[3].distinguishing_points.len(), 2);
    }

    #[test]
    fn differential_wire_shape() {
        let pairs = differentials(&strings(&["back pain"]));
        let json = serde_json::to_value(&pairs[0]).unwrap();
        assert_eq!(json["pair"][1], "Sciatica");
        assert_eq!(
            json["distinguishing_points"][0],
            "Pain relieved by sitting suggests canal stenosis"
        );
    }
}
