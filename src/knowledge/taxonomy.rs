//! Three-tier disease taxonomy (L1 domain / L2 subdomain / L3 specific label).
//!
//! L3 is refined by ordered rules: the first rule whose keyword set shares
//! a member with the (lowercased) symptom list wins, otherwise the entry's
//! default label applies.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::DiseaseCategory;

/// Number of detected diseases that receive taxonomy levels.
pub const MAX_LEVELED_DISEASES: usize = 3;

const UNKNOWN: &str = "Unknown";

#[derive(Debug)]
pub struct L3Rule {
    pub if_symptoms_any: &'static [&'static str],
    pub label: &'static str,
}

#[derive(Debug)]
pub struct TaxonomyEntry {
    pub l1: &'static str,
    pub l2: &'static str,
    pub l3_rules: &'static [L3Rule],
    pub default_l3: &'static str,
}

pub fn taxonomy_entry(category: DiseaseCategory) -> &'static TaxonomyEntry {
    match category {
        DiseaseCategory::Cardiovascular => &TaxonomyEntry {
            l1: "Cardiovascular",
            l2: "Coronary/Cardiac",
            l3_rules: &[
                L3Rule {
                    if_symptoms_any: &["chest pain", "chest tightness", "angina"],
                    label: "Angina",
                },
                L3Rule {
                    if_symptoms_any: &["shortness of breath", "palpitations"],
                    label: "Arrhythmia",
                },
            ],
            default_l3: "Cardiac condition",
        },
        DiseaseCategory::Hypertension => &TaxonomyEntry {
            l1: "Cardiovascular",
            l2: "Hypertension",
            l3_rules: &[L3Rule {
                if_symptoms_any: &["headache", "dizziness"],
                label: "Hypertensive disorder",
            }],
            default_l3: "Essential hypertension",
        },
        DiseaseCategory::Diabetes => &TaxonomyEntry {
            l1: "Endocrine",
            l2: "Diabetes",
            l3_rules: &[L3Rule {
                if_symptoms_any: &["excessive thirst", "frequent urination", "increased hunger"],
                label: "Type 2 diabetes",
            }],
            default_l3: "Diabetes (unspecified)",
        },
        DiseaseCategory::Ophthalmic => &TaxonomyEntry {
            l1: "Ophthalmology",
            l2: "Neuro-ophthalmic",
            l3_rules: &[L3Rule {
                if_symptoms_any: &["diplopia", "double vision", "ptosis"],
                label: "Ocular motor dysfunction",
            }],
            default_l3: "Eye disorder",
        },
        DiseaseCategory::Neurological => &TaxonomyEntry {
            l1: "Neurology",
            l2: "Neuromuscular/CNS",
            l3_rules: &[
                L3Rule {
                    if_symptoms_any: &["weakness", "numbness", "tingling"],
                    label: "Peripheral neuropathy",
                },
                L3Rule {
                    if_symptoms_any: &["seizure", "epilepsy"],
                    label: "Epilepsy",
                },
            ],
            default_l3: "Neurological disorder",
        },
        DiseaseCategory::Autoimmune => &TaxonomyEntry {
            l1: "Immunology",
            l2: "Autoimmune",
            l3_rules: &[L3Rule {
                if_symptoms_any: &["steroid", "prednisone", "inflammation"],
                label: "Steroid-responsive autoimmune",
            }],
            default_l3: "Autoimmune disorder",
        },
    }
}

impl TaxonomyEntry {
    /// Resolve the L3 label against an already-lowercased symptom list.
    fn infer_l3(&self, normalized_symptoms: &[String]) -> &'static str {
        self.l3_rules
            .iter()
            .find(|rule| {
                rule.if_symptoms_any
                    .iter()
                    .any(|k| normalized_symptoms.iter().any(|s| s == k))
            })
            .map(|rule| rule.label)
            .unwrap_or(self.default_l3)
    }
}

/// Taxonomy levels for one detected disease. Field names follow the
/// `L1`/`L2`/`L3` keys the web client renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyLevels {
    pub disease: String,
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
}

/// L3 label for a disease label. Unrecognized diseases label themselves.
pub fn infer_l3_label(disease: &str, symptoms: &[String]) -> String {
    match DiseaseCategory::from_str(disease) {
        Ok(category) => taxonomy_entry(category)
            .infer_l3(&normalize(symptoms))
            .to_string(),
        Err(_) => disease.to_string(),
    }
}

/// Levels for the first three detected diseases.
pub fn hierarchical_levels(diseases: &[String], symptoms: &[String]) -> Vec<TaxonomyLevels> {
    let normalized = normalize(symptoms);

    diseases
        .iter()
        .take(MAX_LEVELED_DISEASES)
        .map(|disease| match DiseaseCategory::from_str(disease) {
            Ok(category) => {
                let entry = taxonomy_entry(category);
                TaxonomyLevels {
                    disease: disease.clone(),
                    l1: entry.l1.to_string(),
                    l2: entry.l2.to_string(),
                    l3: entry.infer_l3(&normalized).to_string(),
                }
            }
            Err(_) => TaxonomyLevels {
                disease: disease.clone(),
                l1: UNKNOWN.to_string(),
                l2: UNKNOWN.to_string(),
                l3: disease.clone(),
            },
        })
        .collect()
}

fn normalize(symptoms: &[String]) -> Vec<String> {
    symptoms.iter().map(|s| s.to_lowercase()).collect()
}
