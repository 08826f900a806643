//! Static clinical knowledge: keyword groups used for detection and the
//! per-category recommendation table used for guideline retrieval.

use crate::models::DiseaseCategory;

// ═══════════════════════════════════════════════════════════
// Keyword groups
// ═══════════════════════════════════════════════════════════

/// Trigger keywords for one disease category and the symptom labels
/// attached when any of them occurs in the notes.
#[derive(Debug)]
pub struct KeywordGroup {
    pub keywords: &'static [&'static str],
    pub symptoms: &'static [&'static str],
}

impl KeywordGroup {
    /// `lower_text` must already be lowercased.
    pub fn matches(&self, lower_text: &str) -> bool {
        self.keywords.iter().any(|k| lower_text.contains(k))
    }
}

/// Keyword group used when the text encoder succeeded.
pub fn primary_group(category: DiseaseCategory) -> &'static KeywordGroup {
    match category {
        DiseaseCategory::Cardiovascular => &KeywordGroup {
            keywords: &[
                "chest pain",
                "chest tightness",
                "palpitations",
                "shortness of breath",
                "heart",
                "cardiac",
                "angina",
            ],
            symptoms: &[
                "chest pain",
                "chest tightness",
                "palpitations",
                "shortness of breath",
            ],
        },
        DiseaseCategory::Diabetes => &KeywordGroup {
            keywords: &[
                "excessive thirst",
                "frequent urination",
                "increased hunger",
                "glucose",
                "diabetes",
                "blood sugar",
                "polyuria",
                "polydipsia",
            ],
            symptoms: &["excessive thirst", "frequent urination", "increased hunger"],
        },
        DiseaseCategory::Hypertension => &KeywordGroup {
            keywords: &[
                "hypertension",
                "blood pressure",
                "headache",
                "dizziness",
                "high bp",
                "elevated bp",
            ],
            symptoms: &["headache", "dizziness", "palpitations"],
        },
        DiseaseCategory::Ophthalmic => &KeywordGroup {
            keywords: &[
                "eye",
                "ocular",
                "vision",
                "visual",
                "diplopia",
                "double vision",
                "eye weakness",
                "oculomotor",
                "palsy",
                "ptosis",
                "eyelid",
                "retina",
                "optic",
                "glaucoma",
                "cataract",
            ],
            symptoms: &["visual disturbance", "eye weakness", "diplopia"],
        },
        DiseaseCategory::Neurological => &KeywordGroup {
            keywords: &[
                "nerve",
                "neurological",
                "palsy",
                "paralysis",
                "weakness",
                "numbness",
                "tingling",
                "seizure",
                "epilepsy",
                "stroke",
                "cerebral",
                "brain",
                "cranial nerve",
            ],
            symptoms: &["nerve weakness", "neurological symptoms"],
        },
        DiseaseCategory::Autoimmune => &KeywordGroup {
            keywords: &[
                "autoimmune",
                "prednisone",
                "steroid",
                "inflammation",
                "immune",
                "myasthenia",
                "graves",
                "thyroid",
                "rheumatoid",
                "lupus",
            ],
            symptoms: &["immune system involvement", "steroid responsive"],
        },
    }
}

/// Narrower keyword group used when the text encoder failed.
/// Each group attaches exactly one representative symptom.
pub fn fallback_group(category: DiseaseCategory) -> &'static KeywordGroup {
    match category {
        DiseaseCategory::Cardiovascular => &KeywordGroup {
            keywords: &["chest pain", "heart", "cardiac"],
            symptoms: &["chest pain"],
        },
        DiseaseCategory::Diabetes => &KeywordGroup {
            keywords: &["diabetes", "glucose", "blood sugar"],
            symptoms: &["glucose issues"],
        },
        DiseaseCategory::Hypertension => &KeywordGroup {
            keywords: &["hypertension", "blood pressure", "high bp"],
            symptoms: &["elevated blood pressure"],
        },
        DiseaseCategory::Ophthalmic => &KeywordGroup {
            keywords: &[
                "eye",
                "ocular",
                "vision",
                "visual",
                "diplopia",
                "double vision",
                "eye weakness",
                "oculomotor",
                "palsy",
                "ptosis",
            ],
            symptoms: &["visual disturbance"],
        },
        DiseaseCategory::Neurological => &KeywordGroup {
            keywords: &[
                "nerve",
                "neurological",
                "palsy",
                "paralysis",
                "weakness",
                "numbness",
                "tingling",
            ],
            symptoms: &["nerve weakness"],
        },
        DiseaseCategory::Autoimmune => &KeywordGroup {
            keywords: &["prednisone", "steroid", "inflammation", "immune", "myasthenia"],
            symptoms: &["immune system involvement"],
        },
    }
}

/// Independent single-symptom checks, evaluated in order after the
/// disease groups on the primary path.
pub const SYMPTOM_CHECKS: [KeywordGroup; 8] = [
    KeywordGroup {
        keywords: &["fever", "temperature", "hot", "pyrexia"],
        symptoms: &["fever"],
    },
    KeywordGroup {
        keywords: &["nausea", "vomiting", "sick", "queasy"],
        symptoms: &["nausea"],
    },
    KeywordGroup {
        keywords: &["fatigue", "tired", "weakness", "exhaustion"],
        symptoms: &["fatigue"],
    },
    KeywordGroup {
        keywords: &["cough", "coughing", "productive cough"],
        symptoms: &["cough"],
    },
    KeywordGroup {
        keywords: &["weight loss", "unintended weight loss"],
        symptoms: &["weight loss"],
    },
    KeywordGroup {
        keywords: &["weight gain", "unintended weight gain"],
        symptoms: &["weight gain"],
    },
    KeywordGroup {
        keywords: &["headache", "head pain", "migraine"],
        symptoms: &["headache"],
    },
    KeywordGroup {
        keywords: &["dizziness", "vertigo", "balance"],
        symptoms: &["dizziness"],
    },
];

// ═══════════════════════════════════════════════════════════
// Recommendation table
// ═══════════════════════════════════════════════════════════

/// Curated knowledge for a disease category.
#[derive(Debug)]
pub struct KnowledgeEntry {
    pub symptoms: &'static [&'static str],
    pub risk_factors: &'static [&'static str],
    pub conditions: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

static CARDIOVASCULAR: KnowledgeEntry = KnowledgeEntry {
    symptoms: &[
        "chest pain",
        "chest tightness",
        "palpitations",
        "shortness of breath",
        "chest discomfort",
    ],
    risk_factors: &[
        "hypertension",
        "high cholesterol",
        "smoking",
        "diabetes",
        "family history",
    ],
    conditions: &[
        "coronary artery disease",
        "myocardial infarction",
        "angina",
        "arrhythmia",
    ],
    recommendations: &[
        "Recommend ECG examination",
        "Consider echocardiogram",
        "Monitor blood pressure and heart rate",
        "Quit smoking and limit alcohol",
        "Low-salt, low-fat diet",
        "Regular lipid profile monitoring",
    ],
};

static DIABETES: KnowledgeEntry = KnowledgeEntry {
    symptoms: &[
        "excessive thirst",
        "frequent urination",
        "increased hunger",
        "weight loss",
        "fatigue",
    ],
    risk_factors: &["obesity", "family history", "hypertension", "high cholesterol"],
    conditions: &["type 1 diabetes", "type 2 diabetes", "prediabetes"],
    recommendations: &[
        "Monitor blood glucose levels",
        "HbA1c testing",
        "Diet control",
        "Moderate exercise",
        "Regular eye examinations",
        "Foot care",
    ],
};

static HYPERTENSION: KnowledgeEntry = KnowledgeEntry {
    symptoms: &["headache", "dizziness", "palpitations", "fatigue"],
    risk_factors: &["age", "family history", "obesity", "smoking", "high salt diet"],
    conditions: &[
        "essential hypertension",
        "secondary hypertension",
        "hypertensive crisis",
    ],
    recommendations: &[
        "Regular blood pressure monitoring",
        "Low-salt diet",
        "Moderate exercise",
        "Weight control",
        "Quit smoking and limit alcohol",
        "Medication therapy",
    ],
};

/// Table entry for a category. Ophthalmic, neurological and autoimmune
/// categories carry no curated entry.
pub fn knowledge_entry(category: DiseaseCategory) -> Option<&'static KnowledgeEntry> {
    match category {
        DiseaseCategory::Cardiovascular => Some(&CARDIOVASCULAR),
        DiseaseCategory::Diabetes => Some(&DIABETES),
        DiseaseCategory::Hypertension => Some(&HYPERTENSION),
        DiseaseCategory::Ophthalmic
        | DiseaseCategory::Neurological
        | DiseaseCategory::Autoimmune => None,
    }
}
