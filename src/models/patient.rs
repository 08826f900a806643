use serde::{Deserialize, Serialize};

/// Structured patient data plus free-text notes, as posted to `/analyze`.
///
/// Only `age`, `gender`, `cholesterol`, `blood_glucose` and `blood_pressure`
/// feed the risk score; the remaining measurements are accepted and carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub age: u32,
    pub gender: String,
    /// "systolic/diastolic", e.g. "120/80".
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub cholesterol: Option<f64>,
    #[serde(default)]
    pub blood_glucose: Option<f64>,
    #[serde(default)]
    pub hdl: Option<f64>,
    #[serde(default)]
    pub ldl: Option<f64>,
    #[serde(default)]
    pub bun: Option<f64>,
    #[serde(default)]
    pub creatinine: Option<f64>,
    #[serde(default)]
    pub hba1c: Option<f64>,
    #[serde(default)]
    pub clinical_notes: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub prescriptions: Option<String>,
}

impl PatientRecord {
    pub fn new(age: u32, gender: impl Into<String>) -> Self {
        Self {
            age,
            gender: gender.into(),
            ..Default::default()
        }
    }

    /// Systolic reading from `blood_pressure`.
    ///
    /// Requires exactly two `/`-separated parts and an integer first part;
    /// anything else yields `None`.
    pub fn systolic(&self) -> Option<i64> {
        let raw = self.blood_pressure.as_deref()?;
        let parts: Vec<&str> = raw.split('/').collect();
        if parts.len() != 2 {
            return None;
        }
        parts[0].trim().parse::<i64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_bp(bp: &str) -> PatientRecord {
        PatientRecord {
            blood_pressure: Some(bp.into()),
            ..PatientRecord::new(40, "Female")
        }
    }

    #[test]
    fn systolic_parses_standard_reading() {
        assert_eq!(with_bp("150/95").systolic(), Some(150));
        assert_eq!(with_bp(" 120 /80").systolic(), Some(120));
    }

    #[test]
    fn systolic_rejects_malformed_readings() {
        assert_eq!(with_bp("abc/95").systolic(), None);
        assert_eq!(with_bp("150").systolic(), None);
        assert_eq!(with_bp("150/95/60").systolic(), None);
        assert_eq!(with_bp("150.5/95").systolic(), None);
        assert_eq!(with_bp("").systolic(), None);
        assert_eq!(PatientRecord::new(40, "Female").systolic(), None);
    }

    #[test]
    fn deserializes_minimal_request() {
        let record: PatientRecord =
            serde_json::from_str(r#"{"age": 55, "gender": "Male"}"#).unwrap();
        assert_eq!(record.age, 55);
        assert_eq!(record.gender, "Male");
        assert!(record.clinical_notes.is_none());
        assert!(record.blood_pressure.is_none());
    }

    #[test]
    fn deserializes_full_request() {
        let record: PatientRecord = serde_json::from_str(
            r#"{
                "age": 61, "gender": "Female", "blood_pressure": "135/85",
                "cholesterol": 210.5, "blood_glucose": 98, "hdl": 45, "ldl": 130,
                "bun": 14, "creatinine": 0.9, "hba1c": 5.8, "height": 165,
                "weight": 70.2, "allergies": "penicillin", "prescriptions": "metformin",
                "clinical_notes": "mild headache"
            }"#,
        )
        .unwrap();
        assert_eq!(record.cholesterol, Some(210.5));
        assert_eq!(record.blood_glucose, Some(98.0));
        assert_eq!(record.allergies.as_deref(), Some("penicillin"));
        assert_eq!(record.systolic(), Some(135));
    }

    #[test]
    fn negative_age_is_rejected() {
        let parsed: Result<PatientRecord, _> =
            serde_json::from_str(r#"{"age": -3, "gender": "Male"}"#);
        assert!(parsed.is_err());
    }
}
