//! Additive risk score over structured patient fields.

use crate::models::{PatientRecord, RiskLevel};

use super::types::{RiskOutcome, RiskPredictions};

const AGE_THRESHOLD: u32 = 50;
const CHOLESTEROL_THRESHOLD: f64 = 200.0;
const GLUCOSE_THRESHOLD: f64 = 126.0;
const SYSTOLIC_THRESHOLD: i64 = 140;

pub fn score_risk(patient: &PatientRecord) -> RiskOutcome {
    let mut score = 0.0;
    let mut factors = Vec::new();
    let mut add = |triggered: bool, weight: f64, label: &str| {
        if triggered {
            score += weight;
            factors.push(label.to_string());
        }
    };

    add(patient.age > AGE_THRESHOLD, 0.2, "Advanced age");
    add(patient.gender == "Male", 0.1, "Male gender");
    add(
        patient.cholesterol.is_some_and(|v| v > CHOLESTEROL_THRESHOLD),
        0.3,
        "High cholesterol",
    );
    add(
        patient.blood_glucose.is_some_and(|v| v > GLUCOSE_THRESHOLD),
        0.25,
        "High blood glucose",
    );
    add(
        patient.systolic().is_some_and(|s| s > SYSTOLIC_THRESHOLD),
        0.2,
        "Hypertension",
    );

    RiskOutcome {
        risk_score: score,
        risk_level: RiskLevel::from_score(score),
        risk_factors: factors,
        predictions: RiskPredictions {
            cardiovascular_risk: (score * 1.2).min(1.0),
            diabetes_risk: (score * 0.8).min(1.0),
            hypertension_risk: (score * 1.1).min(1.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn patient(age: u32, gender: &str) -> PatientRecord {
        PatientRecord::new(age, gender)
    }

    #[test]
    fn no_factors_is_low_risk() {
        let outcome = score_risk(&patient(30, "Female"));
        assert_eq!(outcome.risk_score, 0.0);
        assert_eq!(outcome.risk_level, RiskLevel::Low);
        assert!(outcome.risk_factors.is_empty());
        assert_eq!(outcome.predictions.cardiovascular_risk, 0.0);
    }

    #[test]
    fn systolic_only_is_low_risk() {
        let record = PatientRecord {
            blood_pressure: Some("150/95".into()),
            ..patient(30, "Female")
        };
        let outcome = score_risk(&record);
        assert_eq!(outcome.risk_score, 0.2);
        assert_eq!(outcome.risk_level, RiskLevel::Low);
        assert_eq!(outcome.risk_factors, vec!["Hypertension".to_string()]);
    }

    #[test]
    fn unparseable_pressure_is_ignored() {
        for bp in ["abc/95", "150", "150/95/60", ""] {
            let record = PatientRecord {
                blood_pressure: Some(bp.into()),
                ..patient(30, "Female")
            };
            assert_eq!(score_risk(&record).risk_score, 0.0, "bp = {bp:?}");
        }
    }

    #[test]
    fn medium_threshold_is_closed() {
        // 0.2 + 0.2 == 0.4 exactly in binary floating point.
        let record = PatientRecord {
            blood_pressure: Some("160/100".into()),
            ..patient(60, "Female")
        };
        let outcome = score_risk(&record);
        assert_eq!(outcome.risk_score, 0.4);
        assert_eq!(outcome.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn thresholds_are_strict_greater_than() {
        let record = PatientRecord {
            cholesterol: Some(200.0),
            blood_glucose: Some(126.0),
            blood_pressure: Some("140/90".into()),
            ..patient(50, "Female")
        };
        assert_eq!(score_risk(&record).risk_score, 0.0);
    }

    #[test]
    fn gender_match_is_case_sensitive() {
        assert_eq!(score_risk(&patient(30, "male")).risk_score, 0.0);
        assert!(approx(score_risk(&patient(30, "Male")).risk_score, 0.1));
    }

    #[test]
    fn all_factors_exceed_one() {
        let record = PatientRecord {
            cholesterol: Some(220.0),
            blood_glucose: Some(140.0),
            blood_pressure: Some("150/90".into()),
            ..patient(55, "Male")
        };
        let outcome = score_risk(&record);

        assert!(approx(outcome.risk_score, 1.05));
        assert_eq!(outcome.risk_level, RiskLevel::High);
        assert_eq!(
            outcome.risk_factors,
            vec![
                "Advanced age",
                "Male gender",
                "High cholesterol",
                "High blood glucose",
                "Hypertension",
            ]
        );
        assert_eq!(outcome.predictions.cardiovascular_risk, 1.0);
        assert!(approx(outcome.predictions.diabetes_risk, 0.84));
        assert_eq!(outcome.predictions.hypertension_risk, 1.0);
    }

    #[test]
    fn sub_scores_scale_partial_risk() {
        let record = PatientRecord {
            cholesterol: Some(240.0),
            ..patient(30, "Female")
        };
        let outcome = score_risk(&record);
        assert!(approx(outcome.predictions.cardiovascular_risk, 0.36));
        assert!(approx(outcome.predictions.diabetes_risk, 0.24));
        assert!(approx(outcome.predictions.hypertension_risk, 0.33));
    }
}
