use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serialized form.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Top-level disease labels shared by detection, taxonomy and guideline lookup.
    DiseaseCategory {
        Cardiovascular => "Cardiovascular Disease",
        Hypertension => "Hypertension",
        Diabetes => "Diabetes",
        Ophthalmic => "Ophthalmic Disorder",
        Neurological => "Neurological Disorder",
        Autoimmune => "Autoimmune Disorder",
    }
);

impl DiseaseCategory {
    /// Keyword-group scan order used by the text analyzer.
    pub const DETECTION_ORDER: [DiseaseCategory; 6] = [
        Self::Cardiovascular,
        Self::Diabetes,
        Self::Hypertension,
        Self::Ophthalmic,
        Self::Neurological,
        Self::Autoimmune,
    ];
}

str_enum!(RiskLevel {
    Low => "Low risk",
    Medium => "Medium risk",
    High => "High risk",
});

impl RiskLevel {
    /// Closed lower bounds: 0.4 is Medium, 0.7 is High.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            Self::High
        } else if score >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

str_enum!(Urgency {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

impl From<RiskLevel> for Urgency {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => Self::High,
            RiskLevel::Medium => Self::Medium,
            RiskLevel::Low => Self::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn disease_category_round_trips_through_label() {
        for category in DiseaseCategory::DETECTION_ORDER {
            assert_eq!(DiseaseCategory::from_str(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = DiseaseCategory::from_str("Renal Disease").unwrap_err();
        assert_eq!(err.field, "DiseaseCategory");
        assert_eq!(err.value, "Renal Disease");
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&DiseaseCategory::Ophthalmic).unwrap();
        assert_eq!(json, "\"Ophthalmic Disorder\"");
    }

    #[test]
    fn risk_level_thresholds_are_closed() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.4), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.7), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(1.05), RiskLevel::High);
    }

    #[test]
    fn urgency_follows_risk_level() {
        assert_eq!(Urgency::from(RiskLevel::High), Urgency::High);
        assert_eq!(Urgency::from(RiskLevel::Medium), Urgency::Medium);
        assert_eq!(Urgency::from(RiskLevel::Low), Urgency::Low);
        assert_eq!(serde_json::to_string(&Urgency::High).unwrap(), "\"High\"");
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"Medium risk\""
        );
    }
}
