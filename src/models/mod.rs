pub mod enums;
pub mod patient;

pub use enums::{DiseaseCategory, InvalidEnum, RiskLevel, Urgency};
pub use patient::PatientRecord;
