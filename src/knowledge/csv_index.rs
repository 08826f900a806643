//! CSV-backed knowledge index.
//!
//! Maps normalized disease/condition names to recommended tests,
//! measurements and drugs. Built once at startup from up to five optional
//! files; a missing or unreadable file contributes nothing.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::KnowledgeError;

pub const DIAGNOSES_FILE: &str = "Diagnoses.csv";
pub const TESTS_FILE: &str = "Tests.csv";
pub const MEASUREMENTS_FILE: &str = "MeasurementsLookup.csv";
pub const DRUGS_FILE: &str = "DrugLookup.csv";
pub const CONDITIONS_FILE: &str = "ConditionsLookup.csv";

const NAME_COLUMNS: &[&str] = &["diagnosis", "condition", "name", "label"];
const NAME_FALLBACK_COLUMNS: &[&str] = &["disease"];
const DISEASE_COLUMNS: &[&str] = &["diagnosis", "condition", "disease"];
const TEST_COLUMNS: &[&str] = &["test", "name", "title"];
const MEASUREMENT_COLUMNS: &[&str] = &["measurement", "name", "indicator"];
const DRUG_COLUMNS: &[&str] = &["drug", "med", "name"];

// ═══════════════════════════════════════════════════════════
// CSV tables
// ═══════════════════════════════════════════════════════════

/// One parsed CSV file: normalized headers plus raw records.
#[derive(Debug, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl CsvTable {
    pub fn read(path: &Path) -> Result<Self, KnowledgeError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| KnowledgeError::Csv(path.to_path_buf(), e))?;

        let headers = reader
            .headers()
            .map_err(|e| KnowledgeError::Csv(path.to_path_buf(), e))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| KnowledgeError::Csv(path.to_path_buf(), e))?;

        Ok(Self { headers, records })
    }

    #[cfg(test)]
    pub(crate) fn from_csv_text(data: &str) -> Self {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes());
        let headers = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let records = reader.records().map(|r| r.unwrap()).collect();
        Self { headers, records }
    }

    /// Index of the first column (in file order) whose name contains any candidate.
    fn guess_column(&self, candidates: &[&str]) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| candidates.iter().any(|c| h.contains(c)))
    }

    /// Non-empty value of `column` in `record`. Short rows yield `None`.
    fn value<'r>(record: &'r csv::StringRecord, column: Option<usize>) -> Option<&'r str> {
        column
            .and_then(|idx| record.get(idx))
            .filter(|v| !v.is_empty())
    }
}

/// Read one source, degrading any problem to an empty table.
fn load_table(dir: &Path, file: &str) -> CsvTable {
    let path = dir.join(file);
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Knowledge data file not found");
        return CsvTable::default();
    }
    match CsvTable::read(&path) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read knowledge CSV");
            CsvTable::default()
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

// ═══════════════════════════════════════════════════════════
// Index
// ═══════════════════════════════════════════════════════════

/// Tests, measurements and drugs associated with one disease key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeMatch {
    pub tests: Vec<String>,
    pub measurements: Vec<String>,
    pub drugs: Vec<String>,
}

impl KnowledgeMatch {
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty() && self.measurements.is_empty() && self.drugs.is_empty()
    }
}

/// Read-only disease → tests/measurements/drugs lookup.
#[derive(Debug, Default)]
pub struct KnowledgeBaseIndex {
    source_dir: Option<PathBuf>,
    /// Ordered so fuzzy matching resolves ties lexicographically.
    disease_names: BTreeSet<String>,
    disease_to_tests: HashMap<String, BTreeSet<String>>,
    disease_to_measurements: HashMap<String, BTreeSet<String>>,
    disease_to_drugs: HashMap<String, BTreeSet<String>>,
}

impl KnowledgeBaseIndex {
    /// Load every known source from `dir`. Never fails.
    pub fn load(dir: &Path) -> Self {
        let diagnoses = load_table(dir, DIAGNOSES_FILE);
        let tests = load_table(dir, TESTS_FILE);
        let measurements = load_table(dir, MEASUREMENTS_FILE);
        let drugs = load_table(dir, DRUGS_FILE);
        let conditions = load_table(dir, CONDITIONS_FILE);

        let mut index = Self::from_tables(&diagnoses, &tests, &measurements, &drugs, &conditions);
        index.source_dir = Some(dir.to_path_buf());

        tracing::info!(
            dir = %dir.display(),
            diseases = index.disease_names.len(),
            test_keys = index.disease_to_tests.len(),
            measurement_keys = index.disease_to_measurements.len(),
            drug_keys = index.disease_to_drugs.len(),
            "Loaded knowledge index"
        );

        index
    }

    pub fn from_tables(
        diagnoses: &CsvTable,
        tests: &CsvTable,
        measurements: &CsvTable,
        drugs: &CsvTable,
        conditions: &CsvTable,
    ) -> Self {
        let mut index = Self::default();

        for table in [diagnoses, conditions] {
            let primary = table.guess_column(NAME_COLUMNS);
            let fallback = table.guess_column(NAME_FALLBACK_COLUMNS);
            for record in &table.records {
                let name = CsvTable::value(record, primary)
                    .or_else(|| CsvTable::value(record, fallback));
                if let Some(name) = name {
                    index.disease_names.insert(normalize(name));
                }
            }
        }

        accumulate(&mut index.disease_to_tests, tests, TEST_COLUMNS);
        accumulate(&mut index.disease_to_measurements, measurements, MEASUREMENT_COLUMNS);
        accumulate(&mut index.disease_to_drugs, drugs, DRUG_COLUMNS);

        index
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    pub fn disease_count(&self) -> usize {
        self.disease_names.len()
    }

    /// Resolve a disease name to an index key.
    ///
    /// Exact normalized match first; then the first known name (in
    /// lexicographic order) that contains, or is contained in, the query.
    /// An unmatched query resolves to its own normalized form.
    pub fn match_key(&self, disease_name: &str) -> String {
        let normalized = normalize(disease_name);
        if self.disease_names.contains(&normalized) {
            return normalized;
        }
        self.disease_names
            .iter()
            .find(|known| {
                !known.is_empty()
                    && (normalized.contains(known.as_str()) || known.contains(normalized.as_str()))
            })
            .cloned()
            .unwrap_or(normalized)
    }

    pub fn retrieve(&self, disease_name: &str) -> KnowledgeMatch {
        let key = self.match_key(disease_name);
        let sorted = |map: &HashMap<String, BTreeSet<String>>| -> Vec<String> {
            map.get(&key)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default()
        };

        KnowledgeMatch {
            tests: sorted(&self.disease_to_tests),
            measurements: sorted(&self.disease_to_measurements),
            drugs: sorted(&self.disease_to_drugs),
        }
    }
}

/// Add each row's named item under its (possibly empty) disease key.
fn accumulate(
    target: &mut HashMap<String, BTreeSet<String>>,
    table: &CsvTable,
    item_columns: &[&str],
) {
    let disease_col = table.guess_column(DISEASE_COLUMNS);
    let item_col = table.guess_column(item_columns);

    for record in &table.records {
        let Some(item) = CsvTable::value(record, item_col) else {
            continue;
        };
        let key = CsvTable::value(record, disease_col)
            .map(normalize)
            .unwrap_or_default();
        target.entry(key).or_default().insert(item.to_string());
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
