//! Read-only clinical knowledge: static tables, disease taxonomy and the
//! optional CSV-backed index. Everything here is built before the first
//! request and never mutated afterwards.

pub mod csv_index;
pub mod tables;
pub mod taxonomy;

use std::path::PathBuf;

use thiserror::Error;

pub use csv_index::{KnowledgeBaseIndex, KnowledgeMatch};
pub use taxonomy::TaxonomyLevels;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("CSV error in {}: {}", .0.display(), .1)]
    Csv(PathBuf, csv::Error),
}
