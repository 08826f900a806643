//! Process-wide read-only state shared by every request.
//!
//! Built once at startup and wrapped in `Arc`. Nothing here is mutated
//! while serving, so request handlers need no locking.

use std::sync::Arc;

use crate::config;
use crate::knowledge::KnowledgeBaseIndex;
use crate::pipeline::encoder::{load_default_encoder, TextEncoder};
use crate::pipeline::DiagnosisPipeline;

pub struct CoreState {
    encoder: Arc<dyn TextEncoder>,
    /// `None` when no CSV knowledge base was configured.
    knowledge: Option<KnowledgeBaseIndex>,
}

impl CoreState {
    pub fn new(encoder: Arc<dyn TextEncoder>, knowledge: Option<KnowledgeBaseIndex>) -> Self {
        Self { encoder, knowledge }
    }

    /// Load the encoder and knowledge index from the configured locations.
    /// Never fails: each collaborator degrades on its own.
    pub fn from_config() -> Self {
        let encoder = load_default_encoder(&config::encoder_model_dir());
        let data_dir = config::knowledge_data_dir();
        let knowledge = KnowledgeBaseIndex::load(&data_dir);
        tracing::info!(dir = %data_dir.display(), "Data-backed guideline retrieval enabled");
        Self::new(encoder, Some(knowledge))
    }

    pub fn encoder(&self) -> &dyn TextEncoder {
        self.encoder.as_ref()
    }

    pub fn knowledge(&self) -> Option<&KnowledgeBaseIndex> {
        self.knowledge.as_ref()
    }

    /// Pipeline borrowing this state for one request.
    pub fn pipeline(&self) -> DiagnosisPipeline<'_> {
        DiagnosisPipeline::new(self.encoder(), self.knowledge())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientRecord;
    use crate::pipeline::encoder::{MockEncoder, UnavailableEncoder};

    #[test]
    fn pipeline_uses_injected_encoder() {
        let core = CoreState::new(Arc::new(UnavailableEncoder::new("test")), None);
        let patient = PatientRecord {
            clinical_notes: Some("cardiac history".into()),
            ..PatientRecord::new(40, "Female")
        };
        let report = core.pipeline().run(&patient);
        assert_eq!(report.text_analysis.confidence, 0.6);
    }

    #[test]
    fn knowledge_is_optional() {
        let core = CoreState::new(Arc::new(MockEncoder::new()), None);
        assert!(core.knowledge().is_none());
        assert!(core.encoder().is_available());

        let with_kb = CoreState::new(
            Arc::new(MockEncoder::new()),
            Some(KnowledgeBaseIndex::default()),
        );
        assert_eq!(with_kb.knowledge().map(|k| k.disease_count()), Some(0));
    }
}
