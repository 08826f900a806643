//! Shared types for the HTTP layer.

use std::sync::Arc;

use serde::Serialize;

use crate::core_state::CoreState;

pub const STATUS_LOADED: &str = "loaded";
pub const STATUS_UNAVAILABLE: &str = "unavailable";

/// Shared context for all routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }

    pub fn encoder_status(&self) -> &'static str {
        if self.core.encoder().is_available() {
            STATUS_LOADED
        } else {
            STATUS_UNAVAILABLE
        }
    }

    pub fn knowledge_status(&self) -> &'static str {
        if self.core.knowledge().is_some() {
            STATUS_LOADED
        } else {
            STATUS_UNAVAILABLE
        }
    }
}

/// Load state of each analysis subsystem, keyed the way the web client expects.
#[derive(Debug, Serialize)]
pub struct SubsystemStatuses<T> {
    pub clinical_bert: T,
    pub xgboost: T,
    pub rag_system: T,
}
