pub mod encoder;
pub mod fusion;
pub mod guidelines;
pub mod orchestrator;
pub mod risk;
pub mod text_analyzer;
pub mod types;

use std::path::PathBuf;

use thiserror::Error;

pub use orchestrator::DiagnosisPipeline;
pub use types::*;

#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("Model files not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Text encoder unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Analysis worker failed: {0}")]
    Worker(String),
}
