use std::path::Path;
use std::sync::Arc;

use super::EncoderError;

/// Hidden size of ClinicalBERT (BERT-base).
pub const CLINICAL_BERT_DIM: usize = 768;

/// Opaque clinical text encoder. Only success/failure and the vector
/// length are consumed by the analyzer.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError>;
    fn dimension(&self) -> usize;
    /// Model identifier reported by `/models/status`.
    fn name(&self) -> &str;
    fn is_available(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════
// ONNX encoder (`onnx-embeddings` feature)
// ═══════════════════════════════════════════════════════════

#[cfg(feature = "onnx-embeddings")]
mod onnx {
    use super::{EncoderError, TextEncoder, CLINICAL_BERT_DIM};
    use crate::config::{MAX_SEQUENCE_TOKENS, TEXT_MODEL_ID};
    use ort::session::Session;
    use std::path::Path;
    use std::sync::Mutex;

    /// ClinicalBERT exported to ONNX.
    ///
    /// Requires two files in the model directory:
    /// - `model.onnx`: the ONNX model weights
    /// - `tokenizer.json`: HuggingFace tokenizer definition
    ///
    /// `ort::Session::run` needs `&mut self`, hence the Mutex.
    pub struct OnnxEncoder {
        session: Mutex<Session>,
        tokenizer: tokenizers::Tokenizer,
    }

    impl OnnxEncoder {
        pub fn load(model_dir: &Path) -> Result<Self, EncoderError> {
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");

            if !model_path.exists() {
                return Err(EncoderError::ModelNotFound(model_path));
            }
            if !tokenizer_path.exists() {
                return Err(EncoderError::ModelNotFound(tokenizer_path));
            }

            let session = Session::builder()
                .map_err(|e: ort::Error| EncoderError::ModelInit(e.to_string()))?
                .with_intra_threads(2)
                .map_err(|e: ort::Error| EncoderError::ModelInit(e.to_string()))?
                .commit_from_file(&model_path)
                .map_err(|e: ort::Error| EncoderError::ModelInit(format!("ONNX load failed: {e}")))?;

            let mut tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| EncoderError::ModelInit(format!("Tokenizer load failed: {e}")))?;
            tokenizer
                .with_truncation(Some(tokenizers::TruncationParams {
                    max_length: MAX_SEQUENCE_TOKENS,
                    ..Default::default()
                }))
                .map_err(|e| EncoderError::ModelInit(format!("Truncation setup failed: {e}")))?;

            tracing::info!("ONNX text encoder loaded from {}", model_dir.display());

            Ok(Self {
                session: Mutex::new(session),
                tokenizer,
            })
        }

        /// Tokenize (truncated) and run inference, returning the [CLS] hidden state.
        fn infer(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
            use ort::value::TensorRef;

            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| EncoderError::Tokenization(e.to_string()))?;

            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();
            let token_type_ids: Vec<i64> = encoding
                .get_type_ids()
                .iter()
                .map(|&t| t as i64)
                .collect();

            let seq_len = input_ids.len();
            if seq_len == 0 {
                return Err(EncoderError::Tokenization("empty token sequence".into()));
            }

            let ids_array = ndarray::Array2::from_shape_vec((1, seq_len), input_ids)
                .map_err(|e| EncoderError::Inference(e.to_string()))?;
            let mask_array = ndarray::Array2::from_shape_vec((1, seq_len), attention_mask)
                .map_err(|e| EncoderError::Inference(e.to_string()))?;
            let type_array = ndarray::Array2::from_shape_vec((1, seq_len), token_type_ids)
                .map_err(|e| EncoderError::Inference(e.to_string()))?;

            let ids_tensor = TensorRef::from_array_view(&ids_array)
                .map_err(|e| EncoderError::Inference(e.to_string()))?;
            let mask_tensor = TensorRef::from_array_view(&mask_array)
                .map_err(|e| EncoderError::Inference(e.to_string()))?;
            let type_tensor = TensorRef::from_array_view(&type_array)
                .map_err(|e| EncoderError::Inference(e.to_string()))?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| EncoderError::Inference("Session lock poisoned".to_string()))?;

            let outputs = session
                .run(ort::inputs![ids_tensor, mask_tensor, type_tensor])
                .map_err(|e| EncoderError::Inference(format!("ONNX inference failed: {e}")))?;

            // last_hidden_state: [1, seq_len, hidden]
            let (shape, output_data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| EncoderError::Inference(format!("Output extraction: {e}")))?;

            if shape.len() != 3 || shape[1] < 1 || shape[2] as usize != CLINICAL_BERT_DIM {
                return Err(EncoderError::Inference(format!(
                    "Unexpected output shape: {shape:?}, expected [1, {seq_len}, {CLINICAL_BERT_DIM}]"
                )));
            }

            Ok(output_data[..CLINICAL_BERT_DIM].to_vec())
        }
    }

    impl TextEncoder for OnnxEncoder {
        fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
            self.infer(text)
        }

        fn dimension(&self) -> usize {
            CLINICAL_BERT_DIM
        }

        fn name(&self) -> &str {
            TEXT_MODEL_ID
        }
    }
}

#[cfg(feature = "onnx-embeddings")]
pub use onnx::OnnxEncoder;

// ═══════════════════════════════════════════════════════════
// Stand-ins
// ═══════════════════════════════════════════════════════════

/// Encoder used when no model could be loaded. Every call fails, so
/// the analyzer always takes its keyword fallback path.
pub struct UnavailableEncoder {
    reason: String,
}

impl UnavailableEncoder {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TextEncoder for UnavailableEncoder {
    fn encode(&self, _text: &str) -> Result<Vec<f32>, EncoderError> {
        Err(EncoderError::Unavailable(self.reason.clone()))
    }

    fn dimension(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Mock encoder for testing. Produces deterministic vectors.
pub struct MockEncoder {
    dimension: usize,
}

impl MockEncoder {
    pub fn new() -> Self {
        Self {
            dimension: CLINICAL_BERT_DIM,
        }
    }
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEncoder for MockEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        Ok(deterministic_vector(text, self.dimension))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "mock-encoder"
    }
}

/// Generate a deterministic unit vector from text.
fn deterministic_vector(text: &str, dim: usize) -> Vec<f32> {
    let mut vec = vec![0.0f32; dim];
    let bytes = text.as_bytes();

    for (i, slot) in vec.iter_mut().enumerate() {
        let byte_idx = i % bytes.len().max(1);
        *slot = (bytes.get(byte_idx).copied().unwrap_or(0) as f32 + i as f32) / 255.0;
    }

    // L2 normalize
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for val in &mut vec {
            *val /= norm;
        }
    }

    vec
}

/// Pick the production encoder: ONNX when compiled in and loadable,
/// otherwise an unavailable stand-in.
pub fn load_default_encoder(model_dir: &Path) -> Arc<dyn TextEncoder> {
    #[cfg(feature = "onnx-embeddings")]
    let loaded = OnnxEncoder::load(model_dir).map(|e| Arc::new(e) as Arc<dyn TextEncoder>);

    #[cfg(not(feature = "onnx-embeddings"))]
    let loaded: Result<Arc<dyn TextEncoder>, EncoderError> = Err(EncoderError::ModelInit(
        "built without the onnx-embeddings feature".into(),
    ));

    loaded.unwrap_or_else(|e| {
        tracing::warn!(
            dir = %model_dir.display(),
            error = %e,
            "Text encoder unavailable, keyword fallback will be used"
        );
        Arc::new(UnavailableEncoder::new(e.to_string()))
    })
}
