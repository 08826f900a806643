use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthSync";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the directory holding the optional CSV knowledge sources.
pub const DATA_DIR_ENV: &str = "HEALTHSYNC_DATA_DIR";
/// Overrides the ONNX text encoder directory.
pub const MODEL_DIR_ENV: &str = "HEALTHSYNC_MODEL_DIR";
/// Overrides the HTTP bind address.
pub const ADDR_ENV: &str = "HEALTHSYNC_ADDR";

pub const DEFAULT_DATA_DIR: &str = "data/output_data";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Clinical notes are truncated to this many tokens before encoding.
pub const MAX_SEQUENCE_TOKENS: usize = 512;

/// Identifier reported for the clinical text model.
pub const TEXT_MODEL_ID: &str = "medicalai/ClinicalBERT";

/// Tracing filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "healthsync=debug,tower_http=debug"
    } else {
        "healthsync=info"
    }
}

/// Get the application data directory
/// ~/HealthSync/ on all platforms
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Directory containing the CSV knowledge sources.
/// `HEALTHSYNC_DATA_DIR` wins; otherwise `data/output_data` under the working directory.
pub fn knowledge_data_dir() -> PathBuf {
    resolve_data_dir(std::env::var(DATA_DIR_ENV).ok())
}

fn resolve_data_dir(env_value: Option<String>) -> PathBuf {
    match env_value {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

/// Get the text encoder model directory (ClinicalBERT exported to ONNX).
pub fn encoder_model_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(MODEL_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    app_data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("models")
        .join("clinical-bert")
}

/// HTTP bind address. An unparsable `HEALTHSYNC_ADDR` falls back to the default.
pub fn bind_addr() -> SocketAddr {
    resolve_addr(std::env::var(ADDR_ENV).ok())
}

fn resolve_addr(env_value: Option<String>) -> SocketAddr {
    let default: SocketAddr = ([0, 0, 0, 0], 8000).into();
    match env_value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!(value = %raw, error = %e, "Invalid {ADDR_ENV}, using {DEFAULT_ADDR}");
            default
        }),
        None => default,
    }
}
