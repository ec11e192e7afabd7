use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::matching::ImportError;

/// Failures surfaced by the CLI and embedding callers. The scoring engines
/// themselves are total once configured; everything here happens at the
/// boundary (startup, file intake).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("listing import error: {0}")]
    Import(#[from] ImportError),
    #[error("invalid input file {path}")]
    InvalidInput {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
