//! Errors raised at the edges of the engine
//!
//! Classification itself never fails; these cover configuration loading and
//! reading recorded touch traces.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to read trace {}: {source}", path.display())]
    TraceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed trace: {0}")]
    TraceFormat(#[from] serde_json::Error),
}

pub type Result<T, E = GestureError> = std::result::Result<T, E>;
