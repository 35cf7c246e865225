use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to write history file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize history: {0}")]
    Serialization(#[from] serde_json::Error),
}
