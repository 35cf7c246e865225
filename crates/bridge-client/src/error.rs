use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to reach the analysis bridge: {0}")]
    Network(#[from] reqwest::Error),

    #[error("The bridge returned an error: {0}")]
    Bridge(String),

    #[error("Failed to deserialize the bridge response: {0}")]
    Deserialization(String),
}
