use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Scan failed: {0}")]
    Bridge(#[from] bridge_client::error::BridgeError),
}
