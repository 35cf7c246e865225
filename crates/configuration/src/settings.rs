use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub scanner: ScannerConfig,
}

/// Connection parameters for the remote analysis bridge.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Base URL of the bridge worker (no trailing slash). The `/analyze`
    /// route is appended by the client.
    pub url: String,
    /// Hard deadline for one analysis round-trip. The bridge itself never
    /// enforces one, so the client must.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Local scanner behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Instrument scanned when the caller does not name one (e.g. "USDJPY=X").
    pub default_instrument: String,
    /// Location of the persisted scan history file.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_history_path() -> PathBuf {
    PathBuf::from("sentinel_history.json")
}
