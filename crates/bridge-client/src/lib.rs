use crate::error::BridgeError;
use async_trait::async_trait;
use configuration::BridgeConfig;
use core_types::RawReport;
use serde::Serialize;
use std::time::Duration;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::{BridgeErrorResponse, WireReport};

/// The generic, abstract interface to the remote analysis bridge.
/// This trait is the contract the scan engine depends on, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait AnalysisBridge: Send + Sync {
    /// Requests a regime analysis for one instrument. `mode` is passed
    /// through opaquely; the bridge uses it to pick its report shape.
    async fn analyze(&self, instrument: &str, mode: Option<&str>)
    -> Result<RawReport, BridgeError>;
}

/// The JSON payload for the bridge `POST /analyze` endpoint.
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    instrument: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'a str>,
}

/// A concrete implementation of `AnalysisBridge` over HTTP.
#[derive(Clone)]
pub struct HttpBridge {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBridge {
    /// Builds a client against the configured bridge worker. The configured
    /// timeout is enforced here; the bridge side never enforces one.
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to build reqwest client"),
            base_url: config.url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AnalysisBridge for HttpBridge {
    async fn analyze(
        &self,
        instrument: &str,
        mode: Option<&str>,
    ) -> Result<RawReport, BridgeError> {
        let url = format!("{}/analyze", self.base_url);
        let payload = AnalyzeRequest { instrument, mode };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            let wire = serde_json::from_str::<WireReport>(&text)
                .map_err(|e| BridgeError::Deserialization(e.to_string()))?;
            Ok(wire.normalize())
        } else {
            // The bridge reports failures as `{"error": "..."}`; anything
            // else gets surfaced raw.
            match serde_json::from_str::<BridgeErrorResponse>(&text) {
                Ok(err) => Err(BridgeError::Bridge(err.error)),
                Err(_) => Err(BridgeError::Bridge(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    text
                ))),
            }
        }
    }
}
