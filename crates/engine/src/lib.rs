use crate::error::EngineError;
use bridge_client::AnalysisBridge;
use chrono::{Local, Utc};
use core_types::{HistoryEntry, RawReport, RegimeReport};
use history::{Ledger, LedgerStore};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

/// Lifecycle of the most recent scan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Idle,
    Scanning,
    Loaded,
    Failed,
}

/// The central orchestrator for one scanning session.
///
/// Owns the current report, the rolling history and the bridge boundary.
/// `scan` takes `&mut self`, so one engine admits exactly one in-flight
/// scan; there is no cross-scan racing to reconcile.
pub struct ScanEngine {
    // --- Shared Components ---
    bridge: Arc<dyn AnalysisBridge>,
    store: LedgerStore,

    // --- Session State ---
    ledger: Ledger,
    status: ScanStatus,
    current: Option<RegimeReport>,
    last_error: Option<String>,
}

impl ScanEngine {
    /// Creates an engine and rehydrates the scan history from disk. A
    /// missing or corrupt history file simply starts the session empty.
    pub fn new(bridge: Arc<dyn AnalysisBridge>, store: LedgerStore) -> Self {
        let ledger = store.load();
        if !ledger.is_empty() {
            tracing::info!(entries = ledger.len(), "restored scan history");
        }
        Self {
            bridge,
            store,
            ledger,
            status: ScanStatus::Idle,
            current: None,
            last_error: None,
        }
    }

    /// Drives one end-to-end scan: bridge call, score derivation, history
    /// append + persist, current-report update.
    ///
    /// On failure the previous report and the history stay untouched, the
    /// error message is retained for display, and the caller decides
    /// whether to re-scan. No automatic retry.
    pub async fn scan(
        &mut self,
        instrument: &str,
        mode: Option<&str>,
    ) -> Result<RegimeReport, EngineError> {
        let instrument = instrument.trim().to_uppercase();
        let scan_id = Uuid::new_v4();
        self.status = ScanStatus::Scanning;
        tracing::info!(%scan_id, instrument, ?mode, "starting scan");

        let raw = match self.bridge.analyze(&instrument, mode).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(%scan_id, error = %e, "scan failed");
                self.status = ScanStatus::Failed;
                self.last_error = Some(e.to_string());
                return Err(EngineError::Bridge(e));
            }
        };

        let report = digest(scan_id, instrument, mode, raw);

        // History append and persist form one transaction: the in-memory
        // ledger and the stored array must not diverge past this scan.
        self.ledger.append(HistoryEntry {
            time: Local::now().format("%H:%M").to_string(),
            instrument: report.instrument.clone(),
            regime: report.regime.clone(),
            conviction: report.scores.conviction,
        });
        if let Err(e) = self.store.persist(&self.ledger) {
            // Losing a history write degrades gracefully; the scan itself
            // still succeeded.
            tracing::warn!(%scan_id, error = %e, "failed to persist scan history");
        }

        self.status = ScanStatus::Loaded;
        self.last_error = None;
        self.current = Some(report.clone());
        tracing::info!(%scan_id, regime = %report.regime, conviction = report.scores.conviction, "scan loaded");
        Ok(report)
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    /// The latest successfully loaded report, if any. Survives failed
    /// scans untouched.
    pub fn current_report(&self) -> Option<&RegimeReport> {
        self.current.as_ref()
    }

    /// Display message for the most recent failure; cleared by the next
    /// successful scan.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

/// Folds a raw bridge response into the retained report form.
///
/// A scorecard that names the regime is authoritative; otherwise the report
/// is text-shaped and the display fields come out of the narrative tags.
/// The alpha one-liner only ever lives in the narrative.
fn digest(scan_id: Uuid, instrument: String, mode: Option<&str>, raw: RawReport) -> RegimeReport {
    let scores = analyzer::derive(&raw.scorecard);

    let regime = match &raw.scorecard.regime {
        Some(label) => label.clone(),
        None => analyzer::extract(raw.analysis.as_deref(), "REGIME"),
    };

    let alpha = match analyzer::extract(raw.analysis.as_deref(), "ALPHA") {
        s if s == analyzer::MISSING => None,
        s => Some(s),
    };

    RegimeReport {
        scan_id,
        instrument,
        mode: mode.map(str::to_string),
        regime,
        scores,
        alpha,
        completeness: raw.scorecard.completeness,
        alignment: raw.scorecard.alignment,
        analysis: raw.analysis,
        metrics: raw.metrics,
        scanned_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_client::error::BridgeError;
    use bridge_client::responses::WireReport;
    use serde_json::json;
    use tempfile::tempdir;

    /// Bridge double that replays a canned outcome per call.
    struct MockBridge {
        outcomes: std::sync::Mutex<Vec<Result<RawReport, BridgeError>>>,
    }

    impl MockBridge {
        fn new(outcomes: Vec<Result<RawReport, BridgeError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: std::sync::Mutex::new(outcomes),
            })
        }
    }

    #[async_trait]
    impl AnalysisBridge for MockBridge {
        async fn analyze(
            &self,
            _instrument: &str,
            _mode: Option<&str>,
        ) -> Result<RawReport, BridgeError> {
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn structured_report() -> RawReport {
        let wire: WireReport = serde_json::from_value(json!({
            "analysis": "ALPHA: buy dips",
            "metrics": { "vix": 14.2 },
            "scorecard": {
                "regime": "GROWTH_EXPANSION",
                "conviction": 3,
                "kenya_stress": 1,
                "completeness": 92,
                "alignment": 88
            }
        }))
        .unwrap();
        wire.normalize()
    }

    fn text_report() -> RawReport {
        let wire: WireReport = serde_json::from_value(json!({
            "freeText": "REGIME: POSITIONING_FRICTION\nALPHA: fade rallies"
        }))
        .unwrap();
        wire.normalize()
    }

    fn engine_with(
        outcomes: Vec<Result<RawReport, BridgeError>>,
        dir: &std::path::Path,
    ) -> ScanEngine {
        let store = LedgerStore::new(dir.join("history.json"));
        ScanEngine::new(MockBridge::new(outcomes), store)
    }

    #[tokio::test]
    async fn successful_scan_loads_report_and_appends_history() {
        let dir = tempdir().unwrap();
        let mut engine = engine_with(vec![Ok(structured_report())], dir.path());

        let report = engine.scan("usdjpy=x", None).await.unwrap();

        assert_eq!(report.instrument, "USDJPY=X");
        assert_eq!(report.regime, "GROWTH_EXPANSION");
        assert_eq!(report.scores.conviction, 2); // 3 - 1
        assert_eq!(report.scores.stress, Some(1));
        assert_eq!(report.alpha.as_deref(), Some("buy dips"));

        assert_eq!(engine.status(), ScanStatus::Loaded);
        assert_eq!(engine.ledger().len(), 1);
        assert_eq!(engine.ledger().entries()[0].conviction, 2);

        // The append was persisted in the same transaction.
        let reloaded = LedgerStore::new(dir.path().join("history.json")).load();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].instrument, "USDJPY=X");
    }

    #[tokio::test]
    async fn text_shaped_report_digests_via_tags() {
        let dir = tempdir().unwrap();
        let mut engine = engine_with(vec![Ok(text_report())], dir.path());

        let report = engine.scan("EURUSD=X", None).await.unwrap();

        assert_eq!(report.regime, "POSITIONING_FRICTION");
        assert_eq!(report.alpha.as_deref(), Some("fade rallies"));
        // No scorecard: conviction bottoms out rather than erroring.
        assert_eq!(report.scores.conviction, 0);
        assert_eq!(report.scores.stress, None);
    }

    #[tokio::test]
    async fn failed_scan_keeps_previous_report_and_history() {
        let dir = tempdir().unwrap();
        let mut engine = engine_with(
            vec![
                Ok(structured_report()),
                Err(BridgeError::Bridge("upstream exploded".to_string())),
            ],
            dir.path(),
        );

        engine.scan("USDJPY=X", None).await.unwrap();
        let err = engine.scan("USDJPY=X", None).await.unwrap_err();

        assert!(err.to_string().contains("upstream exploded"));
        assert_eq!(engine.status(), ScanStatus::Failed);
        assert!(engine.last_error().unwrap().contains("upstream exploded"));

        // Previous loaded state is untouched.
        let current = engine.current_report().unwrap();
        assert_eq!(current.regime, "GROWTH_EXPANSION");
        assert_eq!(engine.ledger().len(), 1);

        let reloaded = LedgerStore::new(dir.path().join("history.json")).load();
        assert_eq!(reloaded.len(), 1);
    }

    #[tokio::test]
    async fn next_successful_scan_clears_the_error() {
        let dir = tempdir().unwrap();
        let mut engine = engine_with(
            vec![
                Err(BridgeError::Bridge("down".to_string())),
                Ok(structured_report()),
            ],
            dir.path(),
        );

        assert!(engine.scan("USDJPY=X", None).await.is_err());
        assert!(engine.last_error().is_some());

        engine.scan("USDJPY=X", None).await.unwrap();
        assert_eq!(engine.status(), ScanStatus::Loaded);
        assert_eq!(engine.last_error(), None);
    }

    #[tokio::test]
    async fn history_rehydrates_across_engine_restarts() {
        let dir = tempdir().unwrap();

        let mut engine = engine_with(vec![Ok(structured_report())], dir.path());
        engine.scan("USDJPY=X", None).await.unwrap();
        drop(engine);

        let engine = engine_with(vec![], dir.path());
        assert_eq!(engine.ledger().len(), 1);
        assert_eq!(engine.status(), ScanStatus::Idle);
        assert!(engine.current_report().is_none());
    }
}
