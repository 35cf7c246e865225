use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The normalized structured classification block of a bridge report.
///
/// The bridge has shipped two generations of field names for the same
/// concepts; by the time a `Scorecard` exists both have been folded into
/// this one schema. Every field is optional because reports differ by
/// mode and the bridge makes no completeness promises.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Categorical regime label (e.g. "GROWTH_EXPANSION").
    pub regime: Option<String>,
    /// Raw conviction score as reported, before clamping/derivation.
    pub conviction: Option<i64>,
    /// Raw sovereign stress gauge as reported.
    pub stress: Option<i64>,
    /// Data completeness percentage for the underlying model run.
    pub completeness: Option<i64>,
    /// Cross-factor alignment percentage.
    pub alignment: Option<i64>,
    pub velocity: Option<f64>,
    pub elasticity: Option<f64>,
    pub beta: Option<f64>,
}

/// A bridge analysis response after wire normalization.
///
/// Exactly one of the narrative (tagged free text) or the scorecard is
/// authoritative per report shape; consumers must tolerate either being
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReport {
    /// Free narrative. May embed line-delimited tagged fields
    /// ("REGIME: ...", "ALPHA: ...").
    pub analysis: Option<String>,
    /// Structured numeric/categorical metrics (price, volatility index,
    /// curve spread...). Keys vary by mode; values are never interpreted,
    /// only displayed verbatim.
    pub metrics: Map<String, Value>,
    pub scorecard: Scorecard,
}

/// Normalized conviction/stress pair produced by the score deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedScores {
    /// Clamped conviction, always within 0..=4.
    pub conviction: u8,
    /// Clamped stress gauge; `None` when the report carried no stress field.
    pub stress: Option<u8>,
}

impl DerivedScores {
    /// Stress with the absent case collapsed to zero, for arithmetic and
    /// history purposes.
    pub fn stress_or_zero(&self) -> u8 {
        self.stress.unwrap_or(0)
    }
}

/// The fully-digested outcome of one scan, retained as the current report
/// for display and audit-string generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeReport {
    pub scan_id: Uuid,
    /// The scanned identifier, uppercased.
    pub instrument: String,
    pub mode: Option<String>,
    pub regime: String,
    pub scores: DerivedScores,
    /// Trade-idea one-liner pulled from the narrative, when present.
    pub alpha: Option<String>,
    pub completeness: Option<i64>,
    pub alignment: Option<i64>,
    pub analysis: Option<String>,
    pub metrics: Map<String, Value>,
    pub scanned_at: DateTime<Utc>,
}

impl RegimeReport {
    pub fn severity(&self) -> crate::RegimeSeverity {
        crate::RegimeSeverity::from_label(&self.regime)
    }

    pub fn conviction_band(&self) -> crate::ConvictionBand {
        crate::ConvictionBand::from_score(self.scores.conviction)
    }
}

/// One row of the rolling scan history. Created once per successful scan,
/// never mutated afterwards; leaves the ledger only by eviction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Wall-clock completion time, "HH:MM".
    pub time: String,
    pub instrument: String,
    pub regime: String,
    pub conviction: u8,
}
