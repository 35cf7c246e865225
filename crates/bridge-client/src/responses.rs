use core_types::{RawReport, Scorecard};
use serde::Deserialize;
use serde_json::{Map, Value};

/// The raw analysis response as it arrives off the wire.
///
/// The bridge has gone through two naming generations for the same
/// scorecard concepts (`conviction` vs `cvc`, `kenya_stress` vs `k_ssi`),
/// and numeric fields sometimes arrive as strings. Everything lands in
/// loose maps here and is folded into the one internal schema by
/// [`WireReport::normalize`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireReport {
    /// Free narrative; older bridge builds shipped it as `freeText`.
    #[serde(default, alias = "freeText", alias = "free_text")]
    pub analysis: Option<String>,
    #[serde(default)]
    pub metrics: Map<String, Value>,
    #[serde(default)]
    pub scorecard: Map<String, Value>,
}

impl WireReport {
    /// Folds both wire generations into the internal report schema.
    /// Individual fields that are absent or non-numeric become `None`;
    /// only a totally unparseable payload is an error, and that is
    /// rejected before this point.
    pub fn normalize(self) -> RawReport {
        let card = &self.scorecard;
        let scorecard = Scorecard {
            regime: str_field(card, &["regime"]),
            conviction: int_field(card, &["conviction", "cvc"]),
            stress: int_field(card, &["kenya_stress", "k_ssi"]),
            completeness: int_field(card, &["completeness"]),
            alignment: int_field(card, &["alignment"]),
            velocity: float_field(card, &["velocity"]),
            elasticity: float_field(card, &["elasticity"]),
            beta: float_field(card, &["beta"]),
        };

        RawReport {
            analysis: self.analysis,
            metrics: self.metrics,
            scorecard,
        }
    }
}

/// Represents an error response from the bridge.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeErrorResponse {
    pub error: String,
}

/// First present key wins; later keys are the legacy spellings.
fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k))
}

fn str_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match lookup(map, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn int_field(map: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    match lookup(map, keys)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn float_field(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    match lookup(map, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
