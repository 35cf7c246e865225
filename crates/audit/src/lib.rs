use core_types::RegimeReport;
use serde_json::{Map, Value};

/// Static instruction block appended to every audit string. The audit
/// output is pasted downstream in front of a human or an LLM; this suffix
/// tells the reader what to do with the numbers above it.
pub const PROMPT_SUFFIX: &str = "\
Context: the snapshot above was produced by an automated macro regime scan.
Cross-check the regime call and conviction against current market conditions
before acting on it, and flag any disagreement explicitly.";

/// Metric keys lifted into the audit block, first spelling wins. Everything
/// else in the metrics map stays out of the template.
const METRIC_ROWS: &[(&str, &[&str])] = &[
    ("PRICE", &["price", "spot"]),
    ("VIX", &["vix", "volatility_index"]),
    ("CURVE SPREAD", &["curve_spread", "yield_curve_spread"]),
];

/// Renders the fixed multi-line audit template for the current report.
///
/// Callers guarantee a loaded report; rows whose source field is absent are
/// omitted rather than filled with placeholders, so the output stays
/// copy/paste-clean.
pub fn render(report: &RegimeReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== SENTINEL AUDIT :: {} ===\n", report.instrument));
    out.push_str(&format!("REGIME: {}\n", report.regime));
    out.push_str(&format!("CONVICTION: {}/4\n", report.scores.conviction));

    if let Some(stress) = report.scores.stress {
        out.push_str(&format!("KENYA SOVEREIGN STRESS: {}/4\n", stress));
    }
    if let Some(completeness) = report.completeness {
        out.push_str(&format!("INTEGRITY: {}%\n", completeness));
    }
    if let Some(alignment) = report.alignment {
        out.push_str(&format!("ALIGNMENT: {}%\n", alignment));
    }

    for (label, keys) in METRIC_ROWS {
        if let Some(value) = metric_display(&report.metrics, keys) {
            out.push_str(&format!("{}: {}\n", label, value));
        }
    }

    if let Some(alpha) = &report.alpha {
        out.push_str(&format!("ALPHA: {}\n", alpha));
    }

    out.push('\n');
    out.push_str(PROMPT_SUFFIX);
    out
}

/// Copies a raw metric value verbatim into display form. Strings drop their
/// quotes, numbers keep their wire formatting, anything structured is
/// skipped.
fn metric_display(metrics: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let value = keys.iter().find_map(|k| metrics.get(*k))?;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
