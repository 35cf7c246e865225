use serde::{Deserialize, Serialize};

/// Risk classification of a regime label, consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegimeSeverity {
    Critical,
    Elevated,
    Benign,
    Unknown,
}

impl RegimeSeverity {
    /// Classifies a raw regime label into a severity bucket.
    pub fn from_label(label: &str) -> Self {
        match label {
            "SYSTEMIC_STRESS" => RegimeSeverity::Critical,
            "POSITIONING_FRICTION" => RegimeSeverity::Elevated,
            "GROWTH_EXPANSION" => RegimeSeverity::Benign,
            _ => RegimeSeverity::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvictionBand {
    Strong,
    Moderate,
    Weak,
}

impl ConvictionBand {
    /// Bands a 0..=4 conviction score for display emphasis.
    pub fn from_score(conviction: u8) -> Self {
        if conviction >= 3 {
            ConvictionBand::Strong
        } else if conviction == 2 {
            ConvictionBand::Moderate
        } else {
            ConvictionBand::Weak
        }
    }
}
