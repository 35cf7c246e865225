pub mod enums;
pub mod report;

// Re-export the core types to provide a clean public API.
pub use enums::{ConvictionBand, RegimeSeverity};
pub use report::{DerivedScores, HistoryEntry, RawReport, RegimeReport, Scorecard};
