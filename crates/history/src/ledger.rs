use core_types::HistoryEntry;

/// Maximum number of scans the rolling history retains.
pub const HISTORY_CAPACITY: usize = 5;

/// The bounded, most-recent-first log of past scan outcomes.
///
/// `entries()[0]` is always the latest scan. Appending beyond capacity
/// evicts the oldest (last) entry. Entries themselves are immutable; the
/// only mutation this type allows is the append itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<HistoryEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from previously persisted rows, enforcing the
    /// capacity bound on whatever was stored.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    /// Prepends `entry` as the newest row and evicts the oldest beyond
    /// capacity.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// The rows, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(instrument: &str) -> HistoryEntry {
        HistoryEntry {
            time: "09:30".to_string(),
            instrument: instrument.to_string(),
            regime: "GROWTH_EXPANSION".to_string(),
            conviction: 2,
        }
    }

    #[test]
    fn append_prepends_newest_first() {
        let mut ledger = Ledger::new();
        ledger.append(entry("A"));
        ledger.append(entry("B"));
        assert_eq!(ledger.entries()[0].instrument, "B");
        assert_eq!(ledger.entries()[1].instrument, "A");
    }

    #[test]
    fn sixth_append_evicts_exactly_the_oldest() {
        let mut ledger = Ledger::new();
        for name in ["A", "B", "C", "D", "E", "F"] {
            ledger.append(entry(name));
        }
        assert_eq!(ledger.len(), HISTORY_CAPACITY);
        let order: Vec<&str> = ledger
            .entries()
            .iter()
            .map(|e| e.instrument.as_str())
            .collect();
        assert_eq!(order, vec!["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn from_entries_enforces_capacity() {
        let stored: Vec<HistoryEntry> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|n| entry(n))
            .collect();
        let ledger = Ledger::from_entries(stored);
        assert_eq!(ledger.len(), HISTORY_CAPACITY);
        assert_eq!(ledger.entries()[0].instrument, "A");
    }
}
