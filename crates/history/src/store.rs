use crate::error::HistoryError;
use crate::ledger::Ledger;
use core_types::HistoryEntry;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable storage for the ledger: one JSON array of entries at a fixed
/// path, overwritten in full after every successful scan.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reconstructs the ledger from disk at process start.
    ///
    /// A missing file, unreadable file, or unparseable payload all yield an
    /// empty ledger. Stored history is a convenience, not a contract, so
    /// none of these are surfaced as errors.
    pub fn load(&self) -> Ledger {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no prior history");
                return Ledger::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => Ledger::from_entries(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "stored history is unparseable, starting empty"
                );
                Ledger::new()
            }
        }
    }

    /// Serializes the full current ledger to disk, replacing any prior
    /// value. Writes to a sibling temp file first and renames it into
    /// place so a crash mid-write cannot corrupt the stored array.
    pub fn persist(&self, ledger: &Ledger) -> Result<(), HistoryError> {
        let tmp = self.path.with_extension("json.tmp");
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let payload = serde_json::to_string_pretty(ledger.entries())?;
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn entry(instrument: &str, conviction: u8) -> HistoryEntry {
        HistoryEntry {
            time: "14:05".to_string(),
            instrument: instrument.to_string(),
            regime: "SYSTEMIC_STRESS".to_string(),
            conviction,
        }
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("history.json"));

        let mut ledger = Ledger::new();
        ledger.append(entry("EURUSD=X", 1));
        ledger.append(entry("USDJPY=X", 3));

        store.persist(&ledger).unwrap();
        assert_eq!(store.load(), ledger);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn unparseable_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();
        let store = LedgerStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn persist_overwrites_prior_value() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("history.json"));

        let mut first = Ledger::new();
        first.append(entry("GBPUSD=X", 2));
        store.persist(&first).unwrap();

        let mut second = Ledger::new();
        second.append(entry("USDKES=X", 4));
        store.persist(&second).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0].instrument, "USDKES=X");
    }

    #[test]
    fn oversized_stored_array_is_truncated_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let rows: Vec<HistoryEntry> = (0..9).map(|i| entry(&format!("I{i}"), 0)).collect();
        fs::write(&path, serde_json::to_string(&rows).unwrap()).unwrap();

        let loaded = LedgerStore::new(&path).load();
        assert_eq!(loaded.len(), crate::HISTORY_CAPACITY);
        assert_eq!(loaded.entries()[0].instrument, "I0");
    }
}
