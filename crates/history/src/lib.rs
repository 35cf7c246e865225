// Declare the modules that make up this crate.
pub mod error;
pub mod ledger;
pub mod store;

// Re-export the core types to provide a clean public API.
pub use error::HistoryError;
pub use ledger::{HISTORY_CAPACITY, Ledger};
pub use store::LedgerStore;
