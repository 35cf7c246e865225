// Declare the modules that make up this crate.
pub mod scores;
pub mod tags;

// Re-export the core functions to provide a clean public API.
pub use scores::derive;
pub use tags::{MISSING, extract};
