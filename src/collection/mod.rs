//! Player collection: dexes, review queue, stage clears, and persistence.

pub mod persistence;
pub mod types;

pub use types::*;
