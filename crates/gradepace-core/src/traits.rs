//! Persistence port.
//!
//! The projection functions never touch storage. Outer layers load a
//! snapshot through this trait, derive figures from it, and save the next
//! snapshot produced by an edit. Implemented by the `gradepace-store` crate.

use crate::model::ProgressState;

/// A place snapshots are loaded from and saved to.
pub trait ProgressStore: Send + Sync {
    /// Human-readable store name (e.g. the backing file path).
    fn name(&self) -> &str;

    /// Load the current snapshot.
    fn load(&self) -> anyhow::Result<ProgressState>;

    /// Replace the stored snapshot with `state`.
    fn save(&self, state: &ProgressState) -> anyhow::Result<()>;
}
