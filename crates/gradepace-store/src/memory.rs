//! In-memory store for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::Result;

use gradepace_core::model::ProgressState;
use gradepace_core::traits::ProgressStore;

/// Holds a single snapshot in memory and counts saves.
pub struct MemoryStore {
    state: Mutex<ProgressState>,
    save_count: AtomicU32,
}

impl MemoryStore {
    pub fn new(state: ProgressState) -> Self {
        Self {
            state: Mutex::new(state),
            save_count: AtomicU32::new(0),
        }
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(ProgressState::fresh())
    }
}

impl ProgressStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<ProgressState> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(state.clone())
    }

    fn save(&self, state: &ProgressState) -> Result<()> {
        let mut slot = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        *slot = state.clone();
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_edit_save_replaces_whole_snapshot() {
        let store = MemoryStore::default();
        let before = store.load().unwrap();
        let after = before.add_subject("Chemistry").unwrap();

        store.save(&after).unwrap();
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load().unwrap().subjects.len(), 2);
        assert_eq!(before.subjects.len(), 1);
    }
}
