//! Config and store resolution shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradepace_core::error::EditError;
use gradepace_core::model::ProgressState;
use gradepace_core::traits::ProgressStore;
use gradepace_store::{create_store, load_config_from, GradepaceConfig};

/// Resolved configuration plus the store it points at.
pub struct Session {
    pub config: GradepaceConfig,
    store: Box<dyn ProgressStore>,
}

impl Session {
    /// Load config, letting `--state` override the configured state file.
    pub fn open(config_path: Option<&Path>, state: Option<PathBuf>) -> Result<Self> {
        let mut config = load_config_from(config_path)?;
        if let Some(state) = state {
            config.state_file = state;
        }
        let store = create_store(&config);
        tracing::debug!(store = store.name(), "opened session");
        Ok(Self { config, store })
    }

    pub fn state_file(&self) -> &Path {
        &self.config.state_file
    }

    pub fn load(&self) -> Result<ProgressState> {
        self.store.load()
    }

    pub fn save(&self, state: &ProgressState) -> Result<()> {
        self.store.save(state)
    }

    /// Load, apply one edit, and save the result.
    pub fn update<F>(&self, edit: F) -> Result<ProgressState>
    where
        F: FnOnce(&ProgressState) -> Result<ProgressState, EditError>,
    {
        let state = self.load()?;
        let next = edit(&state)?;
        self.save(&next)
            .with_context(|| format!("failed to save {}", self.store.name()))?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use gradepace_core::edit::ScorePolicy;
    use gradepace_store::MemoryStore;

    struct Shared(Arc<MemoryStore>);

    impl ProgressStore for Shared {
        fn name(&self) -> &str {
            self.0.name()
        }
        fn load(&self) -> Result<ProgressState> {
            self.0.load()
        }
        fn save(&self, state: &ProgressState) -> Result<()> {
            self.0.save(state)
        }
    }

    fn session(store: &Arc<MemoryStore>) -> Session {
        Session {
            config: GradepaceConfig::default(),
            store: Box::new(Shared(Arc::clone(store))),
        }
    }

    #[test]
    fn update_saves_the_edited_snapshot() {
        let store = Arc::new(MemoryStore::default());
        let session = session(&store);

        let next = session
            .update(|s| s.with_score("Subject 1", "CIA1", Some(10.0), ScorePolicy::default()))
            .unwrap();

        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load().unwrap(), next);
    }

    #[test]
    fn rejected_edit_saves_nothing() {
        let store = Arc::new(MemoryStore::default());
        let session = session(&store);

        let err = session.update(|s| s.with_target(83)).unwrap_err();
        assert!(err.to_string().contains("83"));
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.load().unwrap(), ProgressState::fresh());
    }
}
