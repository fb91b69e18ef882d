//! JSON file store.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradepace_core::model::ProgressState;
use gradepace_core::traits::ProgressStore;
use gradepace_core::validate::check;

use crate::document::{decode_document, encode_document};

/// Stores the snapshot as a pretty-printed JSON document on disk.
///
/// A missing file loads as a fresh state. Saves go through a temporary file
/// in the same directory and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    name: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl ProgressStore for JsonFileStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<ProgressState> {
        if !self.path.exists() {
            tracing::info!("no state file at {}, starting fresh", self.path.display());
            return Ok(ProgressState::fresh());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read state from {}", self.path.display()))?;
        let decoded = decode_document(&content)
            .with_context(|| format!("failed to parse state file {}", self.path.display()))?;
        if decoded.migrated {
            tracing::info!(
                "migrated legacy state file {} onto the default template",
                self.path.display()
            );
        }
        check(&decoded.state)
            .with_context(|| format!("invalid state in {}", self.path.display()))?;

        tracing::debug!(
            subjects = decoded.state.subjects.len(),
            "loaded state from {}",
            self.path.display()
        );
        Ok(decoded.state)
    }

    fn save(&self, state: &ProgressState) -> Result<()> {
        check(state).context("refusing to save an invalid state")?;
        let json = encode_document(state).context("failed to serialize state")?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to write state to {}", self.path.display()))?;

        tracing::debug!("saved state to {}", self.path.display());
        Ok(())
    }
}
