//! Configuration loading and store factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradepace_core::edit::ScorePolicy;
use gradepace_core::reconcile::ReconcilePolicy;
use gradepace_core::traits::ProgressStore;

use crate::json::JsonFileStore;

/// Top-level gradepace configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradepaceConfig {
    /// Path of the JSON state file.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    /// Accept scores above an assessment's max.
    #[serde(default = "default_true")]
    pub allow_over_max: bool,
    /// How scores follow a replaced template.
    #[serde(default)]
    pub reconcile: ReconcilePolicy,
    /// Output directory for rendered reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./gradepace.json")
}
fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradepace-reports")
}

impl Default for GradepaceConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            allow_over_max: true,
            reconcile: ReconcilePolicy::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl GradepaceConfig {
    pub fn score_policy(&self) -> ScorePolicy {
        ScorePolicy {
            allow_over_max: self.allow_over_max,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradepace.toml` in the current directory
/// 2. `~/.config/gradepace/config.toml`
///
/// `GRADEPACE_STATE_FILE` overrides the configured state file.
pub fn load_config() -> Result<GradepaceConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradepaceConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("gradepace.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GradepaceConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradepaceConfig::default(),
    };

    if let Ok(state_file) = std::env::var("GRADEPACE_STATE_FILE") {
        config.state_file = PathBuf::from(state_file);
    }

    let resolved = resolve_env_vars(&config.state_file.to_string_lossy());
    config.state_file = PathBuf::from(resolved);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradepace"))
}

/// Create the store described by the configuration.
pub fn create_store(config: &GradepaceConfig) -> Box<dyn ProgressStore> {
    Box::new(JsonFileStore::new(config.state_file.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GRADEPACE_TEST_VAR", "terms");
        assert_eq!(resolve_env_vars("${_GRADEPACE_TEST_VAR}"), "terms");
        assert_eq!(
            resolve_env_vars("./${_GRADEPACE_TEST_VAR}/state.json"),
            "./terms/state.json"
        );
        assert_eq!(resolve_env_vars("no vars here"), "no vars here");
        std::env::remove_var("_GRADEPACE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = GradepaceConfig::default();
        assert_eq!(config.state_file, PathBuf::from("./gradepace.json"));
        assert!(config.allow_over_max);
        assert_eq!(config.reconcile, ReconcilePolicy::Name);
        assert!(config.score_policy().allow_over_max);
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
state_file = "terms/fall.json"
allow_over_max = false
reconcile = "position"
"#;
        let config: GradepaceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.state_file, PathBuf::from("terms/fall.json"));
        assert!(!config.allow_over_max);
        assert_eq!(config.reconcile, ReconcilePolicy::Position);
        assert_eq!(config.output_dir, PathBuf::from("./gradepace-reports"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradepace.toml");
        std::fs::write(&path, "reconcile = \"position\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.reconcile, ReconcilePolicy::Position);
    }
}
