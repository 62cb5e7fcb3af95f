//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/branchtree/branchtree.toml`
//! 3. Local config: `<dir>/.branchtree.toml` (usually the working directory)
//! 4. Environment variables: `BRANCHTREE_*` prefix
//!
//! Command line flags are applied on top by the CLI.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::OrphanPolicy;
use crate::util::path::expand_env_vars;

/// Unified configuration for branchtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// TOML file holding the branch listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches_file: Option<PathBuf>,
    /// Root search matches the exact branch path (otherwise paths below a branch match too)
    pub exact_match: bool,
    /// Handling of branches whose parent is missing
    pub orphan_policy: OrphanPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            branches_file: None,
            exact_match: true,
            orphan_policy: OrphanPolicy::Drop,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub branches_file: Option<PathBuf>,
    pub exact_match: Option<bool>,
    pub orphan_policy: Option<OrphanPolicy>,
}

/// Get the XDG config directory for branchtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "branchtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("branchtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".branchtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(file) = &self.branches_file {
            let expanded = expand_env_vars(file.to_string_lossy().as_ref());
            self.branches_file = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            branches_file: overlay
                .branches_file
                .clone()
                .or_else(|| self.branches_file.clone()),
            exact_match: overlay.exact_match.unwrap_or(self.exact_match),
            orphan_policy: overlay.orphan_policy.unwrap_or(self.orphan_policy),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.branchtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local_dir, None)
    }

    /// Layered loading with explicit inputs.
    ///
    /// `env` replaces the process environment when given (used by tests).
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply BRANCHTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BRANCHTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("branches_file") {
            settings.branches_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("exact_match") {
            settings.exact_match = val;
        }
        if let Ok(val) = config.get_string("orphan_policy") {
            settings.orphan_policy = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("BRANCHTREE_ORPHAN_POLICY: {message}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# branchtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/branchtree/branchtree.toml
#   Local:  ./.branchtree.toml
#   Env:    BRANCHTREE_* environment variables

# Branch listing ([[branch]] tables with path, parent_path, is_root)
# branches_file = "~/branches.toml"

# Root search compares the exact branch path
# exact_match = true

# Branches whose parent is missing: "drop" or "promote"
# orphan_policy = "drop"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
