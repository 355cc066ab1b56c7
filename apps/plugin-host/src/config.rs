//! Plugin host configuration
//!
//! Configuration is layered: built-in defaults, then the user file at
//! `~/.glide/plugin-host.jsonc`, then an explicitly supplied file. Files are
//! JSONC (JSON with comments) and later layers deep-merge over earlier ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{HostError, Result};

const CONFIG_FILENAME: &str = "plugin-host.jsonc";
const GLIDE_DIR: &str = ".glide";
const DEFAULT_BUILTIN_DIR: &str = "extensions";

/// Settings for one plugin host process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    /// Directory holding the extensions bundled with the editor
    pub builtin_extensions_path: PathBuf,
    /// Directory of user-installed extensions, if one is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_extensions_path: Option<PathBuf>,
    /// Extension under development, loaded with the highest precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_extension_path: Option<PathBuf>,
    /// Root of the open workspace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,
    /// Root handed to the test runner after startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_tests_path: Option<PathBuf>,
    /// Kind of test runner to look up (e.g. "rust")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_runner: Option<String>,
    /// Tracing filter directives, overridden by `RUST_LOG`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            builtin_extensions_path: PathBuf::from(DEFAULT_BUILTIN_DIR),
            user_extensions_path: default_user_extensions_path(),
            development_extension_path: None,
            workspace_root: None,
            extension_tests_path: None,
            test_runner: None,
            log_filter: None,
        }
    }
}

impl HostConfig {
    /// Load defaults, then the user file, then `explicit` when given
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut layers = Vec::new();
        if let Some(user_path) = user_config_path() {
            layers.push(user_path);
        }
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(HostError::config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            layers.push(path.to_path_buf());
        }
        Self::load_layers(&layers)
    }

    /// Deep-merge the given files, in order, over the defaults
    ///
    /// Missing files are skipped.
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self> {
        let mut merged = serde_json::to_value(Self::default())?;

        for path in paths {
            let layer = read_config_file(path)?;
            debug!("Loaded plugin host config layer from {:?}", path);
            deep_merge(&mut merged, &layer);
        }

        serde_json::from_value(merged)
            .map_err(|e| HostError::config(format!("Invalid plugin host config: {}", e)))
    }

    /// Whether the host should run extension tests after startup
    pub fn runs_extension_tests(&self) -> bool {
        self.extension_tests_path.is_some()
    }
}

/// Default location for user-installed extensions (`~/.glide/extensions`)
fn default_user_extensions_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(GLIDE_DIR).join(DEFAULT_BUILTIN_DIR))
}

/// Get the path to the user-level config file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(GLIDE_DIR).join(CONFIG_FILENAME))
}

/// Parse a JSONC string into a Value
fn parse_jsonc(content: &str) -> Result<Value> {
    let stripped = json_comments::StripComments::new(content.as_bytes());
    serde_json::from_reader(stripped)
        .map_err(|e| HostError::config(format!("Failed to parse JSONC: {}", e)))
}

/// Read a config file; absent or blank files are an empty layer
fn read_config_file(path: &Path) -> Result<Value> {
    if !path.exists() {
        debug!("Config file does not exist: {:?}", path);
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    parse_jsonc(&content)
}

/// Deep merge two JSON values (source into target)
fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(key) {
                    Some(target_value) => deep_merge(target_value, source_value),
                    None => {
                        target_map.insert(key.clone(), source_value.clone());
                    }
                }
            }
        }
        (target, source) => {
            *target = source.clone();
        }
    }
}

// Home directory lookup through the directories crate
mod dirs {
    use std::path::PathBuf;

    pub fn home_dir() -> Option<PathBuf> {
        directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}
