//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/skeltree/skeltree.toml`
//! 3. Local config: `<dir>/.skeltree.toml` (usually the current directory)
//! 4. Environment variables: `SKELTREE_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::DEFAULT_MAX_DEPTH;
use crate::application::ApplicationError;

const GLOBAL_CONFIG_FILE: &str = "skeltree.toml";
const LOCAL_CONFIG_FILE: &str = ".skeltree.toml";

/// Defaults for the `tree` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Levels to descend (`1` = immediate children only)
    pub max_depth: i32,
    /// Show files as well as directories
    pub include_files: bool,
    /// Draw with plain ASCII instead of box-drawing characters
    pub ascii: bool,
    /// Glob patterns of names to leave out
    pub ignore: Vec<String>,
    /// Also save the rendered tree to this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            include_files: false,
            ascii: false,
            ignore: vec![],
            output: None,
        }
    }
}

/// Raw tree config for intermediate parsing (every field optional to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeConfig {
    pub max_depth: Option<i32>,
    pub include_files: Option<bool>,
    pub ascii: Option<bool>,
    pub ignore: Option<Vec<String>>,
    pub output: Option<PathBuf>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree: RawTreeConfig,
}

impl TreeConfig {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["*.pyc", ".git"], &["target"])  // → ["*.pyc", ".git", "target"]
    /// merge_array(&["*.pyc", ".git"], &["!.git"])   // → ["*.pyc"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: BTreeSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        result.into_iter().collect()
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - `ignore`: union merge with negation support (if overlay specified)
    pub fn merge(&self, overlay: &RawTreeConfig) -> Self {
        Self {
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            include_files: overlay.include_files.unwrap_or(self.include_files),
            ascii: overlay.ascii.unwrap_or(self.ascii),
            ignore: overlay
                .ignore
                .as_ref()
                .map(|o| Self::merge_array(&self.ignore, o))
                .unwrap_or_else(|| self.ignore.clone()),
            output: overlay.output.clone().or_else(|| self.output.clone()),
        }
    }

    /// Apply global config onto defaults.
    ///
    /// Unlike `merge()`, arrays use REPLACE semantics: a global `ignore` list
    /// is the baseline that local config then adds to.
    pub fn apply_global(&self, global: &RawTreeConfig) -> Self {
        Self {
            max_depth: global.max_depth.unwrap_or(self.max_depth),
            include_files: global.include_files.unwrap_or(self.include_files),
            ascii: global.ascii.unwrap_or(self.ascii),
            ignore: global.ignore.clone().unwrap_or_else(|| self.ignore.clone()),
            output: global.output.clone().or_else(|| self.output.clone()),
        }
    }
}

/// Unified configuration for skeltree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Defaults for rendering trees
    pub tree: TreeConfig,
}

/// Get the XDG config directory for skeltree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "skeltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
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

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input as is if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(output) = &self.tree.output {
            let expanded = expand_env_vars(output.to_string_lossy().as_ref());
            self.tree.output = Some(PathBuf::from(expanded));
        }
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree: self.tree.merge(&overlay.tree),
        }
    }

    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            tree: self.tree.apply_global(&global.tree),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.skeltree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config (arrays REPLACE defaults)
    /// 3. Local config (arrays UNION with global, `!pattern` removes)
    /// 4. Environment variables: `SKELTREE_*` prefix (REPLACES)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply SKELTREE_* environment variables as explicit overrides,
    /// e.g. `SKELTREE_TREE__MAX_DEPTH=3` or `SKELTREE_TREE__IGNORE=.git,target`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("SKELTREE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("tree.ignore")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_int("tree.max_depth") {
            settings.tree.max_depth = i32::try_from(val).unwrap_or(DEFAULT_MAX_DEPTH);
        }
        if let Ok(val) = config.get_bool("tree.include_files") {
            settings.tree.include_files = val;
        }
        if let Ok(val) = config.get_bool("tree.ascii") {
            settings.tree.ascii = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("tree.ignore") {
            settings.tree.ignore = val;
        }
        if let Ok(val) = config.get_string("tree.output") {
            settings.tree.output = Some(PathBuf::from(val));
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
        r#"# skeltree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/skeltree/skeltree.toml  (defines your baseline)
#   Local:  ./.skeltree.toml                  (per-directory additions)
#   Env:    SKELTREE_* environment variables  (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!pattern" in local config to REMOVE an inherited pattern:
#     ignore = ["dist", "!.venv"]  # adds dist, removes .venv from global

[tree]
# Levels to descend (1 = immediate children only)
# max_depth = 99

# Show files, not only directories
# include_files = false

# Plain ASCII connectors instead of box drawing
# ascii = false

# Glob patterns of names to leave out, at every depth
# ignore = [".git", "node_modules", "__pycache__", "*.pyc"]

# Also save every rendered tree to this file
# output = "~/tree.txt"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_default_settings_then_matches_documented_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tree.max_depth, 99);
        assert!(!settings.tree.include_files);
        assert!(!settings.tree.ascii);
        assert!(settings.tree.ignore.is_empty());
        assert!(settings.tree.output.is_none());
    }

    #[test]
    fn given_tilde_in_output_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            tree: TreeConfig {
                output: Some(PathBuf::from("~/tree.txt")),
                ..TreeConfig::default()
            },
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let output = settings.tree.output.unwrap();
        assert!(
            output.to_string_lossy().starts_with(&home),
            "output should start with home dir: {}",
            output.display()
        );
    }

    // ========================================
    // Tests for merge_array union semantics
    // ========================================

    #[test]
    fn test_merge_array_union() {
        let result = TreeConfig::merge_array(&strings(&[".git", "*.pyc"]), &strings(&["target"]));
        assert_eq!(result, strings(&["*.pyc", ".git", "target"]));
    }

    #[test]
    fn test_merge_array_negation() {
        let result =
            TreeConfig::merge_array(&strings(&[".git", "*.pyc"]), &strings(&["!.git", "dist"]));
        assert_eq!(result, strings(&["*.pyc", "dist"]));
    }

    #[test]
    fn test_merge_array_negation_nonexistent() {
        let result = TreeConfig::merge_array(&strings(&["a"]), &strings(&["!x"]));
        assert_eq!(result, strings(&["a"]));
    }

    #[test]
    fn test_merge_array_duplicates() {
        let result = TreeConfig::merge_array(&strings(&["a", "b"]), &strings(&["a", "c"]));
        assert_eq!(result, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_merge_tree_config() {
        let base = TreeConfig {
            max_depth: 5,
            include_files: true,
            ascii: false,
            ignore: strings(&[".git", "*.pyc"]),
            output: None,
        };
        let overlay = RawTreeConfig {
            max_depth: Some(2),
            include_files: None,
            ascii: Some(true),
            ignore: Some(strings(&["!*.pyc", "target"])),
            output: None,
        };

        let result = base.merge(&overlay);

        assert_eq!(result.max_depth, 2);
        assert!(result.include_files, "base wins when overlay is None");
        assert!(result.ascii);
        assert_eq!(result.ignore, strings(&[".git", "target"]));
    }

    #[test]
    fn test_apply_global_replaces_arrays() {
        let base = TreeConfig {
            ignore: strings(&[".git"]),
            ..TreeConfig::default()
        };
        let global = RawTreeConfig {
            ignore: Some(strings(&["node_modules"])),
            ..RawTreeConfig::default()
        };

        let result = base.apply_global(&global);

        assert_eq!(result.ignore, strings(&["node_modules"]));
        assert_eq!(result.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn given_template_when_parsing_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        let settings = Settings::default().merge_with(&raw);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_settings_when_to_toml_then_contains_tree_section() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("[tree]"));
        assert!(toml.contains("max_depth = 99"));
        assert!(!toml.contains("output"));
    }
}
