//! # Configuration Module
//!
//! This module provides project configuration for copyright-updater: the
//! ordered list of scopes pairing path patterns with templates, ignore
//! patterns, template variables, and language overrides.
//!
//! Configuration can be specified in a `.copyright.toml` file, a
//! `.vscode/copyright.json` file, or via the `COPYRIGHT_UPDATER_CONFIG`
//! environment variable.
//!
//! ```toml
//! ignore = ["^target/"]
//! ignore-files = [".copyrightignore"]
//!
//! [variables]
//! author = "Jane Doe"
//!
//! [[scopes]]
//! pattern = "src/.*\\.rs$"
//! template = ".copyright/rust.tmpl"
//!
//! [languages.nix]
//! extensions = ["nix"]
//! line-comment = "#"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".copyright.toml";

/// Editor-style config location, relative to the workspace root.
pub const JSON_CONFIG_PATH: &str = ".vscode/copyright.json";

/// Template used by the `update` command when no project config exists.
pub const DEFAULT_TEMPLATE_FILENAME: &str = ".copyright.tmpl";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYRIGHT_UPDATER_CONFIG";

/// A path pattern and the template applied to files matching it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScopeConfig {
  /// Regular expression matched against the start of the workspace-relative
  /// path.
  pub pattern: String,

  /// Template file, relative to the workspace root.
  pub template: String,
}

/// User-defined language settings.
///
/// An entry can introduce a new language, remap file names and extensions to
/// an existing one, or replace its line-comment prefix.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LanguageConfig {
  /// Line-comment prefix (e.g., "//" or "#"). Falls back to the builtin
  /// syntax when omitted.
  #[serde(default, alias = "lineComment")]
  pub line_comment: Option<String>,

  /// File extensions (without the leading dot) mapped to this language.
  #[serde(default)]
  pub extensions: Vec<String>,

  /// Exact file names mapped to this language.
  #[serde(default)]
  pub filenames: Vec<String>,
}

/// Main configuration struct for copyright-updater.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
  /// Ordered scopes; the first matching scope wins.
  #[serde(default)]
  pub scopes: Vec<ScopeConfig>,

  /// Regular expressions for paths to leave alone.
  #[serde(default, alias = "ignoreList")]
  pub ignore: Vec<String>,

  /// Files holding one ignore pattern per line, relative to the workspace
  /// root.
  #[serde(default, alias = "ignoreListFiles")]
  pub ignore_files: Vec<String>,

  /// Extra template variables.
  #[serde(default)]
  pub variables: BTreeMap<String, String>,

  /// Language overrides keyed by language id.
  #[serde(default)]
  pub languages: HashMap<String, LanguageConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The config file contains invalid JSON.
  #[error("Failed to parse config file '{path}': {source}")]
  JsonParseError { path: PathBuf, source: serde_json::Error },

  /// A scope or ignore pattern is not a valid regular expression.
  #[error("Invalid pattern '{pattern}': {source}")]
  InvalidPattern { pattern: String, source: regex::Error },

  /// A language entry is invalid.
  #[error("Invalid language '{language}': {message}")]
  InvalidLanguage { language: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// Files ending in `.json` are parsed as JSON, everything else as TOML.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let is_json = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: Config = if is_json {
      serde_json::from_str(&content).map_err(|e| ConfigError::JsonParseError {
        path: path.to_path_buf(),
        source: e,
      })?
    } else {
      toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
      })?
    };

    config.validate()?;
    let config = config.normalize();

    verbose_log!(
      "Loaded {} scopes and {} language overrides",
      config.scopes.len(),
      config.languages.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Line-comment prefixes are non-empty when given
  /// - Extension names don't include the leading dot
  fn validate(&self) -> Result<(), ConfigError> {
    for (language, entry) in &self.languages {
      if entry.line_comment.as_deref().is_some_and(str::is_empty) {
        return Err(ConfigError::InvalidLanguage {
          language: language.clone(),
          message: "line-comment cannot be empty".to_string(),
        });
      }

      if let Some(ext) = entry.extensions.iter().find(|ext| ext.starts_with('.')) {
        return Err(ConfigError::InvalidLanguage {
          language: language.clone(),
          message: format!("extension '{ext}' should not include leading dot"),
        });
      }
    }

    Ok(())
  }

  /// Lowercase extensions and file names for case-insensitive matching.
  fn normalize(mut self) -> Self {
    for entry in self.languages.values_mut() {
      for ext in &mut entry.extensions {
        *ext = ext.to_lowercase();
      }
      for name in &mut entry.filenames {
        *name = name.to_lowercase();
      }
    }
    self
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `COPYRIGHT_UPDATER_CONFIG` environment variable
/// 3. `.copyright.toml` in the workspace root
/// 4. `.vscode/copyright.json` in the workspace root
pub fn discover_config_path(explicit_path: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  for candidate in [DEFAULT_CONFIG_FILENAME, JSON_CONFIG_PATH] {
    let path = workspace_root.join(candidate);
    if path.exists() {
      verbose_log!("Using workspace config: {}", path.display());
      return Some(path);
    }
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `Ok(None)` when no config file is found or discovery is disabled.
/// An explicit path that does not exist is an error.
pub fn load_config(explicit_path: Option<&Path>, workspace_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  if let Some(path) = explicit_path
    && !path.exists()
  {
    anyhow::bail!("Config file not found: {}", path.display());
  }

  match discover_config_path(explicit_path, workspace_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
