//! # Scope Module
//!
//! Scopes pair a path pattern with a template reference. They are kept in
//! declaration order and the first scope whose pattern matches a
//! workspace-relative path decides the template for that file.

use regex::Regex;

use crate::config::{ConfigError, DEFAULT_TEMPLATE_FILENAME, ScopeConfig};

/// A compiled scope.
#[derive(Debug, Clone)]
pub struct Scope {
  pattern: Regex,
  source: String,
  template: String,
}

impl Scope {
  /// Compiles `pattern`, anchored at the start of the path.
  pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self, ConfigError> {
    let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|e| ConfigError::InvalidPattern {
      pattern: pattern.to_string(),
      source: e,
    })?;

    Ok(Self {
      pattern: regex,
      source: pattern.to_string(),
      template: template.into(),
    })
  }

  /// The pattern as written in the configuration.
  pub fn pattern(&self) -> &str {
    &self.source
  }

  /// Template reference for files in this scope.
  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn is_match(&self, relative_path: &str) -> bool {
    self.pattern.is_match(relative_path)
  }
}

/// Ordered list of scopes with first-match-wins lookup.
#[derive(Debug, Clone, Default)]
pub struct ScopeSet {
  scopes: Vec<Scope>,
}

impl ScopeSet {
  pub const fn new(scopes: Vec<Scope>) -> Self {
    Self { scopes }
  }

  /// Compiles the scopes of a configuration, keeping declaration order.
  pub fn from_config(scopes: &[ScopeConfig]) -> Result<Self, ConfigError> {
    let scopes = scopes
      .iter()
      .map(|scope| Scope::new(&scope.pattern, scope.template.clone()))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self { scopes })
  }

  /// A single catch-all scope using the workspace's default template.
  pub fn fallback() -> Self {
    Self {
      scopes: vec![Scope {
        pattern: Regex::new("^").expect("empty pattern must compile"),
        source: String::new(),
        template: DEFAULT_TEMPLATE_FILENAME.to_string(),
      }],
    }
  }

  /// The first scope matching `relative_path`.
  pub fn resolve(&self, relative_path: &str) -> Option<&Scope> {
    self.scopes.iter().find(|scope| scope.is_match(relative_path))
  }

  pub fn matches_any(&self, relative_path: &str) -> bool {
    self.resolve(relative_path).is_some()
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }
}
