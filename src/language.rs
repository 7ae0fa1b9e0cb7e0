//! # Language Module
//!
//! This module maps files to language identifiers and language identifiers to
//! their line-comment prefix.
//!
//! The builtin table follows common editor language ids (`rust`, `python`,
//! `shellscript`, ...). Languages that only have block comments, such as
//! `css` or `html`, are known but carry no line-comment prefix, so files in
//! those languages are never given a header.

use std::collections::HashMap;
use std::path::Path;

use crate::config::LanguageConfig;
use crate::verbose_log;

/// Comment syntax registered for a language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSyntax {
  /// Line-comment prefix, if the language has one
  pub line_comment: Option<String>,
}

/// Source of language identification and comment syntax.
pub trait LanguageRegistry: Send + Sync {
  /// Looks up the syntax for a language id.
  fn lookup(&self, language_id: &str) -> Option<LanguageSyntax>;

  /// Identifies the language of a file from its name.
  fn identify(&self, path: &Path) -> Option<String>;
}

/// Resolves the line-comment prefix for `language_id`.
///
/// Returns `None` when the language is unknown or has no line comment; the
/// caller then leaves the file alone.
pub fn resolve_line_comment(registry: &dyn LanguageRegistry, language_id: &str) -> Option<String> {
  registry
    .lookup(language_id)
    .and_then(|syntax| syntax.line_comment)
    .filter(|prefix| !prefix.is_empty())
}

/// `(language id, line-comment prefix)` pairs known out of the box.
const BUILTIN_SYNTAX: &[(&str, Option<&str>)] = &[
  ("bat", Some("@REM")),
  ("c", Some("//")),
  ("clojure", Some(";;")),
  ("cmake", Some("#")),
  ("coffeescript", Some("#")),
  ("cpp", Some("//")),
  ("csharp", Some("//")),
  ("css", None),
  ("dart", Some("//")),
  ("dockerfile", Some("#")),
  ("elixir", Some("#")),
  ("erlang", Some("%")),
  ("fsharp", Some("//")),
  ("go", Some("//")),
  ("groovy", Some("//")),
  ("haskell", Some("--")),
  ("html", None),
  ("ini", Some(";")),
  ("java", Some("//")),
  ("javascript", Some("//")),
  ("javascriptreact", Some("//")),
  ("json", None),
  ("julia", Some("#")),
  ("kotlin", Some("//")),
  ("less", Some("//")),
  ("lisp", Some(";;")),
  ("lua", Some("--")),
  ("makefile", Some("#")),
  ("markdown", None),
  ("nim", Some("#")),
  ("objective-c", Some("//")),
  ("perl", Some("#")),
  ("php", Some("//")),
  ("plaintext", None),
  ("powershell", Some("#")),
  ("proto", Some("//")),
  ("python", Some("#")),
  ("r", Some("#")),
  ("ruby", Some("#")),
  ("rust", Some("//")),
  ("scala", Some("//")),
  ("scss", Some("//")),
  ("shellscript", Some("#")),
  ("sql", Some("--")),
  ("swift", Some("//")),
  ("terraform", Some("#")),
  ("toml", Some("#")),
  ("typescript", Some("//")),
  ("typescriptreact", Some("//")),
  ("verilog", Some("//")),
  ("vb", Some("'")),
  ("xml", None),
  ("yaml", Some("#")),
  ("zig", Some("//")),
];

/// Maps a file to a builtin language id from its name and extension.
fn builtin_language_for_path(path: &Path) -> Option<&'static str> {
  let file_name = path
    .file_name()
    .and_then(|name| name.to_str())
    .unwrap_or("")
    .to_lowercase();

  match file_name.as_str() {
    "dockerfile" | "containerfile" => return Some("dockerfile"),
    "makefile" | "gnumakefile" => return Some("makefile"),
    "cmakelists.txt" => return Some("cmake"),
    "rakefile" | "gemfile" => return Some("ruby"),
    _ => {}
  }

  let extension = path
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or("")
    .to_lowercase();

  let language = match extension.as_str() {
    "bat" | "cmd" => "bat",
    "c" | "h" => "c",
    "clj" | "cljs" | "cljc" | "edn" => "clojure",
    "cmake" => "cmake",
    "coffee" => "coffeescript",
    "cc" | "cpp" | "cxx" | "hh" | "hpp" | "hxx" | "ino" => "cpp",
    "cs" => "csharp",
    "css" => "css",
    "dart" => "dart",
    "dockerfile" => "dockerfile",
    "ex" | "exs" => "elixir",
    "erl" | "hrl" => "erlang",
    "fs" | "fsi" | "fsx" => "fsharp",
    "go" => "go",
    "groovy" | "gradle" => "groovy",
    "hs" | "lhs" => "haskell",
    "htm" | "html" | "vue" => "html",
    "ini" | "cfg" => "ini",
    "java" => "java",
    "js" | "mjs" | "cjs" => "javascript",
    "jsx" => "javascriptreact",
    "json" => "json",
    "jl" => "julia",
    "kt" | "kts" => "kotlin",
    "less" => "less",
    "el" | "lisp" | "lsp" => "lisp",
    "lua" => "lua",
    "mk" => "makefile",
    "md" | "markdown" => "markdown",
    "nim" => "nim",
    "m" | "mm" => "objective-c",
    "pl" | "pm" => "perl",
    "php" => "php",
    "txt" => "plaintext",
    "ps1" | "psm1" => "powershell",
    "proto" => "proto",
    "py" | "pyi" => "python",
    "r" => "r",
    "rb" => "ruby",
    "rs" => "rust",
    "scala" | "sc" => "scala",
    "scss" => "scss",
    "sh" | "bash" | "zsh" => "shellscript",
    "sql" => "sql",
    "swift" => "swift",
    "tf" | "hcl" => "terraform",
    "toml" => "toml",
    "ts" | "mts" | "cts" => "typescript",
    "tsx" => "typescriptreact",
    "v" | "sv" | "svh" => "verilog",
    "vb" => "vb",
    "xml" | "xsd" | "svg" => "xml",
    "yaml" | "yml" => "yaml",
    "zig" => "zig",
    _ => return None,
  };

  Some(language)
}

/// Registry backed by the builtin language table.
#[derive(Debug, Default)]
pub struct BuiltinRegistry;

impl LanguageRegistry for BuiltinRegistry {
  fn lookup(&self, language_id: &str) -> Option<LanguageSyntax> {
    BUILTIN_SYNTAX
      .iter()
      .find(|(id, _)| *id == language_id)
      .map(|(_, prefix)| LanguageSyntax {
        line_comment: prefix.map(str::to_string),
      })
  }

  fn identify(&self, path: &Path) -> Option<String> {
    builtin_language_for_path(path).map(str::to_string)
  }
}

/// Registry that checks user configuration first, then falls back to the
/// builtin table.
#[derive(Debug)]
pub struct ConfigurableRegistry {
  languages: HashMap<String, LanguageConfig>,
}

impl ConfigurableRegistry {
  pub const fn new(languages: HashMap<String, LanguageConfig>) -> Self {
    Self { languages }
  }
}

impl LanguageRegistry for ConfigurableRegistry {
  fn lookup(&self, language_id: &str) -> Option<LanguageSyntax> {
    if let Some(line_comment) = self
      .languages
      .get(language_id)
      .and_then(|entry| entry.line_comment.clone())
    {
      verbose_log!("Using config line comment for language: {}", language_id);
      return Some(LanguageSyntax {
        line_comment: Some(line_comment),
      });
    }

    BuiltinRegistry.lookup(language_id)
  }

  fn identify(&self, path: &Path) -> Option<String> {
    let file_name = path
      .file_name()
      .and_then(|name| name.to_str())
      .unwrap_or("")
      .to_lowercase();

    // 1. Exact file names
    for (id, entry) in &self.languages {
      if entry.filenames.iter().any(|name| *name == file_name) {
        return Some(id.clone());
      }
    }

    // 2. Extensions
    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .unwrap_or("")
      .to_lowercase();

    if !extension.is_empty() {
      for (id, entry) in &self.languages {
        if entry.extensions.iter().any(|ext| *ext == extension) {
          return Some(id.clone());
        }
      }
    }

    // 3. Builtin mapping
    BuiltinRegistry.identify(path)
  }
}

/// Create a language registry based on the provided language overrides.
pub fn create_registry(languages: Option<HashMap<String, LanguageConfig>>) -> Box<dyn LanguageRegistry> {
  match languages {
    Some(languages) if !languages.is_empty() => Box::new(ConfigurableRegistry::new(languages)),
    _ => Box::new(BuiltinRegistry),
  }
}
