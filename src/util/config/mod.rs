//! jp-ruby configuration
//!
//! Project- and user-level overrides for keyword spellings and runtime
//! method aliases, read from `.jp-ruby.yml`.
//!
//! # Discovery
//!
//! ```text
//! Priority (high → low):
//! 1. Explicit path (--config), which must exist
//! 2. Directory of the input file
//! 3. Current working directory
//! 4. Home directory
//! 5. Built-in defaults
//! ```
//!
//! # Format
//!
//! ```yaml
//! Keyword:          # canonical keyword → localized spelling
//!   class: 組
//!   end: 以上
//! Array:            # class → canonical method → localized alias
//!   each: 各々
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;
use thiserror::Error;

use crate::frontend::keywords::{KeywordTable, DEFAULT_KEYWORDS};
use crate::runtime::AliasMap;
use crate::tlog;
use crate::util::i18n::MSG;

/// Config file name looked up in each discovery directory
pub const CONFIG_FILE_NAME: &str = ".jp-ruby.yml";

/// Section holding keyword overrides; every other section names a class
pub const KEYWORD_SECTION: &str = "Keyword";

/// `Foo` or `Foo::Bar`
static CONSTANT_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*$").expect("valid constant pattern")
});

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML syntax error ({}): {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config file must be a mapping of sections: {}", .0.display())]
    InvalidFormat(PathBuf),

    #[error("section '{section}' must be a mapping ({})", .path.display())]
    SectionNotMapping { section: String, path: PathBuf },

    #[error("keys and values in section '{section}' must be strings ({})", .path.display())]
    NonStringEntry { section: String, path: PathBuf },

    #[error("empty keyword is not allowed: '{keyword}' ({})", .path.display())]
    EmptyKeyword { keyword: String, path: PathBuf },

    #[error("empty alias is not allowed: {class}#{method} ({})", .path.display())]
    EmptyAlias {
        class: String,
        method: String,
        path: PathBuf,
    },

    #[error("unknown class '{class}' ({}); use a Ruby constant name", .path.display())]
    UnknownClass { class: String, path: PathBuf },

    #[error(
        "localized keyword '{localized}' is mapped to more than one keyword: '{existing}' and '{requested}'"
    )]
    KeywordConflict {
        localized: String,
        existing: String,
        requested: String,
    },
}

/// Loaded overrides. The default value carries none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    keyword_overrides: IndexMap<String, String>,
    runtime_overrides: IndexMap<String, IndexMap<String, String>>,
    source: Option<PathBuf>,
}

impl Config {
    /// Discover and load, falling back to defaults when no file exists
    pub fn resolve(
        input_file: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        match Self::discover(input_file, explicit)? {
            Some(path) => {
                tlog!(info, MSG::ConfigDiscovered, &path.display());
                Self::load(&path)
            }
            None => {
                tlog!(debug, MSG::ConfigDefault);
                Ok(Self::default())
            }
        }
    }

    /// First existing config file in the discovery chain
    pub fn discover(
        input_file: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let mut candidates = Vec::new();
        if let Some(dir) = input_file.and_then(input_dir) {
            candidates.push(dir.join(CONFIG_FILE_NAME));
        }
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(home) = home_dir() {
            candidates.push(home.join(CONFIG_FILE_NAME));
        }
        Ok(candidates.into_iter().find(|path| path.is_file()))
    }

    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content, path)?;
        tlog!(
            debug,
            MSG::ConfigLoaded,
            &config.keyword_overrides.len(),
            &config.runtime_overrides.len()
        );
        Ok(config)
    }

    /// Parse and validate YAML text; `path` is only used in error messages
    pub fn from_yaml_str(
        content: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let raw: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self {
            source: Some(path.to_path_buf()),
            ..Self::default()
        };
        let sections = match raw {
            Value::Null | Value::Bool(false) => return Ok(config),
            Value::Mapping(sections) => sections,
            _ => return Err(ConfigError::InvalidFormat(path.to_path_buf())),
        };

        for (section, entries) in sections {
            let Value::String(section) = section else {
                return Err(ConfigError::InvalidFormat(path.to_path_buf()));
            };
            let entries = string_entries(&section, entries, path)?;

            if section == KEYWORD_SECTION {
                if let Some((keyword, _)) = entries.iter().find(|(_, v)| v.trim().is_empty()) {
                    return Err(ConfigError::EmptyKeyword {
                        keyword: keyword.clone(),
                        path: path.to_path_buf(),
                    });
                }
                config.keyword_overrides = entries;
            } else {
                if !CONSTANT_PATH.is_match(&section) {
                    return Err(ConfigError::UnknownClass {
                        class: section,
                        path: path.to_path_buf(),
                    });
                }
                if let Some((method, _)) = entries.iter().find(|(_, v)| v.trim().is_empty()) {
                    return Err(ConfigError::EmptyAlias {
                        class: section,
                        method: method.clone(),
                        path: path.to_path_buf(),
                    });
                }
                config.runtime_overrides.insert(section, entries);
            }
        }
        Ok(config)
    }

    /// Canonical keyword → localized spelling overrides
    pub fn keyword_overrides(&self) -> &IndexMap<String, String> {
        &self.keyword_overrides
    }

    /// Class → (canonical method → localized alias) overrides
    pub fn runtime_overrides(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.runtime_overrides
    }

    /// File the config was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Default keywords with overrides applied.
    ///
    /// Each override replaces the old spelling of its keyword. A spelling
    /// already used by a different keyword is a conflict.
    pub fn build_keyword_table(&self) -> Result<KeywordTable, ConfigError> {
        let mut base: IndexMap<String, String> = DEFAULT_KEYWORDS
            .iter()
            .map(|&(localized, canonical)| (localized.to_string(), canonical.to_string()))
            .collect();

        for (canonical, localized) in &self.keyword_overrides {
            base.retain(|_, existing| existing != canonical);
            if let Some(existing) = base.get(localized) {
                return Err(ConfigError::KeywordConflict {
                    localized: localized.clone(),
                    existing: existing.clone(),
                    requested: canonical.clone(),
                });
            }
            base.insert(localized.clone(), canonical.clone());
        }
        Ok(KeywordTable::new(base))
    }

    /// Default runtime aliases with overrides applied
    pub fn build_alias_map(&self) -> AliasMap {
        let mut map = AliasMap::defaults();
        for (class, methods) in &self.runtime_overrides {
            for (method, alias) in methods {
                map.set_alias(class, method, alias);
            }
        }
        map
    }
}

/// Validate one section as a string → string mapping
fn string_entries(
    section: &str,
    entries: Value,
    path: &Path,
) -> Result<IndexMap<String, String>, ConfigError> {
    let Value::Mapping(entries) = entries else {
        return Err(ConfigError::SectionNotMapping {
            section: section.to_string(),
            path: path.to_path_buf(),
        });
    };
    entries
        .into_iter()
        .map(|(key, value)| match (key, value) {
            (Value::String(key), Value::String(value)) => Ok((key, value)),
            _ => Err(ConfigError::NonStringEntry {
                section: section.to_string(),
                path: path.to_path_buf(),
            }),
        })
        .collect()
}

fn input_dir(input_file: &Path) -> Option<PathBuf> {
    match input_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Some(dir.to_path_buf()),
        _ => std::env::current_dir().ok(),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
