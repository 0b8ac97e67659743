//! Run configuration loaded from TOML.
//!
//! - `parse_settings_toml(toml_content)` parses and validates
//! - `Settings::load(path)` also resolves relative paths against the file's directory
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::variant::ZhConverter;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub sources: SourceSettings,
    pub target: TargetSettings,
    pub tables: Vec<TableSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub base_dir: PathBuf,
    /// Processed in this order.
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetSettings {
    pub path: PathBuf,
    pub start_marker: String,
    pub end_marker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    pub name: String,
    /// Conversion profile; absent for the base script.
    #[serde(default)]
    pub converter: Option<String>,
}

impl Settings {
    /// Built-in defaults, relative to the working directory.
    pub fn defaults() -> Result<Self, SettingsError> {
        parse_settings_toml(DEFAULT_SETTINGS_TOML)
    }

    /// Load from `path`, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = parse_settings_toml(&content)?;
        if let Some(dir) = path.parent() {
            settings.rebase(dir);
        }
        Ok(settings)
    }

    /// Resolve relative `base_dir` and target path against `dir`.
    pub fn rebase(&mut self, dir: &Path) {
        if self.sources.base_dir.is_relative() {
            self.sources.base_dir = dir.join(&self.sources.base_dir);
        }
        if self.target.path.is_relative() {
            self.target.path = dir.join(&self.target.path);
        }
    }

    /// Source files in declared order, joined onto `base_dir`.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources
            .files
            .iter()
            .map(|f| self.sources.base_dir.join(f))
            .collect()
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: impl Into<String>, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.into(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.sources.files.is_empty() {
        return Err(invalid("sources.files", "must list at least one file"));
    }

    let start = s.target.start_marker.trim();
    let end = s.target.end_marker.trim();
    if start.is_empty() {
        return Err(invalid("target.start_marker", "must not be empty"));
    }
    if end.is_empty() {
        return Err(invalid("target.end_marker", "must not be empty"));
    }
    if start == end {
        return Err(invalid("target.end_marker", "must differ from start_marker"));
    }
    if start != s.target.start_marker || end != s.target.end_marker {
        return Err(invalid(
            "target",
            "markers must not have leading or trailing whitespace",
        ));
    }

    if s.tables.is_empty() {
        return Err(invalid("tables", "must define at least one table"));
    }
    let mut names = HashSet::new();
    for (i, table) in s.tables.iter().enumerate() {
        if table.name.trim().is_empty() {
            return Err(invalid(format!("tables[{i}].name"), "must not be empty"));
        }
        if table.name.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
            return Err(invalid(
                format!("tables[{i}].name"),
                "must be a valid Lisp symbol",
            ));
        }
        if !names.insert(table.name.as_str()) {
            return Err(invalid(format!("tables[{i}].name"), "duplicate table name"));
        }
        if let Some(profile) = &table.converter {
            if ZhConverter::from_profile(profile).is_err() {
                return Err(invalid(
                    format!("tables[{i}].converter"),
                    "unknown conversion profile",
                ));
            }
        }
    }

    Ok(())
}
