//! Inputs for the participation report.
//!
//! Defaults are the fixed IMDb dump locations. A YAML file named
//! [`CONFIG_FILE`] in the working directory overrides individual fields.

use crate::table::{BadRowPolicy, NaTokens, ReadOptions, DEFAULT_NA_VALUES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub const CONFIG_FILE: &str = "akas-participation.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Alternate-title table; its key column is counted for distinct values.
    pub akas_path: PathBuf,
    /// Title table; only its row count is used.
    pub basics_path: PathBuf,
    pub key_column: String,
    /// Cell texts loaded as missing.
    pub na_values: Vec<String>,
    pub on_bad_rows: BadRowPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            akas_path: PathBuf::from("data/title.akas.tsv"),
            basics_path: PathBuf::from("data/title.basics.tsv"),
            key_column: "titleId".to_string(),
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            on_bad_rows: BadRowPolicy::Error,
        }
    }
}

impl ReportConfig {
    /// Defaults, overlaid with [`CONFIG_FILE`] when one is present in the
    /// working directory.
    pub fn resolve() -> Result<Self> {
        Self::resolve_in(Path::new("."))
    }

    pub fn resolve_in(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            info!(path = %path.display(), "loading config");
            Self::from_yaml_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // an empty document means "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            na_values: NaTokens::new(self.na_values.iter().cloned()),
            on_bad_rows: self.on_bad_rows,
        }
    }
}
