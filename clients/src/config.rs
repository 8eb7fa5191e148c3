//! `alfa-act.toml` configuration.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use alfa_act_earl::Assertor;
use anyhow::{Context, Result};
use serde::Deserialize;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "alfa-act.toml";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the mapping reports and receiving the summaries.
    pub reports_dir: PathBuf,
    /// ACT rule ids listed as ignored regardless of their mapping.
    pub ignored_rules: BTreeSet<String>,
    /// Project that made the assertions of EARL reports.
    pub assertor: Option<AssertorConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            ignored_rules: BTreeSet::new(),
            assertor: None,
        }
    }
}

/// The `[assertor]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssertorConfig {
    /// Project name.
    pub name: String,
    /// Project homepage.
    pub homepage: String,
    /// License IRI.
    #[serde(default)]
    pub license: Option<String>,
    /// Released version.
    #[serde(default)]
    pub version: Option<String>,
}

impl From<AssertorConfig> for Assertor {
    fn from(config: AssertorConfig) -> Self {
        Assertor {
            name: config.name,
            homepage: config.homepage,
            license: config.license,
            version: config.version,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown keys.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file at the default location gives the default
    /// configuration; a missing file given explicitly is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG), false),
        };
        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config =
            Self::from_toml(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            ignored = config.ignored_rules.len(),
            "loaded configuration"
        );
        Ok(config)
    }
}
