//! Configuration file support
//!
//! A configuration is a TOML document with one table per built-in mangler.
//! Only the manglers that have a table are run; every key inside a table is
//! optional and overrides the mangler's default.
//!
//! ```toml
//! [classes]
//! patterns = ["cls-[a-z0-9-]+", "js-[a-z0-9-]+"]
//! ignore-patterns = ["^cls-state-"]
//!
//! [css-variables]
//! char-set = "abcdefghijklmnopqrstuvwxyz0123456789"
//! prefix = "v"
//! reserved = ["[0-9].*"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use etcetera::BaseStrategy;
use log::debug;
use serde::Deserialize;

use crate::{
    manglers::{BuiltInMangler, Mangler},
    name_generator::CharSet,
    options::Patterns,
};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "webmangle.toml";

/// Settings for a single mangler, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ManglerSettings {
    pub patterns: Option<Patterns>,
    pub ignore_patterns: Option<Vec<String>>,
    pub char_set: Option<String>,
    pub prefix: Option<String>,
    pub reserved: Option<Vec<String>>,
}

/// Which manglers run, and how
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub classes: Option<ManglerSettings>,
    pub ids: Option<ManglerSettings>,
    pub attributes: Option<ManglerSettings>,
    pub css_variables: Option<ManglerSettings>,
}

impl Default for Config {
    /// Every built-in mangler with its default options
    fn default() -> Self {
        Self {
            classes: Some(ManglerSettings::default()),
            ids: Some(ManglerSettings::default()),
            attributes: Some(ManglerSettings::default()),
            css_variables: Some(ManglerSettings::default()),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse configuration")
    }

    /// Read and parse the configuration file at `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load the configuration to use
    ///
    /// An explicit path must exist. Otherwise `webmangle.toml` in `cwd` is
    /// used, then `webmangle/config.toml` in the user configuration
    /// directory, and finally the defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = std::iter::once(cwd.join(CONFIG_FILE_NAME)).chain(user_config_path());
        for candidate in candidates {
            if candidate.is_file() {
                debug!("Using config file {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn settings(&self, kind: BuiltInMangler) -> Option<&ManglerSettings> {
        match kind {
            BuiltInMangler::Classes => self.classes.as_ref(),
            BuiltInMangler::Ids => self.ids.as_ref(),
            BuiltInMangler::Attributes => self.attributes.as_ref(),
            BuiltInMangler::CssVariables => self.css_variables.as_ref(),
        }
    }

    /// The enabled manglers, in running order, with overrides applied
    pub fn manglers(&self) -> Vec<Mangler> {
        BuiltInMangler::ALL
            .into_iter()
            .filter_map(|kind| {
                self.settings(kind)
                    .map(|settings| settings.apply_to(kind))
            })
            .collect()
    }
}

impl ManglerSettings {
    fn apply_to(&self, kind: BuiltInMangler) -> Mangler {
        let mut options = kind.default_options();
        if let Some(patterns) = &self.patterns {
            options.patterns = patterns.clone();
        }
        if let Some(ignore_patterns) = &self.ignore_patterns {
            options.ignore_patterns = Some(ignore_patterns.clone());
        }
        if let Some(char_set) = &self.char_set {
            options.char_set = Some(CharSet::from(char_set.as_str()));
        }
        if let Some(prefix) = &self.prefix {
            options.mangle_prefix = Some(prefix.clone());
        }
        if let Some(reserved) = &self.reserved {
            options.reserved_names = Some(reserved.clone());
        }
        Mangler::with_options(kind, options)
    }
}

/// `<user config dir>/webmangle/config.toml`, when a home directory exists
fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("webmangle").join("config.toml"))
}
