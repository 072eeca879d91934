//! Mangling options and their normalization
//!
//! Callers describe a run with a sparse [`MangleOptions`]; the engine only
//! ever works with the fully populated [`NormalizedOptions`].

use serde::Deserialize;

use crate::name_generator::CharSet;

/// One pattern or a list of patterns
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(pattern) => vec![pattern],
            Self::Many(patterns) => patterns,
        }
    }
}

impl From<&str> for Patterns {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

/// Sparse configuration for a single engine invocation
#[derive(Debug, Clone)]
pub struct MangleOptions {
    /// Sub-patterns describing the tokens to mangle
    pub patterns: Patterns,
    /// Tokens containing a match for any of these are left alone
    pub ignore_patterns: Option<Vec<String>>,
    /// Alphabet for replacement names
    pub char_set: Option<CharSet>,
    /// Prepended to every replacement name
    pub mangle_prefix: Option<String>,
    /// Replacement names fully matching any of these are never produced
    pub reserved_names: Option<Vec<String>>,
}

impl MangleOptions {
    pub fn new(patterns: impl Into<Patterns>) -> Self {
        Self {
            patterns: patterns.into(),
            ignore_patterns: None,
            char_set: None,
            mangle_prefix: None,
            reserved_names: None,
        }
    }

    #[must_use]
    pub fn with_ignore_patterns(mut self, ignore_patterns: Vec<String>) -> Self {
        self.ignore_patterns = Some(ignore_patterns);
        self
    }

    #[must_use]
    pub fn with_char_set(mut self, char_set: CharSet) -> Self {
        self.char_set = Some(char_set);
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.mangle_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_reserved_names(mut self, reserved_names: Vec<String>) -> Self {
        self.reserved_names = Some(reserved_names);
        self
    }

    /// Fill in the defaults for everything left unset
    pub fn normalize(self) -> NormalizedOptions {
        NormalizedOptions {
            patterns: self.patterns.into_vec(),
            ignore_patterns: self.ignore_patterns.unwrap_or_default(),
            char_set: self.char_set.unwrap_or_default(),
            mangle_prefix: self.mangle_prefix.unwrap_or_default(),
            reserved_names: self.reserved_names.unwrap_or_default(),
        }
    }
}

/// Fully populated options, as consumed by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOptions {
    pub patterns: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub char_set: CharSet,
    pub mangle_prefix: String,
    pub reserved_names: Vec<String>,
}
