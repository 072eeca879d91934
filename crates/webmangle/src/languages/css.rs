//! CSS matchers

use anyhow::Result;

use super::{BOUNDARY, IDENT, NAME_CHARS};
use crate::matcher::RegexMatcher;

pub const CSS: &str = "css";

/// Class selectors: `.name`
pub fn class_selectors() -> Result<RegexMatcher> {
    RegexMatcher::new(&format!(r"\.({IDENT})"))
}

/// Id selectors and fragment references: `#name`
pub fn id_selectors() -> Result<RegexMatcher> {
    RegexMatcher::new(&format!(r"#({IDENT})"))
}

/// Attribute selectors: `[name]`, `[name="value"]`, ...
pub fn attribute_selectors() -> Result<RegexMatcher> {
    RegexMatcher::new(&format!(r"\[\s*({IDENT})"))
}

/// Custom property declarations and usages: `--name: ...`, `var(--name)`
///
/// The token is the name without its leading `--`.
pub fn custom_properties() -> Result<RegexMatcher> {
    RegexMatcher::new(&format!(r"{BOUNDARY}--({NAME_CHARS}+)"))
}
