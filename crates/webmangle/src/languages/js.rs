//! JavaScript matchers
//!
//! Tokens are only looked for inside string and template literals; comments
//! are stepped over.

use anyhow::Result;

use super::{BOUNDARY, IDENT, NAME_CHARS};
use crate::matcher::RegexMatcher;

pub const JS: &str = "js";

const STRING_LITERALS: &str = concat!(
    r"//[^\n]*|/\*(?s:.*?)\*/",
    r#"|"((?:[^"\\\n]|\\.)*)""#,
    r"|'((?:[^'\\\n]|\\.)*)'",
    r"|`((?:[^`\\]|\\(?s:.))*)`",
);

/// Identifiers inside string literals: `"cls-a cls-b"`, `".cls-a > #id-b"`
pub fn string_identifiers() -> Result<RegexMatcher> {
    RegexMatcher::with_tokens(STRING_LITERALS, &format!("{BOUNDARY}({IDENT})"))
}

/// Custom property names inside string literals: `"--accent"`, `"var(--accent)"`
pub fn string_custom_properties() -> Result<RegexMatcher> {
    RegexMatcher::with_tokens(STRING_LITERALS, &format!("{BOUNDARY}--({NAME_CHARS}+)"))
}
