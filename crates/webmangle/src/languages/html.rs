//! HTML matchers

use anyhow::Result;

use crate::matcher::RegexMatcher;

pub const HTML: &str = "html";

/// The attribute list of a start tag, with quoted values kept whole so a `>`
/// inside them does not end the tag
const START_TAG: &str = r#"<[a-zA-Z][^\s/>]*((?:[^>"']|"[^"]*"|'[^']*')*)>"#;

/// Double quoted, single quoted or unquoted attribute value, captured
const ATTRIBUTE_VALUE: &str = r#"(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#;

/// Tokens of a space separated attribute value
const WORDS: &str = r"\S+";

/// Value of any attribute named by `names` inside an attribute list
///
/// Values of other attributes are stepped over, so `title="class=x"` yields
/// nothing.
fn attribute_value(names: &str) -> String {
    format!(r#""[^"]*"|'[^']*'|(?i:(?:^|\s)(?:{names}))\s*=\s*{ATTRIBUTE_VALUE}"#)
}

/// Names listed in `class` attributes
pub fn class_attributes() -> Result<RegexMatcher> {
    RegexMatcher::nested(&[START_TAG, &attribute_value("class"), WORDS])
}

/// Values of `id` attributes and of `for` attributes referring to them
pub fn id_attributes() -> Result<RegexMatcher> {
    RegexMatcher::nested(&[START_TAG, &attribute_value("id|for"), WORDS])
}

/// Attribute names inside start tags
///
/// Attribute values are stepped over so text inside quotes is never taken
/// for a name.
pub fn attribute_names() -> Result<RegexMatcher> {
    RegexMatcher::with_tokens(
        START_TAG,
        r#"=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+)|([^\s"'=/>]+)"#,
    )
}
