//! Built-in matchers for the syntaxes webmangle understands out of the box
//!
//! Each function returns a [`RegexMatcher`](crate::matcher::RegexMatcher)
//! composed from a region expression and, where a region holds several
//! tokens, a token expression. They locate tokens by their surrounding
//! syntax only; nothing here parses the documents.

use std::path::Path;

pub mod css;
pub mod html;
pub mod js;

pub use css::CSS;
pub use html::HTML;
pub use js::JS;

/// A CSS identifier, as used for class names, ids and attribute names
pub(crate) const IDENT: &str = r"-?[_a-zA-Z\x{80}-\x{10FFFF}][_a-zA-Z0-9\x{80}-\x{10FFFF}-]*";

/// Characters that may appear in a custom property name after the `--`
pub(crate) const NAME_CHARS: &str = r"[_a-zA-Z0-9\x{80}-\x{10FFFF}-]";

/// Text that cannot be part of an identifier, consumed in front of a match
pub(crate) const BOUNDARY: &str = r"(?:^|[^_a-zA-Z0-9\x{80}-\x{10FFFF}-])";

/// Determine the syntax kind of a file from its extension
pub fn syntax_kind_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "css" => Some(CSS),
        "html" | "htm" => Some(HTML),
        "js" | "mjs" | "cjs" => Some(JS),
        _ => None,
    }
}
