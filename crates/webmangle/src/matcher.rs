//! Token matching contract between the engine and syntax-specific matchers
//!
//! The engine never looks at file content itself. It asks the matchers
//! registered for a file's syntax kind to find candidate tokens and to
//! substitute tokens according to a mapping.

use std::{borrow::Cow, fmt::Debug, ops::Range};

use anyhow::{Context, Result, bail};
use regex::{Captures, Regex};

use crate::types::FxIndexMap;

/// Locates and substitutes mangleable tokens in one syntax
pub trait TokenMatcher: Debug {
    /// Every token in `content` that fully matches the sub-pattern `pattern`,
    /// in document order
    fn find_all(&self, content: &str, pattern: &str) -> Result<Vec<String>>;

    /// `content` with every token that is a key of `mapping` replaced by its
    /// value
    ///
    /// All lookups are made against `content` as passed in: a replacement
    /// produced by this call is never matched again by the same call.
    fn replace_all(&self, content: &str, mapping: &FxIndexMap<String, String>) -> Result<String>;
}

/// Matchers grouped by the syntax kind they understand
#[derive(Debug, Default)]
pub struct MatcherRegistry {
    matchers: FxIndexMap<String, Vec<Box<dyn TokenMatcher>>>,
}

impl MatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a matcher for `syntax_kind`, after any already registered
    pub fn register(&mut self, syntax_kind: impl Into<String>, matcher: impl TokenMatcher + 'static) {
        self.matchers
            .entry(syntax_kind.into())
            .or_default()
            .push(Box::new(matcher));
    }

    #[must_use]
    pub fn with(mut self, syntax_kind: impl Into<String>, matcher: impl TokenMatcher + 'static) -> Self {
        self.register(syntax_kind, matcher);
        self
    }

    /// Matchers for `syntax_kind` in registration order; empty when none are
    /// registered
    pub fn matchers_for(&self, syntax_kind: &str) -> &[Box<dyn TokenMatcher>] {
        self.matchers
            .get(syntax_kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A matcher built from regular expressions
///
/// The `region` expression locates the places a token may appear. Further
/// expressions narrow each region in turn (e.g., a start tag, then its
/// `class` attribute value, then the space separated names in that value).
/// Whatever the last expression selects is a token.
///
/// For every expression the text of the first participating capture group is
/// used. An expression without capture groups uses the whole match, and a
/// match of an expression with groups where none participated is skipped,
/// which lets a pattern consume text it must step over (quoted strings,
/// comments) without reporting it.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    stages: Vec<Regex>,
}

impl RegexMatcher {
    pub fn new(region: &str) -> Result<Self> {
        Self::nested(&[region])
    }

    pub fn with_tokens(region: &str, tokens: &str) -> Result<Self> {
        Self::nested(&[region, tokens])
    }

    /// A matcher whose expressions each search inside what the previous one
    /// selected, outermost first
    pub fn nested(stages: &[&str]) -> Result<Self> {
        if stages.is_empty() {
            bail!("A matcher needs at least one expression");
        }
        let stages = stages
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<_>>()?;
        Ok(Self { stages })
    }
}

impl TokenMatcher for RegexMatcher {
    fn find_all(&self, content: &str, pattern: &str) -> Result<Vec<String>> {
        let accepted = Regex::new(&format!("^(?:{pattern})$"))
            .with_context(|| format!("Invalid token pattern '{pattern}'"))?;

        let mut found = Vec::new();
        visit_tokens(&self.stages, content, &mut |token| {
            if accepted.is_match(token) {
                found.push(token.to_owned());
            }
        });
        Ok(found)
    }

    fn replace_all(&self, content: &str, mapping: &FxIndexMap<String, String>) -> Result<String> {
        if mapping.is_empty() {
            return Ok(content.to_owned());
        }

        Ok(replace_tokens(&self.stages, content, mapping).into_owned())
    }
}

fn visit_tokens<'c>(stages: &[Regex], text: &'c str, visit: &mut dyn FnMut(&'c str)) {
    let Some((regex, inner)) = stages.split_first() else {
        visit(text);
        return;
    };
    for caps in regex.captures_iter(text) {
        if let Some(span) = selected_span(regex, &caps) {
            visit_tokens(inner, &text[span], visit);
        }
    }
}

fn replace_tokens<'t>(
    stages: &[Regex],
    text: &'t str,
    mapping: &'t FxIndexMap<String, String>,
) -> Cow<'t, str> {
    match stages.split_first() {
        None => Cow::Borrowed(lookup(mapping, text)),
        Some((regex, inner)) => Cow::Owned(splice(regex, text, |span| {
            replace_tokens(inner, span, mapping)
        })),
    }
}

fn lookup<'t>(mapping: &'t FxIndexMap<String, String>, token: &'t str) -> &'t str {
    mapping.get(token).map_or(token, String::as_str)
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Invalid matcher expression '{pattern}'"))
}

/// Byte range of the text a match selects, see [`RegexMatcher`]
fn selected_span(regex: &Regex, caps: &Captures<'_>) -> Option<Range<usize>> {
    if regex.captures_len() == 1 {
        return caps.get(0).map(|whole| whole.range());
    }
    caps.iter().skip(1).flatten().next().map(|group| group.range())
}

/// Rebuild `text`, passing every selected span through `replace` in a single
/// left-to-right scan
fn splice<'t>(
    regex: &Regex,
    text: &'t str,
    mut replace: impl FnMut(&'t str) -> Cow<'t, str>,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;
    for caps in regex.captures_iter(text) {
        let Some(span) = selected_span(regex, &caps) else {
            continue;
        };
        output.push_str(&text[last_end..span.start]);
        output.push_str(&replace(&text[span.clone()]));
        last_end = span.end;
    }
    output.push_str(&text[last_end..]);
    output
}
