//! Token frequency counting and ignore filtering

use anyhow::{Context, Result};
use log::{debug, trace};
use regex::Regex;

use crate::{
    matcher::MatcherRegistry,
    types::{InstanceCounts, WebFile},
};

/// Count every token the registered matchers find for `patterns`
///
/// Files, patterns and matchers are visited in the order given, and a token
/// is inserted into the result the first time it is seen, so ties in count
/// can later be broken by discovery order. Files whose syntax kind has no
/// matchers contribute nothing.
pub fn count_instances(
    files: &[WebFile],
    registry: &MatcherRegistry,
    patterns: &[String],
) -> Result<InstanceCounts> {
    let mut counts = InstanceCounts::default();

    for file in files {
        let matchers = registry.matchers_for(&file.syntax_kind);
        if matchers.is_empty() {
            trace!("No matchers for syntax kind '{}'", file.syntax_kind);
            continue;
        }

        for pattern in patterns {
            for matcher in matchers {
                for token in matcher.find_all(&file.content, pattern)? {
                    *counts.entry(token).or_insert(0) += 1;
                }
            }
        }
    }

    debug!("Found {} distinct tokens across {} files", counts.len(), files.len());
    Ok(counts)
}

/// Remove every token that contains a match for any of `ignore_patterns`
///
/// Unlike reserved names, which must match a candidate in full, an ignore
/// pattern only has to match somewhere inside the token.
pub fn drop_ignored(counts: InstanceCounts, ignore_patterns: &[String]) -> Result<InstanceCounts> {
    if ignore_patterns.is_empty() {
        return Ok(counts);
    }

    let ignore = ignore_patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).with_context(|| format!("Invalid ignore pattern '{pattern}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    let before = counts.len();
    let retained: InstanceCounts = counts
        .into_iter()
        .filter(|(token, _)| !ignore.iter().any(|pattern| pattern.is_match(token)))
        .collect();

    debug!("Ignored {} of {} tokens", before - retained.len(), before);
    Ok(retained)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        languages::{css, html},
        matcher::RegexMatcher,
    };

    fn counts(pairs: &[(&str, usize)]) -> InstanceCounts {
        pairs
            .iter()
            .map(|&(token, count)| (token.to_owned(), count))
            .collect()
    }

    fn css_registry() -> MatcherRegistry {
        MatcherRegistry::new().with(css::CSS, css::class_selectors().unwrap())
    }

    #[test]
    fn test_counts_across_files_in_discovery_order() {
        let files = [
            WebFile::new("css", ".cls-b { } .cls-a { }"),
            WebFile::new("css", ".cls-a .cls-c { }"),
        ];
        let found =
            count_instances(&files, &css_registry(), &["cls-[a-z]".to_owned()]).unwrap();

        assert_eq!(found, counts(&[("cls-b", 1), ("cls-a", 2), ("cls-c", 1)]));
        assert_eq!(found.keys().collect::<Vec<_>>(), ["cls-b", "cls-a", "cls-c"]);
    }

    #[test]
    fn test_unknown_syntax_kinds_contribute_nothing() {
        let files = [WebFile::new("svg", ".cls-a { }")];
        let found =
            count_instances(&files, &css_registry(), &["cls-[a-z]".to_owned()]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_every_pattern_and_matcher_contributes() {
        let registry = MatcherRegistry::new()
            .with(html::HTML, html::class_attributes().unwrap())
            .with(html::HTML, html::id_attributes().unwrap());
        let files = [WebFile::new("html", r#"<p class="x-one y-two" id="x-one">"#)];
        let patterns = ["y-[a-z]+".to_owned(), "x-[a-z]+".to_owned()];

        let found = count_instances(&files, &registry, &patterns).unwrap();

        assert_eq!(found, counts(&[("y-two", 1), ("x-one", 2)]));
        assert_eq!(found.keys().collect::<Vec<_>>(), ["y-two", "x-one"]);
    }

    #[test]
    fn test_matcher_errors_propagate() {
        let registry =
            MatcherRegistry::new().with("css", RegexMatcher::new(r"\.([a-z]+)").unwrap());
        let files = [WebFile::new("css", ".a")];
        let err = count_instances(&files, &registry, &["(".to_owned()]).unwrap_err();
        assert!(err.to_string().contains("Invalid token pattern"));
    }

    #[test]
    fn test_ignore_patterns_match_substrings() {
        let filtered = drop_ignored(
            counts(&[("praise", 3), ("the", 1), ("sun", 4)]),
            &["[a-z]{4}".to_owned()],
        )
        .unwrap();
        assert_eq!(filtered, counts(&[("the", 1), ("sun", 4)]));
    }

    #[test]
    fn test_no_ignore_patterns_keeps_everything() {
        let original = counts(&[("a", 1), ("b", 2)]);
        assert_eq!(drop_ignored(original.clone(), &[]).unwrap(), original);
    }
}
