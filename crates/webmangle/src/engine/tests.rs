//! Tests for the full mangling pipeline

use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use super::*;
use crate::{
    languages::{css, html, js},
    matcher::TokenMatcher,
    name_generator::{CharSet, NameGenerator},
    types::FxIndexMap,
};

fn css_registry() -> MatcherRegistry {
    MatcherRegistry::new().with(css::CSS, css::class_selectors().unwrap())
}

fn web_registry() -> MatcherRegistry {
    MatcherRegistry::new()
        .with(css::CSS, css::class_selectors().unwrap())
        .with(html::HTML, html::class_attributes().unwrap())
        .with(js::JS, js::string_identifiers().unwrap())
}

#[test]
fn test_end_to_end_css() {
    let mut files = vec![WebFile::new("css", ".cls-foo { } .cls-bar { }")];

    mangle(&mut files, &css_registry(), MangleOptions::new("cls-[a-z]+")).unwrap();

    assert_eq!(files[0].content, ".a { } .b { }");
}

#[test]
fn test_frequency_decides_name_length() {
    let mut files = vec![WebFile::new(
        "css",
        ".cls-rare { } .cls-common { } .cls-common:hover { } .cls-common > p { }",
    )];

    let map = mangle(
        &mut files,
        &css_registry(),
        MangleOptions::new("cls-[a-z]+").with_char_set(CharSet::from("x")),
    )
    .unwrap();

    assert_eq!(map["cls-common"], "x");
    assert_eq!(map["cls-rare"], "xx");
    assert_eq!(
        files[0].content,
        ".xx { } .x { } .x:hover { } .x > p { }"
    );
}

#[test]
fn test_replacements_are_unique_and_never_reserved() {
    let stylesheet: String = (0..200).map(|i| format!(".cls-t{i} {{ }}\n")).collect();
    let mut files = vec![WebFile::new("css", stylesheet)];

    let map = mangle(
        &mut files,
        &css_registry(),
        MangleOptions::new("cls-t[0-9]+").with_reserved_names(vec!["a[a-z]*".to_owned()]),
    )
    .unwrap();

    assert_eq!(map.len(), 200);
    let mut values: Vec<&String> = map.values().collect();
    values.sort();
    values.dedup();
    assert_eq!(values.len(), 200);
    assert!(map.values().all(|name| !name.starts_with('a')));
}

#[test]
fn test_mangling_is_deterministic() {
    let source = vec![
        WebFile::new("css", ".cls-b .cls-a { } .cls-c { } .cls-a { }"),
        WebFile::new("html", r#"<div class="cls-c cls-b cls-d">"#),
        WebFile::new("js", r#"el.classList.toggle("cls-d");"#),
    ];

    let run = || {
        let mut files = source.clone();
        mangle(&mut files, &web_registry(), MangleOptions::new("cls-[a-z]")).unwrap();
        files
    };

    assert_eq!(run(), run());
}

#[test]
fn test_mixed_syntaxes_share_one_mapping() {
    let mut files = vec![
        WebFile::new("css", ".cls-card .cls-title { } .cls-card { }"),
        WebFile::new("html", r#"<div class="cls-card"><h1 class="cls-title">"#),
        WebFile::new("js", r#"document.querySelector(".cls-title");"#),
        WebFile::new("md", "Use .cls-card for cards"),
    ];

    mangle(&mut files, &web_registry(), MangleOptions::new("cls-[a-z]+")).unwrap();

    assert_snapshot!(
        files.iter().map(|file| file.content.as_str()).collect::<Vec<_>>().join("\n"),
        @r#"
    .a .b { } .a { }
    <div class="a"><h1 class="b">
    document.querySelector(".b");
    Use .cls-card for cards
    "#
    );
}

#[test]
fn test_collision_with_pending_token() {
    // Every new name is the text of another token that is still pending
    let mut files = vec![WebFile::new("css", ".x .x .x .b .b .c")];

    let map = mangle(
        &mut files,
        &css_registry(),
        MangleOptions::new("[a-z]").with_char_set(CharSet::from("bcx")),
    )
    .unwrap();

    assert_eq!(
        map.iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect::<Vec<_>>(),
        [("x", "b"), ("b", "c"), ("c", "x")]
    );
    assert_eq!(files[0].content, ".b .b .b .c .c .x");
}

#[test]
fn test_ignore_patterns_keep_tokens_untouched() {
    let mut files = vec![WebFile::new(
        "css",
        ".cls-keep-me { } .cls-foo { } .cls-bar { }",
    )];

    mangle(
        &mut files,
        &css_registry(),
        MangleOptions::new("cls-[a-z-]+").with_ignore_patterns(vec!["keep".to_owned()]),
    )
    .unwrap();

    assert_eq!(files[0].content, ".cls-keep-me { } .a { } .b { }");
}

#[test]
fn test_tokens_named_like_generated_names_are_shifted_safely() {
    // Each token is the name the one before it is given
    let no_patterns: &[&str] = &[];
    let names: Vec<String> = NameGenerator::new(&CharSet::lowercase(), no_patterns)
        .unwrap()
        .take(41)
        .collect();
    let selectors = |names: &[String]| {
        names
            .iter()
            .map(|name| format!(".{name}"))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let mut files = vec![WebFile::new("css", selectors(&names[1..]))];

    let map = mangle(&mut files, &css_registry(), MangleOptions::new("[a-z]+")).unwrap();

    assert_eq!(map.len(), 40);
    assert_eq!(files[0].content, selectors(&names[..40]));
}

#[test]
fn test_prefix_is_prepended() {
    let mut files = vec![WebFile::new("css", ".cls-foo { }")];

    mangle(
        &mut files,
        &css_registry(),
        MangleOptions::new("cls-[a-z]+").with_prefix("m-"),
    )
    .unwrap();

    assert_eq!(files[0].content, ".m-a { }");
}

#[test]
fn test_second_run_with_identity_mapping_changes_nothing() {
    let mut files = vec![WebFile::new("css", ".a { } .b { } .a { }")];
    let options = || MangleOptions::new("[a-z]");

    let first = mangle(&mut files, &css_registry(), options()).unwrap();
    assert!(first.is_empty());
    assert_eq!(files[0].content, ".a { } .b { } .a { }");

    let second = mangle(&mut files, &css_registry(), options()).unwrap();
    assert!(second.is_empty());
    assert_eq!(files[0].content, ".a { } .b { } .a { }");
}

#[test]
fn test_empty_char_set_aborts() {
    let mut files = vec![WebFile::new("css", ".cls-foo { }")];

    let err = mangle(
        &mut files,
        &css_registry(),
        MangleOptions::new("cls-[a-z]+").with_char_set(CharSet::from("")),
    )
    .unwrap_err();

    assert!(err.to_string().contains("character set"));
    assert_eq!(files[0].content, ".cls-foo { }");
}

#[test]
fn test_no_files_is_a_no_op() {
    let mut files: Vec<WebFile> = Vec::new();
    let map = mangle(&mut files, &css_registry(), MangleOptions::new("cls-[a-z]+")).unwrap();
    assert!(map.is_empty());
}

/// A matcher that substitutes one key at a time over the whole text, so a
/// later key can see the output of an earlier one.
#[derive(Debug)]
struct SequentialMatcher;

impl TokenMatcher for SequentialMatcher {
    fn find_all(&self, content: &str, pattern: &str) -> anyhow::Result<Vec<String>> {
        css::class_selectors()?.find_all(content, pattern)
    }

    fn replace_all(
        &self,
        content: &str,
        mapping: &FxIndexMap<String, String>,
    ) -> anyhow::Result<String> {
        let mut content = content.to_owned();
        for (from, to) in mapping {
            content = content.replace(&format!(".{from} "), &format!(".{to} "));
        }
        Ok(content)
    }
}

#[test]
fn test_two_phases_protect_sequential_matchers() {
    let registry = MatcherRegistry::new().with("css", SequentialMatcher);
    let mut files = vec![WebFile::new("css", ".foo { } .bar { }")];
    let mangle_map: MangleMap = [
        ("foo".to_owned(), "bar".to_owned()),
        ("bar".to_owned(), "baz".to_owned()),
    ]
    .into_iter()
    .collect();

    // A single pass would turn `.foo` into `.bar` and then both into `.baz`
    let naive = SequentialMatcher
        .replace_all(&files[0].content, &mangle_map)
        .unwrap();
    assert_eq!(naive, ".baz { } .baz { }");

    rewrite_files(&mut files, &registry, &mangle_map).unwrap();
    assert_eq!(files[0].content, ".bar { } .baz { }");
}
