//! Built-in manglers
//!
//! A mangler is nothing more than a set of default options plus the matchers
//! that know where its kind of token lives in each syntax. Running several
//! manglers over the same files happens strictly in sequence.

use anyhow::{Context, Result};
use log::info;

use crate::{
    engine,
    languages::{CSS, HTML, JS, css, html, js},
    matcher::MatcherRegistry,
    options::MangleOptions,
    types::{MangleMap, WebFile},
};

/// The kinds of token webmangle can rename out of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInMangler {
    /// CSS class names
    Classes,
    /// Element ids
    Ids,
    /// HTML attribute names
    Attributes,
    /// CSS custom properties
    CssVariables,
}

impl BuiltInMangler {
    /// Every built-in mangler, in the order they run
    pub const ALL: [Self; 4] = [Self::Classes, Self::Ids, Self::Attributes, Self::CssVariables];

    pub fn name(self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Ids => "ids",
            Self::Attributes => "attributes",
            Self::CssVariables => "css-variables",
        }
    }

    pub fn default_options(self) -> MangleOptions {
        match self {
            Self::Classes => MangleOptions::new("cls-[a-zA-Z0-9_-]+"),
            Self::Ids => MangleOptions::new("id-[a-zA-Z0-9_-]+"),
            Self::Attributes => MangleOptions::new("data-[a-z0-9-]+").with_prefix("data-"),
            Self::CssVariables => MangleOptions::new("[a-zA-Z0-9_-]+"),
        }
    }

    /// Matchers for every syntax this mangler understands
    pub fn matchers(self) -> Result<MatcherRegistry> {
        let registry = match self {
            Self::Classes => MatcherRegistry::new()
                .with(CSS, css::class_selectors()?)
                .with(HTML, html::class_attributes()?)
                .with(JS, js::string_identifiers()?),
            Self::Ids => MatcherRegistry::new()
                .with(CSS, css::id_selectors()?)
                .with(HTML, html::id_attributes()?)
                .with(JS, js::string_identifiers()?),
            Self::Attributes => MatcherRegistry::new()
                .with(CSS, css::attribute_selectors()?)
                .with(HTML, html::attribute_names()?)
                .with(JS, js::string_identifiers()?),
            Self::CssVariables => MatcherRegistry::new()
                .with(CSS, css::custom_properties()?)
                .with(JS, js::string_custom_properties()?),
        };
        Ok(registry)
    }
}

impl std::fmt::Display for BuiltInMangler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A built-in mangler together with the options it runs with
#[derive(Debug, Clone)]
pub struct Mangler {
    pub kind: BuiltInMangler,
    pub options: MangleOptions,
}

impl Mangler {
    /// A mangler using the kind's default options
    pub fn new(kind: BuiltInMangler) -> Self {
        Self {
            kind,
            options: kind.default_options(),
        }
    }

    pub fn with_options(kind: BuiltInMangler, options: MangleOptions) -> Self {
        Self { kind, options }
    }

    /// Mangle `files` in place and return the mapping that was applied
    pub fn run(&self, files: &mut [WebFile]) -> Result<MangleMap> {
        let registry = self.kind.matchers()?;
        engine::mangle(files, &registry, self.options.clone())
            .with_context(|| format!("Failed to mangle {}", self.kind))
    }
}

/// Run `manglers` one after the other over the same files
///
/// Each mangler sees the content produced by the one before it.
pub fn mangle_all(
    files: &mut [WebFile],
    manglers: &[Mangler],
) -> Result<Vec<(BuiltInMangler, MangleMap)>> {
    let mut applied = Vec::with_capacity(manglers.len());
    for mangler in manglers {
        let mangle_map = mangler.run(files)?;
        info!("Mangled {} {}", mangle_map.len(), mangler.kind);
        applied.push((mangler.kind, mangle_map));
    }
    Ok(applied)
}
