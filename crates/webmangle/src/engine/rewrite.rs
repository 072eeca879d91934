//! Collision-safe application of a mangle map
//!
//! A replacement may be the text of another token that is itself still
//! waiting to be replaced (`foo -> bar` while `bar -> baz`). Applying such a
//! map in one go is only correct if the matcher never substitutes its own
//! output, so the map is first split into two phases: tokens whose target is
//! another pending token are moved to a temporary name in phase 1 and on to
//! their target in phase 2. Temporary names are never a current key, a
//! current value or a token already present in the content.

use anyhow::Result;
use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::{
    matcher::MatcherRegistry,
    name_generator::{CharSet, NameGenerator},
    types::{MangleMap, WebFile},
};

/// Any token text a matcher can report
const ANY_TOKEN: &str = r"[\s\S]*";

/// Temporary names must still read as identifiers to the matchers that wrote
/// them, and no built-in syntax starts an identifier with a digit
const TEMPORARY_RESERVED: &[&str] = &["[0-9].*"];

/// A mangle map split into two passes that cannot interfere with each other
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwoPhaseMapping {
    /// Original token -> final name, or temporary name when staged
    pub phase1: MangleMap,
    /// Temporary name -> final name
    pub phase2: MangleMap,
}

impl TwoPhaseMapping {
    /// Split `mangle_map`, drawing temporary names that avoid every entry of
    /// the map and every token in `occupied`
    pub fn from_mangle_map(mangle_map: &MangleMap, occupied: &FxHashSet<String>) -> Result<Self> {
        let mangle_map: MangleMap = mangle_map
            .iter()
            .filter(|(original, mangled)| original != mangled)
            .map(|(original, mangled)| (original.clone(), mangled.clone()))
            .collect();

        let mut temporary_names =
            NameGenerator::new(&CharSet::alphanumeric(), TEMPORARY_RESERVED)?
                .exclude(mangle_map.values().cloned())
                .exclude(mangle_map.keys().cloned())
                .exclude(occupied.iter().cloned());

        let mut mapping = Self::default();
        for (original, mangled) in &mangle_map {
            if mangle_map.contains_key(mangled) {
                let temporary = temporary_names.next_name();
                trace!("Staging '{original}' -> '{temporary}' -> '{mangled}'");
                mapping.phase1.insert(original.clone(), temporary.clone());
                mapping.phase2.insert(temporary, mangled.clone());
            } else {
                mapping.phase1.insert(original.clone(), mangled.clone());
            }
        }

        Ok(mapping)
    }
}

/// Whether any replacement is also the text of a token pending replacement
pub fn needs_staging(mangle_map: &MangleMap) -> bool {
    mangle_map
        .iter()
        .any(|(original, mangled)| original != mangled && mangle_map.contains_key(mangled))
}

/// Rewrite every file so each key of `mangle_map` becomes its value
pub fn rewrite_files(
    files: &mut [WebFile],
    registry: &MatcherRegistry,
    mangle_map: &MangleMap,
) -> Result<()> {
    if files.is_empty() || mangle_map.is_empty() {
        return Ok(());
    }

    let occupied = if needs_staging(mangle_map) {
        visible_tokens(files, registry)?
    } else {
        FxHashSet::default()
    };
    let mapping = TwoPhaseMapping::from_mangle_map(mangle_map, &occupied)?;
    debug!(
        "Rewriting {} files: {} direct replacements, {} staged",
        files.len(),
        mapping.phase1.len() - mapping.phase2.len(),
        mapping.phase2.len()
    );

    apply_phase(files, registry, &mapping.phase1)?;
    apply_phase(files, registry, &mapping.phase2)
}

fn apply_phase(files: &mut [WebFile], registry: &MatcherRegistry, phase: &MangleMap) -> Result<()> {
    if phase.is_empty() {
        return Ok(());
    }

    for file in files.iter_mut() {
        for matcher in registry.matchers_for(&file.syntax_kind) {
            file.content = matcher.replace_all(&file.content, phase)?;
        }
    }
    Ok(())
}

/// Every token any matcher reports in the current content
fn visible_tokens(files: &[WebFile], registry: &MatcherRegistry) -> Result<FxHashSet<String>> {
    let mut tokens = FxHashSet::default();
    for file in files {
        for matcher in registry.matchers_for(&file.syntax_kind) {
            tokens.extend(matcher.find_all(&file.content, ANY_TOKEN)?);
        }
    }
    Ok(tokens)
}
