//! Allocation of replacement names

use anyhow::Result;
use log::{debug, trace};

use crate::{
    name_generator::NameGenerator,
    options::NormalizedOptions,
    types::{InstanceCounts, MangleMap},
};

/// Assign every counted token a new name, most frequent tokens first
///
/// The sort is stable, so tokens with equal counts keep their discovery
/// order. Tokens whose new name equals their current text are left out.
pub fn build_mangle_map(counts: &InstanceCounts, options: &NormalizedOptions) -> Result<MangleMap> {
    let mut names = NameGenerator::new(&options.char_set, &options.reserved_names)?;

    let mut by_frequency: Vec<(&String, usize)> =
        counts.iter().map(|(token, &count)| (token, count)).collect();
    by_frequency.sort_by(|(_, a), (_, b)| b.cmp(a));

    let mut mangle_map = MangleMap::default();
    for (token, count) in by_frequency {
        let replacement = format!("{}{}", options.mangle_prefix, names.next_name());
        trace!("'{token}' ({count} occurrences) -> '{replacement}'");
        if replacement != *token {
            mangle_map.insert(token.clone(), replacement);
        }
    }

    debug!("Allocated {} replacement names", mangle_map.len());
    Ok(mangle_map)
}
