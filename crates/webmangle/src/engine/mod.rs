//! The mangling engine
//!
//! One invocation runs a fixed pipeline over a set of files:
//!
//! 1. normalize the options
//! 2. count every token the matchers find for the configured patterns
//! 3. drop tokens containing an ignore pattern
//! 4. allocate names, most frequent token first
//! 5. rewrite the files in two collision-safe phases
//!
//! Nothing is kept between invocations. Several invocations over the same
//! files must run one after the other, each seeing the output of the last.

pub mod counter;
pub mod mangle_map;
pub mod rewrite;

#[cfg(test)]
mod tests;

use anyhow::Result;
use log::debug;

pub use counter::{count_instances, drop_ignored};
pub use mangle_map::build_mangle_map;
pub use rewrite::{TwoPhaseMapping, needs_staging, rewrite_files};

use crate::{
    matcher::MatcherRegistry,
    options::MangleOptions,
    types::{MangleMap, WebFile},
};

/// Mangle `files` in place and return the mapping that was applied
pub fn mangle(
    files: &mut [WebFile],
    registry: &MatcherRegistry,
    options: MangleOptions,
) -> Result<MangleMap> {
    let options = options.normalize();
    debug!(
        "Mangling {} files with patterns {:?}",
        files.len(),
        options.patterns
    );

    let counts = count_instances(files, registry, &options.patterns)?;
    let counts = drop_ignored(counts, &options.ignore_patterns)?;
    let mangle_map = build_mangle_map(&counts, &options)?;
    rewrite_files(files, registry, &mangle_map)?;

    Ok(mangle_map)
}
