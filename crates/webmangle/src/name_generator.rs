//! Deterministic generation of short replacement names
//!
//! Names are produced by counting in bijective base-k over the configured
//! character set: every single character first, then every two-character
//! combination, and so on. There is no "zero" digit, so no two positions of
//! the sequence ever produce the same string.

use anyhow::{Context, Result, bail};
use log::trace;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::types::FxIndexSet;

/// Ordered alphabet used to build names
///
/// Duplicate characters are collapsed to their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    chars: Vec<char>,
}

impl CharSet {
    /// The default alphabet: `a` through `z`
    pub fn lowercase() -> Self {
        ('a'..='z').collect()
    }

    /// Alphabet used for temporary staging names
    pub fn alphanumeric() -> Self {
        ('a'..='z').chain('A'..='Z').chain('0'..='9').collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let unique: FxIndexSet<char> = iter.into_iter().collect();
        Self {
            chars: unique.into_iter().collect(),
        }
    }
}

impl From<&str> for CharSet {
    fn from(value: &str) -> Self {
        value.chars().collect()
    }
}

impl Default for CharSet {
    fn default() -> Self {
        Self::lowercase()
    }
}

/// Produces an infinite, strictly ordered sequence of unique names
///
/// A candidate is skipped when it fully matches any reserved pattern or is
/// one of the excluded literals. Skipped candidates still advance the
/// sequence, so the next call continues after them.
#[derive(Debug)]
pub struct NameGenerator {
    chars: Vec<char>,
    reserved: Vec<Regex>,
    excluded: FxHashSet<String>,
    /// Digits of the most recently produced candidate, most significant first
    digits: Vec<usize>,
}

impl NameGenerator {
    /// Create a generator over `char_set`, rejecting names that fully match
    /// any entry of `reserved`
    pub fn new<S: AsRef<str>>(char_set: &CharSet, reserved: &[S]) -> Result<Self> {
        if char_set.is_empty() {
            bail!("Invalid configuration: the character set for name generation is empty");
        }

        let reserved = reserved
            .iter()
            .map(|entry| {
                let entry = entry.as_ref();
                Regex::new(&format!("^(?:{entry})$"))
                    .with_context(|| format!("Invalid reserved name pattern '{entry}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            chars: char_set.chars().to_vec(),
            reserved,
            excluded: FxHashSet::default(),
            digits: Vec::new(),
        })
    }

    /// Never produce any of the given literal strings
    #[must_use]
    pub fn exclude<I, S>(mut self, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(literals.into_iter().map(Into::into));
        self
    }

    /// Return the next name that is neither reserved nor excluded
    pub fn next_name(&mut self) -> String {
        loop {
            self.advance();
            let candidate: String = self.digits.iter().map(|&digit| self.chars[digit]).collect();
            if self.is_rejected(&candidate) {
                trace!("Skipping reserved name candidate '{candidate}'");
                continue;
            }
            return candidate;
        }
    }

    fn is_rejected(&self, candidate: &str) -> bool {
        self.excluded.contains(candidate)
            || self.reserved.iter().any(|pattern| pattern.is_match(candidate))
    }

    /// Odometer step: bump the rightmost digit, carrying leftwards, and grow
    /// by one position once every digit has rolled over.
    fn advance(&mut self) {
        let last = self.chars.len() - 1;
        for digit in self.digits.iter_mut().rev() {
            if *digit < last {
                *digit += 1;
                return;
            }
            *digit = 0;
        }
        self.digits.insert(0, 0);
    }
}

impl Iterator for NameGenerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_name())
    }
}
