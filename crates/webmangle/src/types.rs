//! Shared type definitions for the webmangle crate
//!
//! This module contains the file record and the ordered map aliases used by
//! every stage of the mangling pipeline.

use std::hash::BuildHasherDefault;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

/// Type alias for IndexMap with FxHasher for better performance
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
/// Type alias for IndexSet with FxHasher for better performance
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Token text -> number of occurrences, in discovery order
pub type InstanceCounts = FxIndexMap<String, usize>;

/// Original token -> replacement, in the order the replacements were allocated
pub type MangleMap = FxIndexMap<String, String>;

/// A single source document handed to the engine
///
/// Only `content` is ever replaced; the record itself keeps its identity
/// for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebFile {
    /// Syntax kind used to look up matchers (e.g., "css", "html", "js")
    pub syntax_kind: String,
    /// Current text of the document
    pub content: String,
}

impl WebFile {
    pub fn new(syntax_kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            syntax_kind: syntax_kind.into(),
            content: content.into(),
        }
    }
}
