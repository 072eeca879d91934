//! Collision-safe renaming of class names, ids, attributes and CSS custom
//! properties across CSS, HTML and JavaScript sources.

pub mod config;
pub mod engine;
pub mod files;
pub mod languages;
pub mod manglers;
pub mod matcher;
pub mod name_generator;
pub mod options;
pub mod types;

pub use engine::mangle;
pub use manglers::{BuiltInMangler, Mangler, mangle_all};
pub use matcher::{MatcherRegistry, RegexMatcher, TokenMatcher};
pub use name_generator::{CharSet, NameGenerator};
pub use options::{MangleOptions, NormalizedOptions, Patterns};
pub use types::{MangleMap, WebFile};
