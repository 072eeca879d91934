//! Reading and writing the files of a mangling run

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::{languages::syntax_kind_for_path, types::WebFile};

/// A file on disk together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path the file was read from
    pub path: PathBuf,
    /// Path relative to the input it was found under
    pub relative: PathBuf,
    pub file: WebFile,
}

/// Read every supported file named by `inputs`
///
/// Files are taken as given (and skipped with a warning when their syntax is
/// not supported); directories are walked recursively and unsupported files
/// inside them are skipped silently. Within a directory, files are visited in
/// name order so a run is reproducible.
pub fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("Failed to walk {}", input.display()))?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if let Some(syntax_kind) = syntax_kind_for_path(path) {
                    let relative = path.strip_prefix(input).unwrap_or(path).to_path_buf();
                    sources.push(read_source(path, relative, syntax_kind)?);
                }
            }
        } else if let Some(syntax_kind) = syntax_kind_for_path(input) {
            let relative = input
                .file_name()
                .map_or_else(|| input.clone(), PathBuf::from);
            sources.push(read_source(input, relative, syntax_kind)?);
        } else {
            warn!("Skipping {}: unsupported file type", input.display());
        }
    }

    debug!("Collected {} source files", sources.len());
    Ok(sources)
}

fn read_source(path: &Path, relative: PathBuf, syntax_kind: &str) -> Result<SourceFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        relative,
        file: WebFile::new(syntax_kind, content),
    })
}

/// Where a source should be written: next to itself, or mirrored into
/// `out_dir`
pub fn output_path(source: &SourceFile, out_dir: Option<&Path>) -> PathBuf {
    out_dir.map_or_else(|| source.path.clone(), |dir| dir.join(&source.relative))
}

/// Write a mangled source to `path`, creating parent directories as needed
pub fn write_source(source: &SourceFile, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, &source.file.content)
        .with_context(|| format!("Failed to write {}", path.display()))
}
