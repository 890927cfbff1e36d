//! Source directory resolution and validation

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Normalize an ordered list of source directories.
///
/// Empty entries are discarded. An entry resolving to an already-kept
/// directory is dropped with a warning; the first occurrence wins and keeps
/// the caller's original spelling. Existence is deliberately not checked
/// here: a missing directory is reported by [`ensure_directory`] at
/// retrieval time, so the failure names the directory a specific retrieval
/// tripped over.
pub fn resolve_conf_paths<I, P>(paths: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut kept: Vec<PathBuf> = Vec::new();
    let mut resolved: Vec<PathBuf> = Vec::new();

    for path in paths {
        let path = path.into();
        if path.as_os_str().is_empty() {
            continue;
        }
        let canonical = canonical_form(&path);
        if resolved.contains(&canonical) {
            tracing::warn!(
                "Duplicate environment detected! Skipping re-loading from configuration path: {}",
                path.display()
            );
            continue;
        }
        resolved.push(canonical);
        kept.push(path);
    }

    if kept.is_empty() {
        return Err(ConfigError::EmptyConfPaths);
    }
    Ok(kept)
}

/// Canonical form used only for duplicate comparison. A path that does not
/// exist yet cannot be canonicalized and compares by its literal value.
pub fn canonical_form(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Retrieval-time check that a listed source directory is usable.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(ConfigError::BadConfigPath { path: path.to_path_buf() });
    }
    Ok(())
}
