//! Glob-based file discovery within one source directory

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{ConfigError, Result};

/// Compile a retrieval request's patterns into one union matcher.
///
/// `*` stays within a path component; `**` crosses components, so
/// `**/catalog*` also matches a root-level `catalog.yml` and `catalog*/**`
/// matches everything beneath a `catalog…` subdirectory.
pub fn build_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern).literal_separator(true).build().map_err(
            |source| ConfigError::InvalidPattern { pattern: pattern.clone(), source },
        )?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|source| ConfigError::InvalidPattern { pattern: patterns.join(", "), source })
}

/// Return the regular files under `dir` whose path relative to `dir`
/// matches at least one pattern.
///
/// Matching uses forward slashes regardless of platform. Results are
/// sorted by relative path so discovery order, and therefore merge order
/// and conflict reports, are stable everywhere. A traversal failure, such
/// as an unreadable subdirectory, surfaces as an I/O error rather than
/// silently shrinking the match set.
pub fn find_matches(dir: &Path, matcher: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut matched: Vec<(String, PathBuf)> = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = match entry.path().strip_prefix(dir) {
            Ok(p) => normalize_path(&p.to_string_lossy()),
            Err(_) => continue,
        };
        if matcher.is_match(&rel) {
            matched.push((rel, entry.into_path()));
        }
    }

    matched.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(matched.into_iter().map(|(_, path)| path).collect())
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
