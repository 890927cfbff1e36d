//! Config loader orchestration

use std::collections::HashSet;
use std::path::PathBuf;

use crate::discover;
use crate::error::{ConfigError, Result};
use crate::merge;
use crate::parse::{self, ConfigMap};
use crate::paths;

/// Loads configuration from an ordered stack of source directories.
///
/// Each directory ("environment") is searched with the same glob patterns.
/// Files within one directory must not redefine each other's top-level
/// keys; across directories, later entries override earlier ones key by
/// key, which is how `local` overrides `base`.
///
/// The directory list is fixed at construction. Retrievals carry no state
/// between calls; the set of already-processed files is rebuilt for every
/// [`get`](ConfigLoader::get).
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    conf_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader over one or more source directories.
    ///
    /// Duplicate directories (by resolved path, any spelling) collapse to
    /// their first occurrence with a warning. Existence is checked at
    /// retrieval time, not here.
    pub fn new<I, P>(conf_paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Ok(Self { conf_paths: paths::resolve_conf_paths(conf_paths)? })
    }

    /// The stored source directories, duplicates collapsed, order preserved.
    pub fn conf_paths(&self) -> &[PathBuf] {
        &self.conf_paths
    }

    /// Retrieve the configuration matching the given glob patterns.
    ///
    /// Patterns combine as a union within each directory. A file matched
    /// more than once in the same call, whether through overlapping
    /// patterns or through directories that reach the same location, is
    /// folded in exactly once. Fails if a listed directory is unusable, a
    /// matched file does not decode to a mapping, two files in one
    /// directory collide on a top-level key, or nothing matched at all.
    pub fn get<I, S>(&self, patterns: I) -> Result<ConfigMap>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> =
            patterns.into_iter().map(|p| p.as_ref().to_string()).collect();
        if patterns.is_empty() {
            return Err(ConfigError::EmptyPatterns);
        }
        let matcher = discover::build_matcher(&patterns)?;

        let mut accumulator = ConfigMap::new();
        let mut processed: HashSet<PathBuf> = HashSet::new();

        for conf_path in &self.conf_paths {
            paths::ensure_directory(conf_path)?;

            let matched = discover::find_matches(conf_path, &matcher)?;
            let fresh = claim_unprocessed(matched, &mut processed);

            let mut docs = Vec::with_capacity(fresh.len());
            for file in fresh {
                let doc = parse::load_file(&file)?;
                docs.push((file, doc));
            }
            let dir_config = merge::merge_documents(docs)?;

            // Key-wise overwrite: later environments win.
            accumulator.extend(dir_config);
        }

        if accumulator.is_empty() {
            return Err(ConfigError::MissingConfig {
                conf_paths: self.conf_paths.iter().map(|p| p.display().to_string()).collect(),
                patterns,
            });
        }
        Ok(accumulator)
    }
}

/// Drop files already folded into the result earlier in this retrieval and
/// record the remainder. Identity is the canonical path, so the same file
/// reached through two overlapping directories still counts once.
fn claim_unprocessed(matched: Vec<PathBuf>, processed: &mut HashSet<PathBuf>) -> Vec<PathBuf> {
    let mut fresh = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    for file in matched {
        let identity = paths::canonical_form(&file);
        if processed.insert(identity.clone()) {
            fresh.push(file);
        } else {
            skipped.push(identity.display().to_string());
        }
    }

    if !skipped.is_empty() {
        tracing::info!(
            "Config file(s): {} already processed, skipping loading...",
            skipped.join(", ")
        );
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_a_single_directory() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("catalog.yml"), "trains:\n  type: MemoryDataSet\n").unwrap();

        let loader = ConfigLoader::new([tmp.path()]).expect("loader");
        let catalog = loader.get(["catalog*"]).expect("catalog");
        assert_eq!(catalog["trains"], json!({"type": "MemoryDataSet"}));
    }

    #[test]
    fn empty_patterns_are_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let loader = ConfigLoader::new([tmp.path()]).expect("loader");
        let err = loader.get(Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPatterns));
    }

    #[test]
    fn missing_directory_fails_before_any_matching() {
        let tmp = TempDir::new().expect("tmp");
        let missing = tmp.path().join("base");
        let loader = ConfigLoader::new([&missing]).expect("loader");
        let err = loader.get(["catalog*"]).unwrap_err();
        assert!(matches!(err, ConfigError::BadConfigPath { path } if path == missing));
    }

    #[test]
    fn nothing_matched_is_missing_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("catalog.yml"), "a: 1").unwrap();

        let loader = ConfigLoader::new([tmp.path()]).expect("loader");
        let err = loader.get(["non-existent-pattern"]).unwrap_err();
        match err {
            ConfigError::MissingConfig { conf_paths, patterns } => {
                assert_eq!(conf_paths, vec![tmp.path().display().to_string()]);
                assert_eq!(patterns, vec!["non-existent-pattern"]);
            }
            other => panic!("expected MissingConfig, got {other:?}"),
        }
    }

    #[test]
    fn claim_unprocessed_skips_previously_seen_files() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("catalog.yml");
        fs::write(&file, "a: 1").unwrap();

        let mut processed = HashSet::new();
        let first = claim_unprocessed(vec![file.clone()], &mut processed);
        assert_eq!(first, vec![file.clone()]);
        let second = claim_unprocessed(vec![file], &mut processed);
        assert!(second.is_empty());
    }
}
