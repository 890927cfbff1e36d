//! Error types for configuration loading.
//!
//! One variant per failure kind callers need to tell apart: bad
//! construction input, bad retrieval input, an unusable source directory,
//! an unparsable file, a duplicate-key conflict, and the distinct
//! "nothing matched anywhere" case.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Cap on key names listed per conflicting file in error messages.
const MAX_REPORTED_KEYS: usize = 3;

/// One earlier file's side of a duplicate-key conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConflict {
    /// File that already defined the keys.
    pub file: PathBuf,
    /// Sorted top-level keys defined by both files.
    pub keys: Vec<String>,
}

impl fmt::Display for KeyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<&str> =
            self.keys.iter().take(MAX_REPORTED_KEYS).map(String::as_str).collect();
        write!(f, "- {}: {}", self.file.display(), shown.join(", "))?;
        if self.keys.len() > MAX_REPORTED_KEYS {
            write!(f, ", ...")?;
        }
        Ok(())
    }
}

fn fmt_conflicts(conflicts: &[KeyConflict]) -> String {
    conflicts.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// Errors raised while resolving directories, discovering files, parsing
/// content, or merging documents.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The loader was constructed without any source directory.
    #[error("`conf_paths` must contain at least one path to load configuration files from")]
    EmptyConfPaths,

    /// A retrieval was requested without any glob pattern.
    #[error("`patterns` must contain at least one glob pattern to match config filenames against")]
    EmptyPatterns,

    /// A listed source directory is missing or not a directory,
    /// discovered at retrieval time.
    #[error("Given configuration path either does not exist or is not a valid directory: {}", .path.display())]
    BadConfigPath { path: PathBuf },

    /// A supplied glob pattern could not be compiled.
    #[error("Invalid glob pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A matched file could not be decoded into a top-level mapping.
    #[error("Couldn't load config file: {}: {message}", .path.display())]
    BadConfigFile { path: PathBuf, message: String },

    /// Two files in the same source directory define the same
    /// non-hidden top-level key.
    #[error("Duplicate keys found in {} and:\n{}", .file.display(), fmt_conflicts(.conflicts))]
    DuplicateKeys { file: PathBuf, conflicts: Vec<KeyConflict> },

    /// Every directory was processed and nothing matched.
    #[error("No files found in {conf_paths:?} matching the glob pattern(s): {patterns:?}")]
    MissingConfig { conf_paths: Vec<String>, patterns: Vec<String> },

    /// A file or directory read failed below the parsing layer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn key_conflict_lists_all_keys_when_few() {
        let conflict = KeyConflict {
            file: PathBuf::from("/conf/base/catalog1.yml"),
            keys: vec!["cars".into(), "trains".into()],
        };
        assert_eq!(conflict.to_string(), "- /conf/base/catalog1.yml: cars, trains");
    }

    #[test]
    fn key_conflict_truncates_long_key_lists() {
        let conflict = KeyConflict {
            file: PathBuf::from("old.yml"),
            keys: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
        };
        assert_eq!(conflict.to_string(), "- old.yml: a, b, c, ...");
    }

    #[test]
    fn duplicate_keys_message_groups_per_file() {
        let err = ConfigError::DuplicateKeys {
            file: PathBuf::from("catalog3.yml"),
            conflicts: vec![
                KeyConflict { file: PathBuf::from("catalog1.yml"), keys: vec!["k1".into()] },
                KeyConflict { file: PathBuf::from("catalog2.yml"), keys: vec!["k3".into()] },
            ],
        };
        let message = err.to_string();
        assert!(message.starts_with("Duplicate keys found in catalog3.yml and:\n"));
        assert!(message.contains("- catalog1.yml: k1\n"));
        assert!(message.ends_with("- catalog2.yml: k3"));
    }

    #[test]
    fn missing_config_names_paths_and_patterns() {
        let err = ConfigError::MissingConfig {
            conf_paths: vec!["/conf/base".into(), "/conf/local".into()],
            patterns: vec!["non-existent-pattern".into()],
        };
        let message = err.to_string();
        assert!(message.contains("/conf/base"));
        assert!(message.contains("non-existent-pattern"));
    }
}
