//! Per-directory document merging with duplicate-key detection

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::error::{ConfigError, KeyConflict, Result};
use crate::parse::ConfigMap;

/// Merge the documents discovered in one source directory.
///
/// Top-level keys starting with `_` are hidden: dropped before merging and
/// never counted as conflicts. A surviving key defined by two different
/// files aborts the merge; every conflicting key the offending file shares
/// with each earlier contributor is reported in one error.
pub fn merge_documents(docs: Vec<(PathBuf, ConfigMap)>) -> Result<ConfigMap> {
    let mut merged = ConfigMap::new();
    let mut contributors: HashMap<String, PathBuf> = HashMap::new();

    for (file, doc) in docs {
        // Grouped per earlier file, ordered for stable reporting.
        let mut conflicts: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
        for key in doc.keys() {
            if is_hidden(key) {
                continue;
            }
            if let Some(owner) = contributors.get(key) {
                if *owner != file {
                    conflicts.entry(owner.clone()).or_default().push(key.clone());
                }
            }
        }
        if !conflicts.is_empty() {
            let conflicts = conflicts
                .into_iter()
                .map(|(other, mut keys)| {
                    keys.sort();
                    KeyConflict { file: other, keys }
                })
                .collect();
            return Err(ConfigError::DuplicateKeys { file, conflicts });
        }

        for (key, value) in doc {
            if is_hidden(&key) {
                continue;
            }
            contributors.insert(key.clone(), file.clone());
            merged.insert(key, value);
        }
    }

    Ok(merged)
}

fn is_hidden(key: &str) -> bool {
    key.starts_with('_')
}
