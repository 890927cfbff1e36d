//! conf-stack: layered configuration loading
//!
//! Discovers configuration files across an ordered list of source
//! directories ("environments") by glob pattern, parses YAML and JSON into
//! nested mappings, and merges them with deterministic precedence: files
//! within one directory must not collide on top-level keys, while later
//! directories override earlier ones key by key. Keys starting with `_`
//! are hidden and never reach the merged result.
//!
//! ```no_run
//! use conf_stack::ConfigLoader;
//!
//! # fn main() -> conf_stack::Result<()> {
//! let loader = ConfigLoader::new(["conf/base", "conf/local"])?;
//! let catalog = loader.get(["catalog*", "catalog*/**"])?;
//! # Ok(())
//! # }
//! ```

pub mod discover;
pub mod error;
pub mod loader;
pub mod merge;
pub mod parse;
pub mod paths;

pub use error::{ConfigError, KeyConflict, Result};
pub use loader::ConfigLoader;
pub use parse::{ConfigMap, Format};
