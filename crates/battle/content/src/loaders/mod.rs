//! Content loaders for reading battle data from files.
//!
//! Loaders convert RON/TOML files into the catalog and config types
//! the runtime wires into its oracles.

pub mod config;
pub mod roster;

pub use config::ConfigLoader;
pub use roster::{RosterCatalog, RosterLoader, UnitEntry};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
