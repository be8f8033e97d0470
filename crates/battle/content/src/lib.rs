//! Data-driven battle content and loaders.
//!
//! This crate houses static reference data for the battle system and
//! provides loaders for its data files:
//! - Roster catalogs: unit templates, move templates, and learnsets
//!   (data-driven via RON)
//! - Balance configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime's oracle implementations and
//! never appears in match state.
//!
//! All loaders use battle-core types directly with serde for
//! RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, RosterCatalog, RosterLoader, UnitEntry};
