//! Traits describing read-only reference data and injected capabilities.
//!
//! The resolver needs two things it does not own: the static species
//! and move catalog ([`ContentOracle`]) and a randomness source for
//! initiative ties ([`RngOracle`]). Both are trait seams so the
//! runtime can wire real implementations while tests inject fixtures.

mod content;
mod rng;

pub use content::{ContentOracle, MoveTemplate, UnitTemplate};
pub use rng::{FixedCoin, RngOracle};
