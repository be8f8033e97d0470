//! Store layer for dynamic match state.
//!
//! The store handles data that CHANGES during a match: the match row,
//! sides, instantiated units, and the append-only turn log. Static
//! content (unit species, move templates) is handled by oracles, not
//! the store.
//!
//! Every logical action runs inside one [`StoreTx`]; dropping the
//! handle without committing rolls the whole action back.

mod error;
mod memory;
mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use traits::{NewMatchUnit, NewSide, SquadMember, Store, StoreTx};
