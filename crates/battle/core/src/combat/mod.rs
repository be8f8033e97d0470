//! Turn resolution rules.
//!
//! Pure functions for the two numeric decisions a turn involves:
//! how much damage a move deals and who acts first in a round. The
//! runtime's resolver calls these against rows it loaded from the
//! store; nothing here touches state or performs I/O.

pub mod damage;
pub mod initiative;
pub mod result;

pub use damage::{apply_damage, calculate_damage};
pub use initiative::first_mover;
pub use result::{TurnOutcome, TurnProgress};
