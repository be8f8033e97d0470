//! Match state types persisted by the store.
//!
//! These are the rows the runtime reads and writes: the match itself,
//! one side per player, the instantiated units, and the append-only
//! turn log. Static species/move templates live in [`crate::env`].

mod battle;
mod common;
mod turn;

pub use battle::{Match, MatchSide, MatchUnit, TurnRecord};
pub use common::{
    InvalidTransition, MatchId, MatchState, MatchUnitId, MoveId, PlayerId, SideId, SquadId, UnitId,
};
pub use turn::TurnNumber;
