//! Turn resolution result types.

use crate::state::{PlayerId, TurnNumber};

/// Where the match stands after a resolved turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnProgress {
    /// The match continues; this player acts next.
    Continues { next_actor: PlayerId },
    /// The knockout left no replacement; the match is complete.
    Completed { winner: PlayerId },
}

/// Summary of one successfully applied turn.
///
/// Mirrors the persisted turn record plus the scheduling decision, so
/// the caller can report the action without re-fetching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    /// The turn this action was applied as (pre-increment counter).
    pub turn_number: TurnNumber,
    pub damage: u32,
    pub target_hp_after: u32,
    pub did_ko_target: bool,
    pub progress: TurnProgress,
}
