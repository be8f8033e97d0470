//! Unified error types surfaced by the match service.
//!
//! Every variant is an expected, recoverable-at-the-boundary
//! condition; the API layer maps them 1:1 to responses. Any failure
//! aborts the in-flight store transaction before it surfaces, so no
//! partial mutation is ever committed.

use std::fmt;

use battle_core::{MatchId, MatchState, MoveId, PlayerId, SquadId};
use thiserror::Error;

pub use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Debug, Error)]
pub enum MatchError {
    /// Action submitted against a missing, pending, or completed match.
    #[error("match {0} is not in progress")]
    MatchNotInProgress(MatchId),

    /// The acting player is not the current actor.
    #[error("it is not player {player}'s turn in match {match_id}")]
    WrongTurn { match_id: MatchId, player: PlayerId },

    #[error("illegal move: {reason}")]
    IllegalMove { reason: IllegalMoveReason },

    /// Match lifecycle precondition violated.
    #[error("match {match_id} is {state}, expected {expected}")]
    InvalidState {
        match_id: MatchId,
        state: MatchState,
        expected: MatchState,
    },

    #[error("squad {0} has no units")]
    SquadEmpty(SquadId),

    #[error("squad {squad} is malformed: {detail}")]
    SquadMalformed {
        squad: SquadId,
        detail: &'static str,
    },

    /// Underlying persistence failure. Serialization conflicts
    /// ([`StoreError::is_conflict`]) should be retried by the caller a
    /// bounded number of times; the service never retries internally.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a submitted move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    NoSideForPlayer,
    NoOpponentSide,
    NoActiveUnit,
    TargetAlreadyDown,
    UnknownSpecies,
    UnknownMove(MoveId),
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSideForPlayer => write!(f, "no side found for acting player"),
            Self::NoOpponentSide => write!(f, "no opponent side found"),
            Self::NoActiveUnit => write!(f, "no active unit found for side"),
            Self::TargetAlreadyDown => write!(f, "opponent's active unit is already knocked out"),
            Self::UnknownSpecies => write!(f, "acting unit's species is not in the catalog"),
            Self::UnknownMove(id) => write!(f, "unit does not know move {}", id),
        }
    }
}

impl From<IllegalMoveReason> for MatchError {
    fn from(reason: IllegalMoveReason) -> Self {
        Self::IllegalMove { reason }
    }
}
