use std::fmt;

/// Unique identifier of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchId(pub i64);

/// Unique identifier of a player account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub i64);

/// Unique identifier of a player-built squad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquadId(pub i64);

/// Unique identifier of a static unit template (species).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitId(pub i64);

/// Unique identifier of a static move template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MoveId(pub i64);

/// Unique identifier of one player's side within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideId(pub i64);

/// Unique identifier of a unit instantiated into a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchUnitId(pub i64);

macro_rules! impl_id_display {
    ($($id:ident),* $(,)?) => {
        $(impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        })*
    };
}

impl_id_display!(MatchId, PlayerId, SquadId, UnitId, MoveId, SideId, MatchUnitId);

/// Lifecycle state of a match.
///
/// The only legal transitions are PENDING → IN_PROGRESS → COMPLETED;
/// COMPLETED is terminal and a completed match is never mutated again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchState {
    Pending,
    InProgress,
    Completed,
}

impl MatchState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchState::Pending => "PENDING",
            MatchState::InProgress => "IN_PROGRESS",
            MatchState::Completed => "COMPLETED",
        }
    }

    /// Returns true if no further transitions are possible.
    pub const fn is_terminal(self) -> bool {
        matches!(self, MatchState::Completed)
    }

    /// Validates a lifecycle transition, returning the new state.
    ///
    /// Anything other than PENDING → IN_PROGRESS or
    /// IN_PROGRESS → COMPLETED is rejected.
    pub fn transition(self, next: MatchState) -> Result<MatchState, InvalidTransition> {
        match (self, next) {
            (MatchState::Pending, MatchState::InProgress)
            | (MatchState::InProgress, MatchState::Completed) => Ok(next),
            _ => Err(InvalidTransition {
                from: self,
                to: next,
            }),
        }
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rejected match lifecycle transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("illegal match state transition {from} -> {to}")]
pub struct InvalidTransition {
    pub from: MatchState,
    pub to: MatchState,
}
