use chrono::{DateTime, Utc};

use super::{
    MatchId, MatchState, MatchUnitId, MoveId, PlayerId, SideId, SquadId, TurnNumber, UnitId,
};

/// One battle between two players.
///
/// `current_actor` is set and meaningful only while the match is
/// IN_PROGRESS; on completion both it and `turn_number` are frozen at
/// their last in-play values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pub id: MatchId,
    pub state: MatchState,
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub winner: Option<PlayerId>,
    pub turn_number: TurnNumber,
    pub current_actor: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Match {
    /// Returns the other participant.
    pub fn opponent_of(&self, player: PlayerId) -> PlayerId {
        if player == self.player1 {
            self.player2
        } else {
            self.player1
        }
    }

    pub fn has_player(&self, player: PlayerId) -> bool {
        player == self.player1 || player == self.player2
    }
}

/// One player's battle party within a match.
///
/// `active_index` is the position of the unit currently in play. It
/// only ever moves forward: once a unit is passed over it is never
/// reactivated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSide {
    pub id: SideId,
    pub match_id: MatchId,
    pub player: PlayerId,
    pub squad: SquadId,
    pub active_index: u32,
}

/// A squad unit instantiated into a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchUnit {
    pub id: MatchUnitId,
    pub side: SideId,
    pub unit: UnitId,
    /// 0-based slot within the side, fixed at initialization.
    pub position: u32,
    pub current_hp: u32,
}

impl MatchUnit {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Whether this unit is the side's unit currently in play.
    pub fn is_active_for(&self, side: &MatchSide) -> bool {
        self.position == side.active_index
    }
}

/// Immutable log record of one resolved action.
///
/// Appended once per successfully applied turn, including the final
/// knockout that completes a match. Never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    pub match_id: MatchId,
    pub turn_number: TurnNumber,
    pub acting_player: PlayerId,
    pub acting_unit: MatchUnitId,
    pub move_id: MoveId,
    pub target_unit: MatchUnitId,
    pub damage_done: u32,
    pub target_hp_after: u32,
    pub did_ko_target: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_between(p1: PlayerId, p2: PlayerId) -> Match {
        Match {
            id: MatchId(1),
            state: MatchState::Pending,
            player1: p1,
            player2: p2,
            winner: None,
            turn_number: TurnNumber::FIRST,
            current_actor: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn opponent_of_returns_the_other_player() {
        let m = match_between(PlayerId(10), PlayerId(20));
        assert_eq!(m.opponent_of(PlayerId(10)), PlayerId(20));
        assert_eq!(m.opponent_of(PlayerId(20)), PlayerId(10));
    }

    #[test]
    fn unit_activity_follows_the_side_pointer() {
        let side = MatchSide {
            id: SideId(1),
            match_id: MatchId(1),
            player: PlayerId(10),
            squad: SquadId(5),
            active_index: 1,
        };
        let benched = MatchUnit {
            id: MatchUnitId(1),
            side: side.id,
            unit: UnitId(100),
            position: 0,
            current_hp: 0,
        };
        let active = MatchUnit {
            id: MatchUnitId(2),
            side: side.id,
            unit: UnitId(101),
            position: 1,
            current_hp: 30,
        };
        assert!(!benched.is_active_for(&side));
        assert!(active.is_active_for(&side));
        assert!(!benched.is_alive());
        assert!(active.is_alive());
    }
}
