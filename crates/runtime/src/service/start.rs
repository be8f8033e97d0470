//! Match initialization: squads become battle-ready state.

use battle_core::{
    Match, MatchId, MatchSide, MatchState, PlayerId, SquadId, UnitTemplate, first_mover,
};
use tracing::{debug, info};

use super::MatchService;
use crate::error::{MatchError, Result};
use crate::store::{NewMatchUnit, NewSide, SquadMember, StoreError, StoreTx};

impl MatchService {
    /// Set up sides and units for a PENDING match and open play.
    ///
    /// Materializes one [`MatchSide`] per player from the chosen
    /// squads, instantiates every squad member at its template's base
    /// HP, computes the initial actor from the two lead units' speed
    /// (coin toss on a tie), and transitions the match to IN_PROGRESS.
    /// All of it commits atomically; a failure anywhere leaves no
    /// partial squad materialization behind.
    ///
    /// Returns the initial actor.
    pub fn start(&self, match_id: MatchId, squad1: SquadId, squad2: SquadId) -> Result<PlayerId> {
        let mut tx = self.store.begin()?;

        let row = tx
            .match_by_id(match_id)?
            .ok_or(StoreError::not_found("match", match_id.0))?;
        if row.state != MatchState::Pending {
            return Err(MatchError::InvalidState {
                match_id,
                state: row.state,
                expected: MatchState::Pending,
            });
        }

        let side1 = self.materialize_side(tx.as_mut(), &row, row.player1, squad1)?;
        let side2 = self.materialize_side(tx.as_mut(), &row, row.player2, squad2)?;

        let lead1 = self.lead_template(tx.as_mut(), &side1)?;
        let lead2 = self.lead_template(tx.as_mut(), &side2)?;

        let initial_actor = first_mover(
            (row.player1, lead1.base_speed),
            (row.player2, lead2.base_speed),
            self.rng.as_ref(),
        );

        tx.start_match(match_id, initial_actor)?;
        tx.commit()?;

        info!(%match_id, %initial_actor, "match started");
        Ok(initial_actor)
    }

    /// Create one player's side and instantiate their squad into it.
    fn materialize_side(
        &self,
        tx: &mut (dyn StoreTx + '_),
        row: &Match,
        player: PlayerId,
        squad: SquadId,
    ) -> Result<MatchSide> {
        let members = tx.squad_units(squad)?;
        validate_squad(squad, &members)?;

        let side = tx.create_side(NewSide {
            match_id: row.id,
            player,
            squad,
        })?;

        for member in &members {
            let template = self
                .content
                .unit(member.unit)
                .ok_or(MatchError::SquadMalformed {
                    squad,
                    detail: "member references an unknown unit template",
                })?;
            tx.create_unit(NewMatchUnit {
                side: side.id,
                unit: member.unit,
                position: member.position,
                current_hp: template.base_hp,
            })?;
        }

        debug!(%squad, %player, units = members.len(), "side materialized");
        Ok(side)
    }

    /// The template of a side's initial active unit (position 0).
    fn lead_template(
        &self,
        tx: &mut (dyn StoreTx + '_),
        side: &MatchSide,
    ) -> Result<UnitTemplate> {
        let active = tx
            .active_unit_for_side(side.id)?
            .ok_or(StoreError::not_found("active unit for side", side.id.0))?;
        self.content
            .unit(active.unit)
            .ok_or(StoreError::not_found("unit template", active.unit.0).into())
    }
}

/// Squad hardening: non-empty, positions contiguous from 0, no
/// duplicates.
fn validate_squad(squad: SquadId, members: &[SquadMember]) -> Result<()> {
    if members.is_empty() {
        return Err(MatchError::SquadEmpty(squad));
    }
    let mut filled = vec![false; members.len()];
    for member in members {
        let Some(slot) = filled.get_mut(member.position as usize) else {
            return Err(MatchError::SquadMalformed {
                squad,
                detail: "positions are not contiguous from 0",
            });
        };
        if *slot {
            return Err(MatchError::SquadMalformed {
                squad,
                detail: "duplicate position",
            });
        }
        *slot = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(unit: i64, position: u32) -> SquadMember {
        SquadMember {
            unit: battle_core::UnitId(unit),
            position,
        }
    }

    #[test]
    fn accepts_contiguous_slots() {
        let squad = SquadId(1);
        assert!(validate_squad(squad, &[member(1, 0)]).is_ok());
        assert!(validate_squad(squad, &[member(1, 0), member(2, 1), member(3, 2)]).is_ok());
    }

    #[test]
    fn rejects_empty_squads() {
        assert!(matches!(
            validate_squad(SquadId(1), &[]),
            Err(MatchError::SquadEmpty(_))
        ));
    }

    #[test]
    fn rejects_gaps_and_duplicates() {
        let squad = SquadId(1);
        assert!(matches!(
            validate_squad(squad, &[member(1, 0), member(2, 2)]),
            Err(MatchError::SquadMalformed { .. })
        ));
        assert!(matches!(
            validate_squad(squad, &[member(1, 0), member(2, 0)]),
            Err(MatchError::SquadMalformed { .. })
        ));
        assert!(matches!(
            validate_squad(squad, &[member(1, 1)]),
            Err(MatchError::SquadMalformed { .. })
        ));
    }
}
