//! Turn resolution: validate, damage, knockout, advance.

use battle_core::{
    Match, MatchId, MatchSide, MatchState, MoveId, PlayerId, TurnOutcome, TurnProgress,
    TurnRecord, apply_damage, calculate_damage, first_mover,
};
use tracing::{debug, info};

use super::MatchService;
use crate::error::{IllegalMoveReason, MatchError, Result};
use crate::store::{StoreError, StoreTx};

impl MatchService {
    /// Apply one player action to an IN_PROGRESS match.
    ///
    /// Runs the full validation ladder (match state, turn ownership,
    /// side/unit resolution, move legality), computes and applies
    /// damage, resolves a knockout into an auto-switch or match
    /// completion, appends the turn log row, and advances the turn
    /// counter and actor. The whole action commits atomically or not
    /// at all.
    pub fn apply_turn(
        &self,
        match_id: MatchId,
        acting_player: PlayerId,
        move_id: MoveId,
    ) -> Result<TurnOutcome> {
        let mut tx = self.store.begin()?;

        let row = tx
            .match_by_id(match_id)?
            .ok_or(MatchError::MatchNotInProgress(match_id))?;
        if row.state != MatchState::InProgress {
            return Err(MatchError::MatchNotInProgress(match_id));
        }
        if row.current_actor != Some(acting_player) {
            debug!(%match_id, player = %acting_player, "action rejected: not this player's turn");
            return Err(MatchError::WrongTurn {
                match_id,
                player: acting_player,
            });
        }

        let sides = tx.sides_for_match(match_id)?;
        let acting_side = sides
            .iter()
            .find(|s| s.player == acting_player)
            .ok_or(IllegalMoveReason::NoSideForPlayer)?;
        let opponent_side = sides
            .iter()
            .find(|s| s.player != acting_player)
            .ok_or(IllegalMoveReason::NoOpponentSide)?;

        let acting_unit = tx
            .active_unit_for_side(acting_side.id)?
            .ok_or(IllegalMoveReason::NoActiveUnit)?;
        let target = tx
            .active_unit_for_side(opponent_side.id)?
            .ok_or(IllegalMoveReason::NoActiveUnit)?;
        // Active units are invariantly alive; a downed target here
        // means an earlier auto-switch went wrong.
        if !target.is_alive() {
            return Err(IllegalMoveReason::TargetAlreadyDown.into());
        }

        let known = self.content.moves_for_unit(acting_unit.unit);
        let chosen = known
            .iter()
            .find(|m| m.id == move_id)
            .ok_or(IllegalMoveReason::UnknownMove(move_id))?;
        let attacker = self
            .content
            .unit(acting_unit.unit)
            .ok_or(IllegalMoveReason::UnknownSpecies)?;

        let damage = calculate_damage(chosen.power, attacker.base_attack, &self.config.damage);
        let hp_after = apply_damage(target.current_hp, damage);
        tx.update_unit_hp(target.id, hp_after)?;

        let did_ko = hp_after == 0;
        let mut winner = None;
        if did_ko {
            let replacement = tx
                .units_for_side(opponent_side.id)?
                .into_iter()
                .find(|u| u.position > opponent_side.active_index && u.is_alive());
            match replacement {
                Some(next_unit) => {
                    tx.update_active_index(opponent_side.id, next_unit.position)?;
                    debug!(
                        %match_id,
                        side = %opponent_side.id,
                        position = next_unit.position,
                        "knockout: auto-switched to next unit"
                    );
                }
                None => winner = Some(acting_player),
            }
        }

        tx.append_turn(TurnRecord {
            match_id,
            turn_number: row.turn_number,
            acting_player,
            acting_unit: acting_unit.id,
            move_id,
            target_unit: target.id,
            damage_done: damage,
            target_hp_after: hp_after,
            did_ko_target: did_ko,
        })?;

        let progress = match winner {
            Some(winner) => {
                tx.complete_match(match_id, winner)?;
                TurnProgress::Completed { winner }
            }
            None => {
                let next_actor = if row.turn_number.closes_round() {
                    self.round_opener(tx.as_mut(), &row, &sides)?
                } else {
                    row.opponent_of(acting_player)
                };
                tx.update_turn_and_actor(match_id, row.turn_number.next(), next_actor)?;
                TurnProgress::Continues { next_actor }
            }
        };

        tx.commit()?;

        match progress {
            TurnProgress::Completed { winner } => {
                info!(%match_id, turn = %row.turn_number, %winner, "match completed")
            }
            TurnProgress::Continues { next_actor } => {
                info!(
                    %match_id,
                    turn = %row.turn_number,
                    damage,
                    ko = did_ko,
                    %next_actor,
                    "turn applied"
                )
            }
        }

        Ok(TurnOutcome {
            turn_number: row.turn_number,
            damage,
            target_hp_after: hp_after,
            did_ko_target: did_ko,
            progress,
        })
    }

    /// Recompute initiative for a fresh round.
    ///
    /// Speeds are read from the sides' current active units, re-fetched
    /// through the transaction so a just-applied auto-switch counts.
    fn round_opener(
        &self,
        tx: &mut (dyn StoreTx + '_),
        row: &Match,
        sides: &[MatchSide],
    ) -> Result<PlayerId> {
        let mut speeds = [0u32; 2];
        for (slot, player) in [row.player1, row.player2].into_iter().enumerate() {
            let side = sides
                .iter()
                .find(|s| s.player == player)
                .ok_or(IllegalMoveReason::NoSideForPlayer)?;
            let active = tx
                .active_unit_for_side(side.id)?
                .ok_or(StoreError::not_found("active unit for side", side.id.0))?;
            let template = self
                .content
                .unit(active.unit)
                .ok_or(StoreError::not_found("unit template", active.unit.0))?;
            speeds[slot] = template.base_speed;
        }

        Ok(first_mover(
            (row.player1, speeds[0]),
            (row.player2, speeds[1]),
            self.rng.as_ref(),
        ))
    }
}
