//! Store contracts for match state.

use battle_core::{
    Match, MatchId, MatchSide, MatchUnit, MatchUnitId, PlayerId, SideId, SquadId, TurnNumber,
    TurnRecord, UnitId,
};

use super::Result;

/// One member of a player-built squad, in slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquadMember {
    pub unit: UnitId,
    /// 0-based slot within the squad.
    pub position: u32,
}

/// Parameters for creating a match side.
#[derive(Clone, Copy, Debug)]
pub struct NewSide {
    pub match_id: MatchId,
    pub player: PlayerId,
    pub squad: SquadId,
}

/// Parameters for instantiating a squad unit into a match.
#[derive(Clone, Copy, Debug)]
pub struct NewMatchUnit {
    pub side: SideId,
    pub unit: UnitId,
    pub position: u32,
    pub current_hp: u32,
}

/// Transactional store for dynamic match state.
pub trait Store: Send + Sync {
    /// Open a transaction.
    ///
    /// All reads and writes for one logical action go through the
    /// returned handle and take effect only at [`StoreTx::commit`].
    /// Dropping the handle without committing discards every buffered
    /// mutation.
    fn begin(&self) -> Result<Box<dyn StoreTx + '_>>;
}

/// One in-flight transaction.
///
/// Reads observe the transaction's own uncommitted writes. A commit
/// may fail with [`super::StoreError::Conflict`] if another
/// transaction touching the same match committed first; the caller
/// retries the whole action.
pub trait StoreTx {
    fn match_by_id(&mut self, id: MatchId) -> Result<Option<Match>>;

    /// Create a side with `active_index` 0.
    fn create_side(&mut self, side: NewSide) -> Result<MatchSide>;

    fn sides_for_match(&mut self, id: MatchId) -> Result<Vec<MatchSide>>;

    /// The side's unit at `position == active_index`, if any.
    fn active_unit_for_side(&mut self, side: SideId) -> Result<Option<MatchUnit>>;

    /// All of a side's units, ordered by position.
    fn units_for_side(&mut self, side: SideId) -> Result<Vec<MatchUnit>>;

    /// Advance a side's active pointer. The index may never decrease.
    fn update_active_index(&mut self, side: SideId, active_index: u32) -> Result<()>;

    /// Members of a player-built squad, in slot order. Unknown squads
    /// read as empty.
    fn squad_units(&mut self, squad: SquadId) -> Result<Vec<SquadMember>>;

    fn create_unit(&mut self, unit: NewMatchUnit) -> Result<MatchUnit>;

    /// Set a unit's current HP. HP only ever moves down.
    fn update_unit_hp(&mut self, unit: MatchUnitId, current_hp: u32) -> Result<()>;

    /// Append one row to the immutable turn log.
    fn append_turn(&mut self, record: TurnRecord) -> Result<()>;

    /// Persist the advanced turn counter and next actor.
    fn update_turn_and_actor(
        &mut self,
        id: MatchId,
        turn_number: TurnNumber,
        actor: PlayerId,
    ) -> Result<()>;

    /// Transition PENDING → IN_PROGRESS and set the initial actor.
    fn start_match(&mut self, id: MatchId, initial_actor: PlayerId) -> Result<()>;

    /// Transition IN_PROGRESS → COMPLETED and record the winner. The
    /// turn counter and actor are left as they were.
    fn complete_match(&mut self, id: MatchId, winner: PlayerId) -> Result<()>;

    /// Commit every buffered mutation atomically.
    fn commit(self: Box<Self>) -> Result<()>;
}
