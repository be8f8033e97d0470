//! In-memory Store implementation for tests and local runs.
//!
//! Concurrency control is optimistic: every match's row-set carries a
//! version counter, a transaction records the version of each match it
//! touches at first read, and commit re-checks those versions under
//! the write lock. A lost race surfaces as [`StoreError::Conflict`]
//! and leaves the store untouched; transactions on different matches
//! never conflict.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use battle_core::{
    Match, MatchId, MatchSide, MatchState, MatchUnit, MatchUnitId, PlayerId, SideId, SquadId,
    TurnNumber, TurnRecord,
};

use super::{NewMatchUnit, NewSide, Result, SquadMember, Store, StoreError, StoreTx};

/// All rows belonging to one match, versioned as a unit.
#[derive(Clone, Debug)]
struct MatchRows {
    version: u64,
    row: Match,
    sides: Vec<MatchSide>,
    units: Vec<MatchUnit>,
    turns: Vec<TurnRecord>,
}

#[derive(Default)]
struct World {
    matches: HashMap<MatchId, MatchRows>,
    squads: HashMap<SquadId, Vec<SquadMember>>,
}

/// In-memory implementation of [`Store`].
pub struct MemoryStore {
    world: RwLock<World>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            world: RwLock::new(World::default()),
            next_id: AtomicI64::new(1),
        }
    }

    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Register a squad's members. Squad building is outside the
    /// battle core; this is the seeding hook tests and local tools use.
    pub fn insert_squad(&self, squad: SquadId, mut members: Vec<SquadMember>) -> Result<()> {
        members.sort_by_key(|m| m.position);
        let mut world = self.world.write().map_err(|_| StoreError::LockPoisoned)?;
        world.squads.insert(squad, members);
        Ok(())
    }

    /// Create a PENDING match between two players.
    pub fn create_match(&self, player1: PlayerId, player2: PlayerId) -> Result<Match> {
        let id = MatchId(self.alloc_id());
        let row = Match {
            id,
            state: MatchState::Pending,
            player1,
            player2,
            winner: None,
            turn_number: TurnNumber::FIRST,
            current_actor: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        };
        let mut world = self.world.write().map_err(|_| StoreError::LockPoisoned)?;
        world.matches.insert(
            id,
            MatchRows {
                version: 0,
                row: row.clone(),
                sides: Vec::new(),
                units: Vec::new(),
                turns: Vec::new(),
            },
        );
        Ok(row)
    }

    // ---- committed-state readers, for callers re-fetching after a command ----

    pub fn match_row(&self, id: MatchId) -> Result<Option<Match>> {
        let world = self.world.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(world.matches.get(&id).map(|rows| rows.row.clone()))
    }

    pub fn sides(&self, id: MatchId) -> Result<Vec<MatchSide>> {
        let world = self.world.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(world
            .matches
            .get(&id)
            .map(|rows| rows.sides.clone())
            .unwrap_or_default())
    }

    /// A side's units, ordered by position.
    pub fn units(&self, side: SideId) -> Result<Vec<MatchUnit>> {
        let world = self.world.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut units: Vec<MatchUnit> = world
            .matches
            .values()
            .flat_map(|rows| rows.units.iter())
            .filter(|u| u.side == side)
            .cloned()
            .collect();
        units.sort_by_key(|u| u.position);
        Ok(units)
    }

    /// A match's turn log, in application order.
    pub fn turns(&self, id: MatchId) -> Result<Vec<TurnRecord>> {
        let world = self.world.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(world
            .matches
            .get(&id)
            .map(|rows| rows.turns.clone())
            .unwrap_or_default())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn begin(&self) -> Result<Box<dyn StoreTx + '_>> {
        Ok(Box::new(MemoryTx {
            store: self,
            touched: HashMap::new(),
        }))
    }
}

struct TxEntry {
    base_version: u64,
    rows: MatchRows,
}

/// Transaction over [`MemoryStore`].
///
/// Buffers a working copy of every match row-set it touches; reads
/// see the copy, so the transaction observes its own writes. Commit
/// writes the copies back if the base versions still match.
struct MemoryTx<'a> {
    store: &'a MemoryStore,
    touched: HashMap<MatchId, TxEntry>,
}

impl MemoryTx<'_> {
    /// Pull a match's rows into the working set on first access.
    fn load_match(&mut self, id: MatchId) -> Result<Option<&mut MatchRows>> {
        if let Entry::Vacant(slot) = self.touched.entry(id) {
            let world = self
                .store
                .world
                .read()
                .map_err(|_| StoreError::LockPoisoned)?;
            if let Some(rows) = world.matches.get(&id) {
                slot.insert(TxEntry {
                    base_version: rows.version,
                    rows: rows.clone(),
                });
            }
        }
        Ok(self.touched.get_mut(&id).map(|entry| &mut entry.rows))
    }

    fn require_match(&mut self, id: MatchId) -> Result<&mut MatchRows> {
        self.load_match(id)?
            .ok_or(StoreError::not_found("match", id.0))
    }

    /// A mutable handle that refuses to touch a completed match.
    fn mutable_match(&mut self, id: MatchId) -> Result<&mut MatchRows> {
        let rows = self.require_match(id)?;
        if rows.row.state.is_terminal() {
            return Err(StoreError::Constraint(format!(
                "match {} is completed and immutable",
                id
            )));
        }
        Ok(rows)
    }

    fn match_id_for_side(&mut self, side: SideId) -> Result<MatchId> {
        if let Some(id) = self
            .touched
            .iter()
            .find_map(|(id, e)| e.rows.sides.iter().any(|s| s.id == side).then_some(*id))
        {
            return Ok(id);
        }
        let world = self
            .store
            .world
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        world
            .matches
            .iter()
            .find_map(|(id, rows)| rows.sides.iter().any(|s| s.id == side).then_some(*id))
            .ok_or(StoreError::not_found("match side", side.0))
    }

    fn match_id_for_unit(&mut self, unit: MatchUnitId) -> Result<MatchId> {
        if let Some(id) = self
            .touched
            .iter()
            .find_map(|(id, e)| e.rows.units.iter().any(|u| u.id == unit).then_some(*id))
        {
            return Ok(id);
        }
        let world = self
            .store
            .world
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        world
            .matches
            .iter()
            .find_map(|(id, rows)| rows.units.iter().any(|u| u.id == unit).then_some(*id))
            .ok_or(StoreError::not_found("match unit", unit.0))
    }
}

impl StoreTx for MemoryTx<'_> {
    fn match_by_id(&mut self, id: MatchId) -> Result<Option<Match>> {
        Ok(self.load_match(id)?.map(|rows| rows.row.clone()))
    }

    fn create_side(&mut self, side: NewSide) -> Result<MatchSide> {
        let id = SideId(self.store.alloc_id());
        let rows = self.mutable_match(side.match_id)?;
        let created = MatchSide {
            id,
            match_id: side.match_id,
            player: side.player,
            squad: side.squad,
            active_index: 0,
        };
        rows.sides.push(created.clone());
        Ok(created)
    }

    fn sides_for_match(&mut self, id: MatchId) -> Result<Vec<MatchSide>> {
        Ok(self.require_match(id)?.sides.clone())
    }

    fn active_unit_for_side(&mut self, side: SideId) -> Result<Option<MatchUnit>> {
        let match_id = self.match_id_for_side(side)?;
        let rows = self.require_match(match_id)?;
        let Some(active_index) = rows.sides.iter().find(|s| s.id == side).map(|s| s.active_index)
        else {
            return Ok(None);
        };
        Ok(rows
            .units
            .iter()
            .find(|u| u.side == side && u.position == active_index)
            .cloned())
    }

    fn units_for_side(&mut self, side: SideId) -> Result<Vec<MatchUnit>> {
        let match_id = self.match_id_for_side(side)?;
        let rows = self.require_match(match_id)?;
        let mut units: Vec<MatchUnit> = rows
            .units
            .iter()
            .filter(|u| u.side == side)
            .cloned()
            .collect();
        units.sort_by_key(|u| u.position);
        Ok(units)
    }

    fn update_active_index(&mut self, side: SideId, active_index: u32) -> Result<()> {
        let match_id = self.match_id_for_side(side)?;
        let rows = self.mutable_match(match_id)?;
        let side_row = rows
            .sides
            .iter_mut()
            .find(|s| s.id == side)
            .ok_or(StoreError::not_found("match side", side.0))?;
        if active_index < side_row.active_index {
            return Err(StoreError::Constraint(format!(
                "active_index of side {} may not decrease ({} -> {})",
                side, side_row.active_index, active_index
            )));
        }
        side_row.active_index = active_index;
        Ok(())
    }

    fn squad_units(&mut self, squad: SquadId) -> Result<Vec<SquadMember>> {
        let world = self
            .store
            .world
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(world.squads.get(&squad).cloned().unwrap_or_default())
    }

    fn create_unit(&mut self, unit: NewMatchUnit) -> Result<MatchUnit> {
        let id = MatchUnitId(self.store.alloc_id());
        let match_id = self.match_id_for_side(unit.side)?;
        let rows = self.mutable_match(match_id)?;
        let created = MatchUnit {
            id,
            side: unit.side,
            unit: unit.unit,
            position: unit.position,
            current_hp: unit.current_hp,
        };
        rows.units.push(created.clone());
        Ok(created)
    }

    fn update_unit_hp(&mut self, unit: MatchUnitId, current_hp: u32) -> Result<()> {
        let match_id = self.match_id_for_unit(unit)?;
        let rows = self.mutable_match(match_id)?;
        let unit_row = rows
            .units
            .iter_mut()
            .find(|u| u.id == unit)
            .ok_or(StoreError::not_found("match unit", unit.0))?;
        if current_hp > unit_row.current_hp {
            return Err(StoreError::Constraint(format!(
                "current_hp of unit {} may not increase ({} -> {})",
                unit, unit_row.current_hp, current_hp
            )));
        }
        unit_row.current_hp = current_hp;
        Ok(())
    }

    fn append_turn(&mut self, record: TurnRecord) -> Result<()> {
        let rows = self.mutable_match(record.match_id)?;
        rows.turns.push(record);
        Ok(())
    }

    fn update_turn_and_actor(
        &mut self,
        id: MatchId,
        turn_number: TurnNumber,
        actor: PlayerId,
    ) -> Result<()> {
        let rows = self.mutable_match(id)?;
        rows.row.turn_number = turn_number;
        rows.row.current_actor = Some(actor);
        Ok(())
    }

    fn start_match(&mut self, id: MatchId, initial_actor: PlayerId) -> Result<()> {
        let rows = self.require_match(id)?;
        rows.row.state = rows
            .row
            .state
            .transition(MatchState::InProgress)
            .map_err(|e| StoreError::Constraint(e.to_string()))?;
        rows.row.current_actor = Some(initial_actor);
        rows.row.started_at = Some(Utc::now());
        Ok(())
    }

    fn complete_match(&mut self, id: MatchId, winner: PlayerId) -> Result<()> {
        let rows = self.require_match(id)?;
        rows.row.state = rows
            .row
            .state
            .transition(MatchState::Completed)
            .map_err(|e| StoreError::Constraint(e.to_string()))?;
        rows.row.winner = Some(winner);
        rows.row.completed_at = Some(Utc::now());
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let mut world = self
            .store
            .world
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        // Validate every touched match before writing anything back.
        for (id, entry) in &self.touched {
            let current = world
                .matches
                .get(id)
                .ok_or(StoreError::not_found("match", id.0))?;
            if current.version != entry.base_version {
                return Err(StoreError::Conflict(*id));
            }
        }

        for (id, entry) in self.touched {
            let mut rows = entry.rows;
            rows.version = entry.base_version + 1;
            world.matches.insert(id, rows);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::UnitId;

    fn seeded_match(store: &MemoryStore) -> Match {
        store.create_match(PlayerId(1), PlayerId(2)).unwrap()
    }

    fn side_with_unit(store: &MemoryStore, match_id: MatchId) -> (MatchSide, MatchUnit) {
        let mut tx = store.begin().unwrap();
        let side = tx
            .create_side(NewSide {
                match_id,
                player: PlayerId(1),
                squad: SquadId(7),
            })
            .unwrap();
        let unit = tx
            .create_unit(NewMatchUnit {
                side: side.id,
                unit: UnitId(1),
                position: 0,
                current_hp: 50,
            })
            .unwrap();
        tx.commit().unwrap();
        (side, unit)
    }

    #[test]
    fn committed_writes_are_visible_to_readers() {
        let store = MemoryStore::new();
        let m = seeded_match(&store);
        let (side, unit) = side_with_unit(&store, m.id);

        assert_eq!(store.sides(m.id).unwrap(), vec![side]);
        assert_eq!(store.units(unit.side).unwrap(), vec![unit]);
    }

    #[test]
    fn dropping_a_transaction_rolls_everything_back() {
        let store = MemoryStore::new();
        let m = seeded_match(&store);
        let (_, unit) = side_with_unit(&store, m.id);

        let mut tx = store.begin().unwrap();
        tx.update_unit_hp(unit.id, 0).unwrap();
        drop(tx);

        assert_eq!(store.units(unit.side).unwrap()[0].current_hp, 50);
    }

    #[test]
    fn reads_observe_uncommitted_writes_in_the_same_transaction() {
        let store = MemoryStore::new();
        let m = seeded_match(&store);
        let (side, unit) = side_with_unit(&store, m.id);

        let mut tx = store.begin().unwrap();
        tx.update_unit_hp(unit.id, 10).unwrap();
        let seen = tx.active_unit_for_side(side.id).unwrap().unwrap();
        assert_eq!(seen.current_hp, 10);
        drop(tx);
    }

    #[test]
    fn concurrent_commits_on_one_match_conflict() {
        let store = MemoryStore::new();
        let m = seeded_match(&store);
        let (_, unit) = side_with_unit(&store, m.id);

        let mut tx1 = store.begin().unwrap();
        tx1.update_unit_hp(unit.id, 40).unwrap();

        let mut tx2 = store.begin().unwrap();
        tx2.update_unit_hp(unit.id, 30).unwrap();
        tx2.commit().unwrap();

        let err = tx1.commit().unwrap_err();
        assert!(err.is_conflict());
        // The winning write stands.
        assert_eq!(store.units(unit.side).unwrap()[0].current_hp, 30);
    }

    #[test]
    fn transactions_on_different_matches_commit_independently() {
        let store = MemoryStore::new();
        let a = seeded_match(&store);
        let b = seeded_match(&store);
        let (_, unit_a) = side_with_unit(&store, a.id);

        let mut tx1 = store.begin().unwrap();
        tx1.update_unit_hp(unit_a.id, 1).unwrap();

        let mut tx2 = store.begin().unwrap();
        tx2.start_match(b.id, PlayerId(1)).unwrap();
        tx2.commit().unwrap();

        tx1.commit().unwrap();
        assert_eq!(store.units(unit_a.side).unwrap()[0].current_hp, 1);
        assert_eq!(
            store.match_row(b.id).unwrap().unwrap().state,
            MatchState::InProgress
        );
    }

    #[test]
    fn active_index_may_not_decrease() {
        let store = MemoryStore::new();
        let m = seeded_match(&store);
        let (side, _) = side_with_unit(&store, m.id);

        let mut tx = store.begin().unwrap();
        tx.update_active_index(side.id, 2).unwrap();
        let err = tx.update_active_index(side.id, 1).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[test]
    fn current_hp_may_not_increase() {
        let store = MemoryStore::new();
        let m = seeded_match(&store);
        let (_, unit) = side_with_unit(&store, m.id);

        let mut tx = store.begin().unwrap();
        let err = tx.update_unit_hp(unit.id, 60).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[test]
    fn completed_matches_are_immutable() {
        let store = MemoryStore::new();
        let m = seeded_match(&store);
        let (_, unit) = side_with_unit(&store, m.id);

        let mut tx = store.begin().unwrap();
        tx.start_match(m.id, PlayerId(1)).unwrap();
        tx.complete_match(m.id, PlayerId(1)).unwrap();
        tx.commit().unwrap();

        let mut tx = store.begin().unwrap();
        let err = tx.update_unit_hp(unit.id, 0).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[test]
    fn lifecycle_shortcuts_are_rejected_as_constraints() {
        let store = MemoryStore::new();
        let m = seeded_match(&store);

        let mut tx = store.begin().unwrap();
        let err = tx.complete_match(m.id, PlayerId(1)).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }
}
