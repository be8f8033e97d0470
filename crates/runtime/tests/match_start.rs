//! Integration tests for match initialization.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use battle_core::{
    FixedCoin, MatchState, MoveId, MoveTemplate, PlayerId, RngOracle, SquadId, TurnNumber, UnitId,
    UnitTemplate,
};
use runtime::{ContentOracleImpl, MatchError, MatchService, MemoryStore, SquadMember, StoreError};

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

const SQUAD1: SquadId = SquadId(10);
const SQUAD2: SquadId = SquadId(20);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Oracle that fails the test if the tie-break is ever consulted.
struct NeverToss;

impl RngOracle for NeverToss {
    fn coin_toss(&self) -> bool {
        panic!("tie-break consulted for a non-tied initiative");
    }
}

/// Oracle that counts how often it is consulted.
struct CountingCoin {
    outcome: bool,
    tosses: AtomicU32,
}

impl CountingCoin {
    fn new(outcome: bool) -> Self {
        Self {
            outcome,
            tosses: AtomicU32::new(0),
        }
    }
}

impl RngOracle for CountingCoin {
    fn coin_toss(&self) -> bool {
        self.tosses.fetch_add(1, Ordering::Relaxed);
        self.outcome
    }
}

/// Catalog with three species: unit 1 and 3 share speed 50, unit 2 is
/// faster at 80; all know move 1.
fn catalog() -> ContentOracleImpl {
    let mut catalog = ContentOracleImpl::new();
    for (id, speed) in [(1, 50), (2, 80), (3, 50)] {
        catalog.add_unit(UnitTemplate {
            id: UnitId(id),
            name: format!("unit-{id}"),
            base_hp: 100,
            base_attack: 60,
            base_speed: speed,
        });
        catalog.teach(UnitId(id), MoveId(1));
    }
    catalog.add_move(MoveTemplate {
        id: MoveId(1),
        name: "Scratch".into(),
        power: 40,
        accuracy: 100,
    });
    catalog
}

fn service_with(store: &Arc<MemoryStore>, rng: Arc<dyn RngOracle>) -> MatchService {
    init_tracing();
    MatchService::new(store.clone(), Arc::new(catalog()), rng)
}

fn squad_of(store: &MemoryStore, squad: SquadId, units: &[i64]) {
    let members = units
        .iter()
        .enumerate()
        .map(|(slot, &unit)| SquadMember {
            unit: UnitId(unit),
            position: slot as u32,
        })
        .collect();
    store.insert_squad(squad, members).unwrap();
}

#[test]
fn faster_lead_acts_first_without_randomness() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(&store, Arc::new(NeverToss));
    squad_of(&store, SQUAD1, &[1]); // speed 50
    squad_of(&store, SQUAD2, &[2]); // speed 80
    let m = store.create_match(P1, P2).unwrap();

    let actor = service.start(m.id, SQUAD1, SQUAD2).unwrap();
    assert_eq!(actor, P2);

    let row = store.match_row(m.id).unwrap().unwrap();
    assert_eq!(row.state, MatchState::InProgress);
    assert_eq!(row.current_actor, Some(P2));
    assert_eq!(row.turn_number, TurnNumber::FIRST);
    assert!(row.started_at.is_some());
}

#[test]
fn squads_materialize_with_base_hp_and_lead_active() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(&store, Arc::new(NeverToss));
    squad_of(&store, SQUAD1, &[1, 3]);
    squad_of(&store, SQUAD2, &[2]);
    let m = store.create_match(P1, P2).unwrap();

    service.start(m.id, SQUAD1, SQUAD2).unwrap();

    let sides = store.sides(m.id).unwrap();
    assert_eq!(sides.len(), 2);
    assert!(sides.iter().all(|s| s.active_index == 0));

    let side1 = sides.iter().find(|s| s.player == P1).unwrap();
    let units = store.units(side1.id).unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(
        units.iter().map(|u| u.position).collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert!(units.iter().all(|u| u.current_hp == 100));
}

#[test]
fn speed_tie_is_settled_by_the_injected_coin() {
    for (outcome, expected) in [(true, P1), (false, P2)] {
        let store = Arc::new(MemoryStore::new());
        let service = service_with(&store, Arc::new(FixedCoin(outcome)));
        squad_of(&store, SQUAD1, &[1]); // speed 50
        squad_of(&store, SQUAD2, &[3]); // speed 50
        let m = store.create_match(P1, P2).unwrap();

        assert_eq!(service.start(m.id, SQUAD1, SQUAD2).unwrap(), expected);
    }
}

#[test]
fn speed_tie_consults_the_coin_exactly_once() {
    let store = Arc::new(MemoryStore::new());
    let coin = Arc::new(CountingCoin::new(true));
    let service = service_with(&store, coin.clone());
    squad_of(&store, SQUAD1, &[1]);
    squad_of(&store, SQUAD2, &[3]);
    let m = store.create_match(P1, P2).unwrap();

    service.start(m.id, SQUAD1, SQUAD2).unwrap();
    assert_eq!(coin.tosses.load(Ordering::Relaxed), 1);
}

#[test]
fn start_requires_a_pending_match() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(&store, Arc::new(NeverToss));
    squad_of(&store, SQUAD1, &[1]);
    squad_of(&store, SQUAD2, &[2]);
    let m = store.create_match(P1, P2).unwrap();

    service.start(m.id, SQUAD1, SQUAD2).unwrap();
    let err = service.start(m.id, SQUAD1, SQUAD2).unwrap_err();
    assert!(matches!(err, MatchError::InvalidState { .. }));

    // The second attempt changed nothing.
    let row = store.match_row(m.id).unwrap().unwrap();
    assert_eq!(row.state, MatchState::InProgress);
    assert_eq!(store.sides(m.id).unwrap().len(), 2);
}

#[test]
fn start_on_an_unknown_match_is_a_store_failure() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(&store, Arc::new(NeverToss));
    squad_of(&store, SQUAD1, &[1]);
    squad_of(&store, SQUAD2, &[2]);

    let err = service
        .start(battle_core::MatchId(999), SQUAD1, SQUAD2)
        .unwrap_err();
    assert!(matches!(
        err,
        MatchError::Store(StoreError::NotFound { .. })
    ));
}

#[test]
fn empty_squad_aborts_without_partial_state() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(&store, Arc::new(NeverToss));
    squad_of(&store, SQUAD1, &[1, 3]);
    store.insert_squad(SQUAD2, Vec::new()).unwrap();
    let m = store.create_match(P1, P2).unwrap();

    let err = service.start(m.id, SQUAD1, SQUAD2).unwrap_err();
    assert!(matches!(err, MatchError::SquadEmpty(SQUAD2)));

    // Squad 1 was materialized inside the same transaction; none of it
    // survives the rollback.
    let row = store.match_row(m.id).unwrap().unwrap();
    assert_eq!(row.state, MatchState::Pending);
    assert_eq!(row.current_actor, None);
    assert!(store.sides(m.id).unwrap().is_empty());
}

#[test]
fn malformed_squads_are_rejected() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(&store, Arc::new(NeverToss));
    squad_of(&store, SQUAD1, &[1]);

    // Gap: positions 0 and 2.
    store
        .insert_squad(
            SQUAD2,
            vec![
                SquadMember {
                    unit: UnitId(2),
                    position: 0,
                },
                SquadMember {
                    unit: UnitId(3),
                    position: 2,
                },
            ],
        )
        .unwrap();
    let m = store.create_match(P1, P2).unwrap();
    let err = service.start(m.id, SQUAD1, SQUAD2).unwrap_err();
    assert!(matches!(err, MatchError::SquadMalformed { .. }));

    // Duplicate position.
    store
        .insert_squad(
            SQUAD2,
            vec![
                SquadMember {
                    unit: UnitId(2),
                    position: 0,
                },
                SquadMember {
                    unit: UnitId(3),
                    position: 0,
                },
            ],
        )
        .unwrap();
    let err = service.start(m.id, SQUAD1, SQUAD2).unwrap_err();
    assert!(matches!(err, MatchError::SquadMalformed { .. }));

    // Member referencing a species missing from the catalog.
    squad_of(&store, SQUAD2, &[99]);
    let err = service.start(m.id, SQUAD1, SQUAD2).unwrap_err();
    assert!(matches!(err, MatchError::SquadMalformed { .. }));

    assert_eq!(
        store.match_row(m.id).unwrap().unwrap().state,
        MatchState::Pending
    );
}
