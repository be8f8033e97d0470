//! Deterministic battle rules and data types shared across the workspace.
//!
//! `battle-core` defines the canonical rules of a squad battle (damage,
//! initiative, the match state machine) and the row types the store
//! persists. Everything here is pure: no I/O, no clocks beyond the
//! timestamps carried on rows, and randomness only through the injected
//! [`env::RngOracle`] capability. The runtime crate drives these rules
//! against a store; offline tools can reuse them directly.
pub mod combat;
pub mod config;
pub mod env;
pub mod state;

pub use combat::{TurnOutcome, TurnProgress, apply_damage, calculate_damage, first_mover};
pub use config::{BattleConfig, DamageParams};
pub use env::{ContentOracle, FixedCoin, MoveTemplate, RngOracle, UnitTemplate};
pub use state::{
    InvalidTransition, Match, MatchId, MatchSide, MatchState, MatchUnit, MatchUnitId, MoveId,
    PlayerId, SideId, SquadId, TurnNumber, TurnRecord, UnitId,
};
