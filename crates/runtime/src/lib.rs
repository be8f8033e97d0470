//! Runtime shell for the squad battle core.
//!
//! This crate wires the pure rules in `battle-core` to the outside
//! world: the transactional [`store::Store`] capability with its
//! in-memory implementation, oracle implementations for static content
//! and randomness, and [`MatchService`], the two-entry-point service
//! (`start`, `apply_turn`) an API layer drives.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the match initializer and turn resolver
//! - [`store`] defines the transaction-scoped store contracts and the
//!   in-memory store used by tests and local runs
//! - [`oracle`] provides static-content and randomness capabilities
//! - [`error`] exposes the error taxonomy callers map to responses
pub mod error;
pub mod oracle;
pub mod service;
pub mod store;

pub use error::{IllegalMoveReason, MatchError, Result};
pub use oracle::{ContentOracleImpl, EntropyCoin};
pub use service::MatchService;
pub use store::{MemoryStore, NewMatchUnit, NewSide, SquadMember, Store, StoreError, StoreTx};
