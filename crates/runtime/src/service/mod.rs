//! The match service: initializer and turn resolver.
//!
//! [`MatchService`] is the boundary the API layer drives. It owns the
//! injected capabilities (store, static content, randomness) and
//! exposes exactly two commands: [`MatchService::start`] and
//! [`MatchService::apply_turn`]. Each command runs inside one store
//! transaction; any early return drops the transaction, rolling every
//! buffered mutation back.

mod start;
mod turn;

use std::sync::Arc;

use battle_core::{BattleConfig, ContentOracle, RngOracle};

use crate::store::Store;

/// Entry point for match commands.
pub struct MatchService {
    store: Arc<dyn Store>,
    content: Arc<dyn ContentOracle>,
    rng: Arc<dyn RngOracle>,
    config: BattleConfig,
}

impl MatchService {
    /// Create a service with default balance parameters.
    pub fn new(
        store: Arc<dyn Store>,
        content: Arc<dyn ContentOracle>,
        rng: Arc<dyn RngOracle>,
    ) -> Self {
        Self::with_config(store, content, rng, BattleConfig::default())
    }

    /// Create a service with explicit balance parameters.
    pub fn with_config(
        store: Arc<dyn Store>,
        content: Arc<dyn ContentOracle>,
        rng: Arc<dyn RngOracle>,
        config: BattleConfig,
    ) -> Self {
        Self {
            store,
            content,
            rng,
            config,
        }
    }
}
