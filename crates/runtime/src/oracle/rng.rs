//! Production randomness source.

use battle_core::RngOracle;

/// Coin toss backed by the thread-local RNG.
///
/// This is the production implementation of the initiative tie-break
/// seam; tests use [`battle_core::FixedCoin`] instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntropyCoin;

impl RngOracle for EntropyCoin {
    fn coin_toss(&self) -> bool {
        rand::random()
    }
}
