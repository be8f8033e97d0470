//! Initiative: which player acts first in a round.

use crate::env::RngOracle;
use crate::state::PlayerId;

/// Pick the first mover of a round from the two sides' active units.
///
/// The player whose active unit has the higher `base_speed` acts
/// first. On an exact tie the decision falls to a single
/// [`RngOracle::coin_toss`]; `true` selects the first candidate. The
/// toss is the only nondeterminism in the whole resolution pipeline,
/// so tests inject a fixed oracle to force either outcome.
pub fn first_mover(
    first: (PlayerId, u32),
    second: (PlayerId, u32),
    rng: &dyn RngOracle,
) -> PlayerId {
    let (p1, p1_speed) = first;
    let (p2, p2_speed) = second;
    if p1_speed > p2_speed {
        p1
    } else if p2_speed > p1_speed {
        p2
    } else if rng.coin_toss() {
        p1
    } else {
        p2
    }
}
