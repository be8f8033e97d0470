//! Static species and move reference data.

use crate::state::{MoveId, UnitId};

/// Species/template stats for a unit. Read-only to the battle core;
/// per-match HP lives on [`crate::state::MatchUnit`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub id: UnitId,
    pub name: String,
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_speed: u32,
}

/// Action template for a move.
///
/// `accuracy` is carried for clients to display; damage resolution
/// never consults it (there is no hit/miss roll in this model).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveTemplate {
    pub id: MoveId,
    pub name: String,
    pub power: u32,
    pub accuracy: u32,
}

/// Oracle providing unit and move templates.
///
/// Implementations back this with whatever holds the static catalog;
/// the data must not change while matches are in flight.
pub trait ContentOracle: Send + Sync {
    /// Look up a unit template by id.
    fn unit(&self, id: UnitId) -> Option<UnitTemplate>;

    /// The moves a unit of this species legally knows.
    fn moves_for_unit(&self, id: UnitId) -> Vec<MoveTemplate>;
}
