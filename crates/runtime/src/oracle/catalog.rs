//! Content oracle implementing [`battle_core::ContentOracle`].

use std::collections::HashMap;

use battle_content::RosterCatalog;
use battle_core::{ContentOracle, MoveId, MoveTemplate, UnitId, UnitTemplate};

/// Oracle providing unit and move templates plus learnsets.
pub struct ContentOracleImpl {
    units: HashMap<UnitId, UnitTemplate>,
    moves: HashMap<MoveId, MoveTemplate>,
    learnsets: HashMap<UnitId, Vec<MoveId>>,
}

impl ContentOracleImpl {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
            moves: HashMap::new(),
            learnsets: HashMap::new(),
        }
    }

    /// Build an oracle from a loaded roster catalog.
    pub fn from_roster(roster: &RosterCatalog) -> Self {
        let mut oracle = Self::new();
        for mv in &roster.moves {
            oracle.add_move(mv.clone());
        }
        for entry in &roster.units {
            oracle.add_unit(entry.unit.clone());
            for move_id in &entry.moves {
                oracle.teach(entry.unit.id, *move_id);
            }
        }
        oracle
    }

    /// Add a unit template to the oracle.
    pub fn add_unit(&mut self, template: UnitTemplate) {
        self.units.insert(template.id, template);
    }

    /// Add a move template to the oracle.
    pub fn add_move(&mut self, template: MoveTemplate) {
        self.moves.insert(template.id, template);
    }

    /// Record that a species knows a move.
    pub fn teach(&mut self, unit: UnitId, mv: MoveId) {
        self.learnsets.entry(unit).or_default().push(mv);
    }

    /// Check if a unit template exists.
    pub fn contains_unit(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Get number of unit templates in the catalog.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Default for ContentOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentOracle for ContentOracleImpl {
    fn unit(&self, id: UnitId) -> Option<UnitTemplate> {
        self.units.get(&id).cloned()
    }

    fn moves_for_unit(&self, id: UnitId) -> Vec<MoveTemplate> {
        self.learnsets
            .get(&id)
            .map(|known| {
                known
                    .iter()
                    .filter_map(|move_id| self.moves.get(move_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
