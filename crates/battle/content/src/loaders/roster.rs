//! Roster catalog loader.

use std::collections::HashSet;
use std::path::Path;

use battle_core::{MoveTemplate, UnitTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One unit template together with the moves its species knows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEntry {
    pub unit: UnitTemplate,
    pub moves: Vec<battle_core::MoveId>,
}

/// Roster catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCatalog {
    pub units: Vec<UnitEntry>,
    pub moves: Vec<MoveTemplate>,
}

impl RosterCatalog {
    /// Check internal consistency: unique ids, and every learnset
    /// entry resolving to a move in the catalog.
    pub fn validate(&self) -> LoadResult<()> {
        let mut unit_ids = HashSet::new();
        for entry in &self.units {
            if !unit_ids.insert(entry.unit.id) {
                anyhow::bail!("duplicate unit id {} in roster", entry.unit.id);
            }
        }

        let mut move_ids = HashSet::new();
        for mv in &self.moves {
            if !move_ids.insert(mv.id) {
                anyhow::bail!("duplicate move id {} in roster", mv.id);
            }
        }

        for entry in &self.units {
            for move_id in &entry.moves {
                if !move_ids.contains(move_id) {
                    anyhow::bail!(
                        "unit {} ({}) references unknown move {}",
                        entry.unit.id,
                        entry.unit.name,
                        move_id
                    );
                }
            }
        }

        Ok(())
    }
}

/// Loader for roster catalogs from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load and validate a roster catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<RosterCatalog> {
        let content = read_file(path)?;
        let catalog: RosterCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster catalog RON: {}", e))?;
        catalog.validate()?;
        Ok(catalog)
    }
}
