use crate::command_sheet::CommandSheet;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use units::{Faction, PlayerId, Technology, Unit, UnitType};

/// A player: identity, faction, command sheet, reinforcements and research.
///
/// Reinforcements are the off-board pool of unbuilt units. Production draws
/// from it and destruction returns to it, so the per-type counts bound how
/// many pieces of a type can ever be on the board at once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub faction: Faction,
    pub command_sheet: CommandSheet,
    commodities: u32,
    technologies: HashSet<Technology>,
    reinforcements: HashMap<UnitType, u32>,
    captured_units: Vec<Unit>,
    pub victory_points: u32,
    pub completed_objectives: Vec<String>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, faction: Faction) -> Self {
        Self {
            id: id.into(),
            faction,
            command_sheet: CommandSheet::new(),
            commodities: 0,
            technologies: HashSet::new(),
            reinforcements: default_reinforcements(),
            captured_units: Vec::new(),
            victory_points: 0,
            completed_objectives: Vec::new(),
        }
    }

    // --- technologies ---

    pub fn add_technology(&mut self, technology: Technology) {
        self.technologies.insert(technology);
    }

    pub fn has_technology(&self, technology: Technology) -> bool {
        self.technologies.contains(&technology)
    }

    pub fn technologies(&self) -> &HashSet<Technology> {
        &self.technologies
    }

    // --- commodities ---

    pub fn commodities(&self) -> u32 {
        self.commodities
    }

    /// Gain commodities up to the faction ceiling; the overflow evaporates
    pub fn gain_commodities(&mut self, amount: u32) {
        self.commodities = (self.commodities + amount).min(self.faction.commodity_limit());
    }

    pub fn spend_commodities(&mut self, amount: u32) -> bool {
        if self.commodities < amount {
            return false;
        }
        self.commodities -= amount;
        true
    }

    // --- reinforcements ---

    pub fn reinforcements(&self, unit_type: UnitType) -> u32 {
        self.reinforcements.get(&unit_type).copied().unwrap_or(0)
    }

    pub fn set_reinforcements(&mut self, unit_type: UnitType, count: u32) {
        self.reinforcements.insert(unit_type, count);
    }

    /// Draw units from reinforcements for production or setup
    pub fn take_reinforcements(
        &mut self,
        unit_type: UnitType,
        count: u32,
    ) -> Result<(), ValidationError> {
        let available = self.reinforcements(unit_type);
        if available < count {
            return Err(ValidationError::InsufficientReinforcements {
                unit_type,
                requested: count,
                available,
            });
        }
        self.reinforcements.insert(unit_type, available - count);
        Ok(())
    }

    /// Return destroyed or culled units to reinforcements
    pub fn return_to_reinforcements(&mut self, unit_type: UnitType, count: u32) {
        *self.reinforcements.entry(unit_type).or_insert(0) += count;
    }

    // --- captured units ---

    pub fn captured_units(&self) -> &[Unit] {
        &self.captured_units
    }

    pub fn capture_unit(&mut self, unit: Unit) {
        self.captured_units.push(unit);
    }

    /// Remove and return every captured unit belonging to `owner`
    pub fn release_captured_of(&mut self, owner: &PlayerId) -> Vec<Unit> {
        let (released, kept) = self
            .captured_units
            .drain(..)
            .partition(|u| &u.owner == owner);
        self.captured_units = kept;
        released
    }
}

/// Component limits of the physical game: the per-type piece counts each
/// player starts with in reinforcements.
fn default_reinforcements() -> HashMap<UnitType, u32> {
    [
        (UnitType::Carrier, 4),
        (UnitType::Cruiser, 8),
        (UnitType::CruiserIi, 8),
        (UnitType::Destroyer, 8),
        (UnitType::Dreadnought, 5),
        (UnitType::Fighter, 10),
        (UnitType::Infantry, 12),
        (UnitType::Mech, 4),
        (UnitType::Pds, 6),
        (UnitType::SpaceDock, 3),
        (UnitType::WarSun, 2),
        (UnitType::Flagship, 1),
    ]
    .into_iter()
    .collect()
}
