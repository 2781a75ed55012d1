use crate::faction::Faction;
use crate::stats::{unit_stats, UnitStats};
use crate::technology::Technology;
use crate::unit_type::UnitType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for unit instances
pub type UnitId = Uuid;

/// Identifies a player for ownership and control checks
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by operations on individual units
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("{0} cannot sustain damage")]
    CannotSustainDamage(UnitType),
}

/// A single game piece with identity and ownership.
///
/// Units carry the technologies their owner knows so the capability lookup
/// stays a pure function of the unit alone. Location is not stored here:
/// a unit lives in exactly one container (a system's space area or a planet
/// surface) owned by the game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub owner: PlayerId,
    pub faction: Option<Faction>,
    pub technologies: HashSet<Technology>,
    sustained_damage: bool,
}

impl Unit {
    /// Create a new unit
    pub fn new(unit_type: UnitType, owner: impl Into<PlayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit_type,
            owner: owner.into(),
            faction: None,
            technologies: HashSet::new(),
            sustained_damage: false,
        }
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = Some(faction);
        self
    }

    pub fn with_technologies(mut self, technologies: impl IntoIterator<Item = Technology>) -> Self {
        self.technologies = technologies.into_iter().collect();
        self
    }

    /// Current capability bundle for this unit
    pub fn stats(&self) -> UnitStats {
        unit_stats(self.unit_type, self.faction, &self.technologies)
    }

    pub fn movement(&self) -> u8 {
        self.stats().movement
    }

    pub fn capacity(&self) -> u8 {
        self.stats().capacity
    }

    pub fn combat_value(&self) -> Option<u8> {
        self.stats().combat_value
    }

    pub fn combat_dice(&self) -> u8 {
        self.stats().combat_dice
    }

    pub fn has_production(&self) -> bool {
        self.stats().has_production()
    }

    pub fn has_space_cannon(&self) -> bool {
        self.stats().has_space_cannon()
    }

    pub fn has_bombardment(&self) -> bool {
        self.stats().has_bombardment()
    }

    pub fn has_planetary_shield(&self) -> bool {
        self.stats().planetary_shield
    }

    pub fn is_ship(&self) -> bool {
        self.unit_type.is_ship()
    }

    pub fn is_ground_force(&self) -> bool {
        self.unit_type.is_ground_force()
    }

    /// Whether this unit has already absorbed a hit
    pub fn has_sustained_damage(&self) -> bool {
        self.sustained_damage
    }

    /// Absorb a hit instead of being destroyed
    pub fn sustain_damage(&mut self) -> Result<(), UnitError> {
        if !self.stats().sustain_damage {
            return Err(UnitError::CannotSustainDamage(self.unit_type));
        }
        self.sustained_damage = true;
        Ok(())
    }

    /// Repair sustained damage
    pub fn repair_damage(&mut self) {
        self.sustained_damage = false;
    }
}
