use crate::planet::Planet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use units::{PlayerId, Unit, UnitId};

/// Identifies a system tile on the board
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(pub String);

impl SystemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SystemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wormhole classes. Systems carrying a matching class are adjacent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WormholeType {
    Alpha,
    Beta,
    Gamma,
    Delta,
}

/// Anomaly classes with movement consequences
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyType {
    AsteroidField,
    Nebula,
    Supernova,
    GravityRift,
}

impl AnomalyType {
    pub fn name(self) -> &'static str {
        match self {
            AnomalyType::AsteroidField => "asteroid field",
            AnomalyType::Nebula => "nebula",
            AnomalyType::Supernova => "supernova",
            AnomalyType::GravityRift => "gravity rift",
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A system tile: planets, a space area, wormhole and anomaly tags, and one
/// command-token slot per player.
///
/// Ships live in the space area; ground forces and structures live on
/// planets. A unit is always in exactly one container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub id: SystemId,
    planets: Vec<Planet>,
    space_units: Vec<Unit>,
    wormholes: HashSet<WormholeType>,
    anomalies: HashSet<AnomalyType>,
    command_tokens: HashSet<PlayerId>,
}

impl System {
    pub fn new(id: impl Into<SystemId>) -> Self {
        Self {
            id: id.into(),
            planets: Vec::new(),
            space_units: Vec::new(),
            wormholes: HashSet::new(),
            anomalies: HashSet::new(),
            command_tokens: HashSet::new(),
        }
    }

    // --- planets ---

    pub fn add_planet(&mut self, planet: Planet) {
        self.planets.push(planet);
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planets_mut(&mut self) -> &mut [Planet] {
        &mut self.planets
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn planet_mut(&mut self, name: &str) -> Option<&mut Planet> {
        self.planets.iter_mut().find(|p| p.name == name)
    }

    // --- space area ---

    pub fn space_units(&self) -> &[Unit] {
        &self.space_units
    }

    pub fn space_units_mut(&mut self) -> &mut Vec<Unit> {
        &mut self.space_units
    }

    pub fn place_unit_in_space(&mut self, unit: Unit) {
        self.space_units.push(unit);
    }

    pub fn remove_unit_from_space(&mut self, unit_id: UnitId) -> Option<Unit> {
        let index = self.space_units.iter().position(|u| u.id == unit_id)?;
        Some(self.space_units.remove(index))
    }

    pub fn space_units_of<'a>(
        &'a self,
        player: &'a PlayerId,
    ) -> impl Iterator<Item = &'a Unit> + 'a {
        self.space_units.iter().filter(move |u| &u.owner == player)
    }

    /// Ships (not fighters riding along, not ground forces in transit)
    /// belonging to anyone other than `player`
    pub fn has_enemy_ships(&self, player: &PlayerId) -> bool {
        self.space_units
            .iter()
            .any(|u| &u.owner != player && u.is_ship())
    }

    pub fn has_friendly_ships(&self, player: &PlayerId) -> bool {
        self.space_units
            .iter()
            .any(|u| &u.owner == player && u.is_ship())
    }

    /// Players owning at least one ship in the space area
    pub fn players_with_ships(&self) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = Vec::new();
        for unit in &self.space_units {
            if unit.is_ship() && !players.contains(&unit.owner) {
                players.push(unit.owner.clone());
            }
        }
        players
    }

    // --- tags ---

    pub fn add_wormhole(&mut self, wormhole: WormholeType) {
        self.wormholes.insert(wormhole);
    }

    pub fn wormholes(&self) -> &HashSet<WormholeType> {
        &self.wormholes
    }

    pub fn has_wormhole(&self, wormhole: WormholeType) -> bool {
        self.wormholes.contains(&wormhole)
    }

    pub fn shares_wormhole_with(&self, other: &System) -> bool {
        !self.wormholes.is_disjoint(&other.wormholes)
    }

    pub fn add_anomaly(&mut self, anomaly: AnomalyType) {
        self.anomalies.insert(anomaly);
    }

    pub fn remove_anomaly(&mut self, anomaly: AnomalyType) {
        self.anomalies.remove(&anomaly);
    }

    pub fn anomalies(&self) -> &HashSet<AnomalyType> {
        &self.anomalies
    }

    pub fn has_anomaly(&self, anomaly: AnomalyType) -> bool {
        self.anomalies.contains(&anomaly)
    }

    // --- command tokens ---

    pub fn place_command_token(&mut self, player: PlayerId) {
        self.command_tokens.insert(player);
    }

    pub fn remove_command_token(&mut self, player: &PlayerId) {
        self.command_tokens.remove(player);
    }

    pub fn has_command_token(&self, player: &PlayerId) -> bool {
        self.command_tokens.contains(player)
    }

    // --- aggregate queries ---

    /// Every unit in the system, space first, then planets in order
    pub fn all_units(&self) -> impl Iterator<Item = &Unit> {
        self.space_units
            .iter()
            .chain(self.planets.iter().flat_map(|p| p.units().iter()))
    }

    /// Locate and extract a unit from whichever container holds it
    pub fn take_unit(&mut self, unit_id: UnitId) -> Option<Unit> {
        if let Some(unit) = self.remove_unit_from_space(unit_id) {
            return Some(unit);
        }
        for planet in &mut self.planets {
            if let Some(unit) = planet.remove_unit(unit_id) {
                return Some(unit);
            }
        }
        None
    }
}
