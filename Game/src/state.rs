use crate::error::{ConfigurationError, PipelineError};
use crate::player::Player;
use galaxy::{Galaxy, System, SystemId};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use units::{PlayerId, Unit, UnitId};

/// The phases of a game round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Setup,
    Strategy,
    Action,
    Status,
    Agenda,
}

/// Where a unit currently sits: a system's space area, or a planet in it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLocation {
    pub system: SystemId,
    pub planet: Option<String>,
}

/// Canonical game state as an immutable snapshot.
///
/// Transition functions return a new `GameState` and leave the receiver
/// untouched. The tactical pipeline relies on that: it clones the snapshot,
/// works on the clone and discards it on failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    players: Vec<Player>,
    pub galaxy: Galaxy,
    pub phase: GamePhase,
    pub round: u32,
    pub speaker: Option<PlayerId>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            galaxy: Galaxy::new(),
            phase: GamePhase::Setup,
            round: 1,
            speaker: None,
        }
    }

    // --- players ---

    /// Add a player during setup. Seating order is insertion order.
    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Result<&Player, ConfigurationError> {
        self.players
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| ConfigurationError::PlayerNotInGame(id.clone()))
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Result<&mut Player, ConfigurationError> {
        self.players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ConfigurationError::PlayerNotInGame(id.clone()))
    }

    /// Seating order starting at `first`, wrapping clockwise
    pub fn seating_order_from(&self, first: &PlayerId) -> Vec<PlayerId> {
        let ids: Vec<PlayerId> = self.players.iter().map(|p| p.id.clone()).collect();
        match ids.iter().position(|id| id == first) {
            Some(start) => ids[start..]
                .iter()
                .chain(ids[..start].iter())
                .cloned()
                .collect(),
            None => ids,
        }
    }

    // --- systems ---

    pub fn system(&self, id: &SystemId) -> Option<&System> {
        self.galaxy.system(id)
    }

    pub fn system_mut(&mut self, id: &SystemId) -> Option<&mut System> {
        self.galaxy.system_mut(id)
    }

    // --- unit queries ---

    /// Locate a unit anywhere on the board
    pub fn find_unit(&self, unit_id: UnitId) -> Option<UnitLocation> {
        for system in self.galaxy.systems() {
            if system.space_units().iter().any(|u| u.id == unit_id) {
                return Some(UnitLocation {
                    system: system.id.clone(),
                    planet: None,
                });
            }
            for planet in system.planets() {
                if planet.units().iter().any(|u| u.id == unit_id) {
                    return Some(UnitLocation {
                        system: system.id.clone(),
                        planet: Some(planet.name.clone()),
                    });
                }
            }
        }
        None
    }

    pub fn unit(&self, unit_id: UnitId) -> Option<&Unit> {
        self.galaxy
            .systems()
            .flat_map(|s| s.all_units())
            .find(|u| u.id == unit_id)
    }

    /// Planets controlled by a player, as (system, planet name) pairs
    pub fn controlled_planets(&self, player: &PlayerId) -> Vec<(SystemId, String)> {
        let mut planets = Vec::new();
        for system in self.galaxy.systems() {
            for planet in system.planets() {
                if planet.is_controlled_by(player) {
                    planets.push((system.id.clone(), planet.name.clone()));
                }
            }
        }
        planets.sort();
        planets
    }

    // --- transitions ---

    /// New snapshot in the given phase
    pub fn with_phase(&self, phase: GamePhase) -> GameState {
        let mut next = self.clone();
        next.phase = phase;
        next
    }

    /// New snapshot with the speaker changed
    pub fn with_speaker(&self, speaker: PlayerId) -> GameState {
        let mut next = self.clone();
        next.speaker = Some(speaker);
        next
    }

    /// Status-phase round turnover: readies every planet, bumps the round
    /// counter and returns to the strategy phase.
    pub fn advance_round(&self) -> GameState {
        let mut next = self.clone();
        next.round += 1;
        next.phase = GamePhase::Strategy;
        for system in next.galaxy.systems_mut() {
            for planet in system.planets_mut() {
                planet.ready();
            }
        }
        info!("round {} begins", next.round);
        next
    }

    // --- invariants ---

    /// Structural invariants checked at step boundaries. A violation is a
    /// programming error and aborts the running tactical action.
    pub fn validate_invariants(&self) -> Result<(), PipelineError> {
        let mut seen: HashSet<UnitId> = HashSet::new();

        for system in self.galaxy.systems() {
            for unit in system.space_units() {
                if !seen.insert(unit.id) {
                    return Err(PipelineError::InvariantViolated {
                        description: format!("unit {} appears in two locations", unit.id),
                    });
                }
                if unit.unit_type.is_structure() {
                    return Err(PipelineError::InvariantViolated {
                        description: format!(
                            "{} in the space area of {}",
                            unit.unit_type, system.id
                        ),
                    });
                }
            }
            for planet in system.planets() {
                for unit in planet.units() {
                    if !seen.insert(unit.id) {
                        return Err(PipelineError::InvariantViolated {
                            description: format!("unit {} appears in two locations", unit.id),
                        });
                    }
                    if unit.unit_type.is_ship() {
                        return Err(PipelineError::InvariantViolated {
                            description: format!(
                                "{} on the surface of {}",
                                unit.unit_type, planet.name
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
