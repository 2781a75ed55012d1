//! The canonical movement validator.
//!
//! Single operations and joint plans both end up here. The board-level
//! checks (command tokens, enemy ships on the path, transport capacity,
//! fleet supply) wrap the rule engine, which owns range and anomaly
//! legality.

use crate::context::MovementContext;
use crate::operation::{Location, MovementOperation};
use crate::plan::{MovementPlan, ValidationResult};
use crate::rules::{path_effective_range, required_movement, MovementRuleEngine};
use galaxy::{HexCoord, SystemId};
use game::{ConfigurationError, GameState, ValidationError};
use log::debug;
use std::collections::{HashMap, HashSet};
use units::{unit_stats, PlayerId, Technology, Unit, UnitId};

/// Validates unit movement against the full rulebook
pub struct MovementValidator<'a> {
    state: &'a GameState,
    engine: MovementRuleEngine,
}

/// A ship whose required movement exceeds its unaided range
struct ShortfallShip {
    unit_id: UnitId,
    required: u32,
    base_range: u32,
}

impl<'a> MovementValidator<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            engine: MovementRuleEngine::new(),
        }
    }

    pub fn rule_engine(&self) -> &MovementRuleEngine {
        &self.engine
    }

    /// Boolean form of [`MovementValidator::validate_movement`]
    pub fn is_valid_movement(&self, operation: &MovementOperation) -> bool {
        self.validate_movement(operation).is_ok()
    }

    /// Validate a single movement operation.
    ///
    /// Checks run in order: systems exist, no own command token on the
    /// origin, a path exists, no enemy ships on intermediate systems, the
    /// rule engine allows the move, and ground forces are not teleporting
    /// between planets.
    pub fn validate_movement(&self, operation: &MovementOperation) -> Result<(), ValidationError> {
        let galaxy = &self.state.galaxy;

        let from_system = galaxy.system(&operation.from_system).ok_or_else(|| {
            ValidationError::InvalidSystem {
                system: operation.from_system.clone(),
            }
        })?;
        galaxy
            .system(&operation.to_system)
            .ok_or_else(|| ValidationError::InvalidSystem {
                system: operation.to_system.clone(),
            })?;

        // Own command token blocks moving out; other players' tokens do not.
        if from_system.has_command_token(&operation.player) {
            return Err(ValidationError::CommandTokenBlocksExit {
                system: operation.from_system.clone(),
            });
        }

        // Ground forces must transit space between planets.
        if let (Location::Planet(from), Location::Planet(to)) =
            (&operation.from_location, &operation.to_location)
        {
            if from != to {
                return Err(ValidationError::DirectPlanetTransfer {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        let path = galaxy
            .find_path(&operation.from_system, &operation.to_system)
            .ok_or_else(|| ValidationError::NoPathExists {
                from: operation.from_system.clone(),
                to: operation.to_system.clone(),
            })?;

        self.check_path_not_blocked(&path, &operation.player)?;

        let technologies = self.resolve_technologies(operation);
        let coords = self.path_coords(&path)?;
        let context = MovementContext {
            unit: &operation.unit,
            from: coords[0],
            to: coords[coords.len() - 1],
            technologies: &technologies,
            galaxy,
            path: Some(&coords),
            active_system: operation
                .active_system
                .as_ref()
                .and_then(|id| galaxy.coord_of(id)),
        };

        self.engine.check(&context)
    }

    /// Validate a complete movement plan jointly.
    ///
    /// Every ship is first measured against its unaided range; movement
    /// technologies are then assigned best-fit, one ship at a time, in their
    /// fixed order. Transport capacity and fleet supply close the check.
    /// Errors are itemized rather than short-circuited.
    pub fn validate_plan(
        &self,
        plan: &MovementPlan,
        player: &PlayerId,
        technologies: &HashSet<Technology>,
        active_system: Option<&SystemId>,
    ) -> Result<ValidationResult, ConfigurationError> {
        let galaxy = &self.state.galaxy;
        let fleet_pool = self.state.player(player)?.command_sheet.fleet_pool;

        let mut errors: Vec<ValidationError> = Vec::new();
        let mut technology_effects: HashMap<Technology, UnitId> = HashMap::new();
        let mut ships_needing_help: Vec<ShortfallShip> = Vec::new();
        let mut moving_ships: Vec<Unit> = Vec::new();

        for movement in &plan.ship_movements {
            let Some(unit) = self.ship_in_space(&movement.from_system, movement.unit_id) else {
                errors.push(ValidationError::UnitNotInSystem {
                    unit: movement.unit_id,
                    system: movement.from_system.clone(),
                });
                continue;
            };

            let path = match self.validate_ship_path(
                unit,
                &movement.from_system,
                &movement.to_system,
                player,
                technologies,
                active_system,
            ) {
                Ok(path) => path,
                Err(error) => {
                    errors.push(error);
                    moving_ships.push(unit.clone());
                    continue;
                }
            };

            let coords = match self.path_coords(&path) {
                Ok(coords) => coords,
                Err(error) => {
                    errors.push(error);
                    continue;
                }
            };

            let context = MovementContext {
                unit,
                from: coords[0],
                to: coords[coords.len() - 1],
                technologies,
                galaxy,
                path: Some(&coords),
                active_system: active_system.and_then(|id| galaxy.coord_of(id)),
            };

            let required = required_movement(&context);
            let base_range = path_effective_range(&context);
            if required > base_range {
                ships_needing_help.push(ShortfallShip {
                    unit_id: unit.id,
                    required,
                    base_range,
                });
            }
            moving_ships.push(unit.clone());
        }

        // Best-fit technology application: fixed order, greedy by first
        // coverable shortfall.
        for technology in Technology::movement_technologies() {
            if !technologies.contains(&technology) {
                continue;
            }
            let Some(boost) = technology.movement_boost() else {
                continue;
            };

            if boost.once_per_action {
                if let Some(index) = ships_needing_help
                    .iter()
                    .position(|ship| ship.required - ship.base_range <= boost.bonus as u32)
                {
                    let helped = ships_needing_help.remove(index);
                    debug!("{technology} assigned to ship {}", helped.unit_id);
                    technology_effects.insert(technology, helped.unit_id);
                }
            } else {
                ships_needing_help.retain(|ship| {
                    if ship.required - ship.base_range <= boost.bonus as u32 {
                        technology_effects.insert(technology, ship.unit_id);
                        false
                    } else {
                        true
                    }
                });
            }
        }

        for ship in &ships_needing_help {
            errors.push(ValidationError::InsufficientMovement {
                unit: ship.unit_id,
                distance: ship.required,
                range: ship.base_range,
            });
        }

        let transport_assignments =
            self.assign_transports(plan, &moving_ships, technologies, &mut errors);

        self.check_fleet_supply(plan, player, &moving_ships, fleet_pool, &mut errors);

        if errors.is_empty() {
            Ok(ValidationResult::valid(
                technology_effects,
                transport_assignments,
            ))
        } else {
            Ok(ValidationResult::invalid(errors))
        }
    }

    // --- helpers ---

    fn resolve_technologies(&self, operation: &MovementOperation) -> HashSet<Technology> {
        if let Some(technologies) = &operation.technologies {
            return technologies.clone();
        }
        if let Ok(player) = self.state.player(&operation.player) {
            return player.technologies().clone();
        }
        operation.unit.technologies.clone()
    }

    fn ship_in_space(&self, system_id: &SystemId, unit_id: UnitId) -> Option<&Unit> {
        self.state
            .system(system_id)?
            .space_units()
            .iter()
            .find(|u| u.id == unit_id)
    }

    fn path_coords(&self, path: &[SystemId]) -> Result<Vec<HexCoord>, ValidationError> {
        path.iter()
            .map(|id| {
                self.state
                    .galaxy
                    .coord_of(id)
                    .ok_or_else(|| ValidationError::InvalidSystem { system: id.clone() })
            })
            .collect()
    }

    fn check_path_not_blocked(
        &self,
        path: &[SystemId],
        player: &PlayerId,
    ) -> Result<(), ValidationError> {
        if path.len() <= 2 {
            return Ok(());
        }
        for system_id in &path[1..path.len() - 1] {
            if let Some(system) = self.state.system(system_id) {
                if system.has_enemy_ships(player) {
                    return Err(ValidationError::EnemyShipBlocksPath {
                        system: system_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Path-level checks shared by plan validation: command token on the
    /// origin, path existence, enemy blocking, anomaly legality.
    fn validate_ship_path(
        &self,
        unit: &Unit,
        from: &SystemId,
        to: &SystemId,
        player: &PlayerId,
        technologies: &HashSet<Technology>,
        active_system: Option<&SystemId>,
    ) -> Result<Vec<SystemId>, ValidationError> {
        let galaxy = &self.state.galaxy;

        let from_system = galaxy
            .system(from)
            .ok_or_else(|| ValidationError::InvalidSystem { system: from.clone() })?;
        galaxy
            .system(to)
            .ok_or_else(|| ValidationError::InvalidSystem { system: to.clone() })?;

        if from_system.has_command_token(player) {
            return Err(ValidationError::CommandTokenBlocksExit {
                system: from.clone(),
            });
        }

        let path = galaxy
            .find_path(from, to)
            .ok_or_else(|| ValidationError::NoPathExists {
                from: from.clone(),
                to: to.clone(),
            })?;

        self.check_path_not_blocked(&path, player)?;

        let coords = self.path_coords(&path)?;
        let context = MovementContext {
            unit,
            from: coords[0],
            to: coords[coords.len() - 1],
            technologies,
            galaxy,
            path: Some(&coords),
            active_system: active_system.and_then(|id| galaxy.coord_of(id)),
        };
        crate::rules::AnomalyRule.check(&context)?;

        Ok(path)
    }

    /// First-fit transport assignment. Ground forces lifting off planets
    /// need a slot on a moving ship; forces already in space ride along
    /// without a new assignment.
    fn assign_transports(
        &self,
        plan: &MovementPlan,
        moving_ships: &[Unit],
        technologies: &HashSet<Technology>,
        errors: &mut Vec<ValidationError>,
    ) -> HashMap<UnitId, Vec<UnitId>> {
        let mut capacity: Vec<(UnitId, u32)> = moving_ships
            .iter()
            .filter_map(|ship| {
                let slots =
                    unit_stats(ship.unit_type, ship.faction, technologies).capacity as u32;
                (slots > 0).then_some((ship.id, slots))
            })
            .collect();
        let total_capacity: u32 = capacity.iter().map(|(_, slots)| *slots).sum();

        let mut assignments: HashMap<UnitId, Vec<UnitId>> = HashMap::new();
        let mut required = 0u32;
        let mut unassigned = 0u32;

        for movement in &plan.ground_force_movements {
            if movement.from_location.is_space() {
                continue;
            }
            required += 1;
            match capacity.iter_mut().find(|(_, slots)| *slots > 0) {
                Some((ship_id, slots)) => {
                    *slots -= 1;
                    assignments
                        .entry(*ship_id)
                        .or_default()
                        .push(movement.unit_id);
                }
                None => unassigned += 1,
            }
        }

        if unassigned > 0 {
            errors.push(ValidationError::InsufficientTransport {
                required,
                available: total_capacity,
            });
        }

        assignments
    }

    /// Fleet supply is checked at the destination: after the move, the
    /// player's non-fighter ships there must fit inside the fleet pool.
    fn check_fleet_supply(
        &self,
        plan: &MovementPlan,
        player: &PlayerId,
        moving_ships: &[Unit],
        fleet_pool: u32,
        errors: &mut Vec<ValidationError>,
    ) {
        let mut destinations: Vec<SystemId> = Vec::new();
        for movement in &plan.ship_movements {
            if !destinations.contains(&movement.to_system) {
                destinations.push(movement.to_system.clone());
            }
        }

        for destination in destinations {
            let moving_out: HashSet<UnitId> = plan
                .ship_movements
                .iter()
                .filter(|m| m.from_system == destination)
                .map(|m| m.unit_id)
                .collect();

            let staying = self
                .state
                .system(&destination)
                .map(|system| {
                    system
                        .space_units_of(player)
                        .filter(|u| counts_against_fleet_supply(u))
                        .filter(|u| !moving_out.contains(&u.id))
                        .count() as u32
                })
                .unwrap_or(0);

            let arriving = plan
                .ship_movements
                .iter()
                .filter(|m| m.to_system == destination)
                .filter_map(|m| moving_ships.iter().find(|u| u.id == m.unit_id))
                .filter(|u| counts_against_fleet_supply(u))
                .count() as u32;

            let total = staying + arriving;
            if total > fleet_pool {
                errors.push(ValidationError::FleetSupplyExceeded {
                    system: destination,
                    ships: total,
                    fleet_pool,
                });
            }
        }
    }
}

/// Fighters ride inside capacity and never count against the fleet pool
fn counts_against_fleet_supply(unit: &Unit) -> bool {
    unit.is_ship() && !unit.unit_type.consumes_capacity()
}
