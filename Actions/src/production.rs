//! Production during the tactical action's production step.
//!
//! Validation covers cost (fighters and infantry are bought in pairs, a
//! half-pair still costs the pair), reinforcement counts, placement
//! legality, the enemy-ship restriction on ship production, the Arborec
//! space-dock exception, and the combined production capacity of the
//! system. Payment exhausts the player's ready planets, richest first, then
//! falls back to trade goods.

use crate::blockade::BlockadeManager;
use crate::context::ActionError;
use galaxy::{Planet, SystemId};
use game::{GameState, ValidationError};
use log::{debug, info};
use movement::Location;
use serde::{Deserialize, Serialize};
use units::{unit_stats, PlayerId, Unit, UnitType};

/// One batch of units of a single type bound for one placement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductionRequest {
    pub unit_type: UnitType,
    pub count: u32,
    pub placement: Location,
}

/// Everything a player wants to produce this step
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub items: Vec<ProductionRequest>,
}

impl ProductionOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, unit_type: UnitType, count: u32, placement: Location) {
        self.items.push(ProductionRequest {
            unit_type,
            count,
            placement,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(|item| item.count == 0)
    }

    pub fn total_units(&self) -> u32 {
        self.items.iter().map(|item| item.count).sum()
    }
}

/// What a production step actually did
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionReport {
    pub produced: Vec<ProductionRequest>,
    pub resources_spent: u32,
    pub planets_exhausted: Vec<String>,
    pub trade_goods_spent: u32,
}

pub struct ProductionManager;

impl ProductionManager {
    /// Effective production value of one unit. Space docks produce the host
    /// planet's resources plus their base bonus.
    pub fn production_value(unit: &Unit, planet: Option<&Planet>) -> u32 {
        let stats = unit.stats();
        if unit.unit_type == UnitType::SpaceDock {
            match planet {
                Some(planet) => planet.resources + stats.production as u32,
                None => stats.production as u32,
            }
        } else {
            stats.production as u32
        }
    }

    /// Combined production capacity of a player's units in a system
    pub fn combined_production(state: &GameState, system_id: &SystemId, player: &PlayerId) -> u32 {
        let Some(system) = state.system(system_id) else {
            return 0;
        };

        let mut total = 0;
        for planet in system.planets() {
            for unit in planet.units_of(player) {
                total += Self::production_value(unit, Some(planet));
            }
        }
        for unit in system.space_units_of(player) {
            total += Self::production_value(unit, None);
        }
        total
    }

    /// Whether the player has any unit with production in the system
    pub fn has_production_units(state: &GameState, system_id: &SystemId, player: &PlayerId) -> bool {
        state
            .system(system_id)
            .map(|system| {
                system
                    .all_units()
                    .any(|u| &u.owner == player && u.has_production())
            })
            .unwrap_or(false)
    }

    /// Resources the player can spend right now: ready controlled planets
    /// plus trade goods.
    pub fn spendable_resources(state: &GameState, player: &PlayerId) -> u32 {
        let mut total = 0;
        for system in state.galaxy.systems() {
            for planet in system.planets() {
                if planet.is_controlled_by(player) && !planet.is_exhausted() {
                    total += planet.resources;
                }
            }
        }
        if let Ok(player) = state.player(player) {
            total += player.command_sheet.trade_goods();
        }
        total
    }

    /// Resource cost of an order; pairs are charged per purchase
    pub fn order_cost(state: &GameState, player: &PlayerId, order: &ProductionOrder) -> u32 {
        let technologies = state
            .player(player)
            .map(|p| p.technologies().clone())
            .unwrap_or_default();
        let faction = state.player(player).map(|p| p.faction).ok();

        order
            .items
            .iter()
            .map(|item| {
                let stats = unit_stats(item.unit_type, faction, &technologies);
                if item.unit_type.is_produced_in_pairs() {
                    item.count.div_ceil(2) * stats.cost
                } else {
                    item.count * stats.cost
                }
            })
            .sum()
    }

    /// Validate a full production order in the active system
    pub fn validate_order(
        state: &GameState,
        player_id: &PlayerId,
        active_system: &SystemId,
        order: &ProductionOrder,
    ) -> Result<(), ActionError> {
        let system = state
            .system(active_system)
            .ok_or_else(|| ValidationError::InvalidSystem {
                system: active_system.clone(),
            })?;
        let player = state.player(player_id)?;

        if order.is_empty() {
            return Ok(());
        }

        if !Self::has_production_units(state, active_system, player_id) {
            return Err(ValidationError::InvalidPlacement {
                unit_type: order.items[0].unit_type,
                location: format!("{active_system} (no production units)"),
            }
            .into());
        }

        let blockaded = BlockadeManager::is_system_blockaded_for(state, active_system, player_id);
        let space_producer = system
            .space_units_of(player_id)
            .any(|unit| unit.has_production());
        let non_dock_producer = system
            .all_units()
            .any(|u| &u.owner == player_id && u.has_production() && u.unit_type != UnitType::SpaceDock);

        for item in &order.items {
            if item.count == 0 {
                continue;
            }

            // Reinforcements, counting dual units individually
            let available = player.reinforcements(item.unit_type);
            if available < item.count {
                return Err(ValidationError::InsufficientReinforcements {
                    unit_type: item.unit_type,
                    requested: item.count,
                    available,
                }
                .into());
            }

            if item.unit_type.is_ship() {
                if !item.placement.is_space() {
                    return Err(ValidationError::InvalidPlacement {
                        unit_type: item.unit_type,
                        location: item.placement.to_string(),
                    }
                    .into());
                }
                if blockaded {
                    return Err(ValidationError::BlockadedProduction {
                        system: active_system.clone(),
                    }
                    .into());
                }
                // Ships cannot be produced into a contested space area.
                if system.has_enemy_ships(player_id) {
                    return Err(ValidationError::InvalidPlacement {
                        unit_type: item.unit_type,
                        location: format!("{active_system} (enemy ships present)"),
                    }
                    .into());
                }
            } else if item.unit_type.is_ground_force() {
                // Arborec space docks cannot produce infantry; some other
                // production source must supply them.
                if player.faction == units::Faction::Arborec
                    && item.unit_type == UnitType::Infantry
                    && !non_dock_producer
                {
                    return Err(ValidationError::InvalidPlacement {
                        unit_type: item.unit_type,
                        location: format!("{active_system} (Arborec space dock)"),
                    }
                    .into());
                }

                match &item.placement {
                    Location::Planet(name) => {
                        let Some(planet) = system.planet(name) else {
                            return Err(ValidationError::InvalidPlacement {
                                unit_type: item.unit_type,
                                location: name.clone(),
                            }
                            .into());
                        };
                        let planet_producer = planet
                            .units_of(player_id)
                            .any(|unit| unit.has_production());
                        let space_fallback =
                            space_producer && planet.is_controlled_by(player_id);
                        if !planet_producer && !space_fallback {
                            return Err(ValidationError::InvalidPlacement {
                                unit_type: item.unit_type,
                                location: name.clone(),
                            }
                            .into());
                        }
                    }
                    Location::Space => {
                        if !space_producer {
                            return Err(ValidationError::InvalidPlacement {
                                unit_type: item.unit_type,
                                location: Location::Space.to_string(),
                            }
                            .into());
                        }
                    }
                }
            } else {
                // Structures are placed by other means, never produced here.
                return Err(ValidationError::InvalidPlacement {
                    unit_type: item.unit_type,
                    location: item.placement.to_string(),
                }
                .into());
            }
        }

        // Combined capacity, each unit counted individually
        let capacity = Self::combined_production(state, active_system, player_id);
        let used = order.total_units();
        if used > capacity {
            return Err(ValidationError::ProductionCapacityExceeded { used, capacity }.into());
        }

        // Cost
        let required = Self::order_cost(state, player_id, order);
        let available = Self::spendable_resources(state, player_id);
        if required > available {
            return Err(ValidationError::InsufficientResources {
                required,
                available,
            }
            .into());
        }

        Ok(())
    }

    /// Validate and execute a production order, mutating the working state
    pub fn execute_order(
        state: &mut GameState,
        player_id: &PlayerId,
        active_system: &SystemId,
        order: &ProductionOrder,
    ) -> Result<ProductionReport, ActionError> {
        Self::validate_order(state, player_id, active_system, order)?;

        if order.is_empty() {
            return Ok(ProductionReport::default());
        }

        let cost = Self::order_cost(state, player_id, order);
        let (planets_exhausted, trade_goods_spent) = pay(state, player_id, cost)?;

        let (faction, technologies) = {
            let player = state.player_mut(player_id)?;
            for item in &order.items {
                player.take_reinforcements(item.unit_type, item.count)?;
            }
            (player.faction, player.technologies().clone())
        };

        for item in &order.items {
            for _ in 0..item.count {
                let unit = Unit::new(item.unit_type, player_id.clone())
                    .with_faction(faction)
                    .with_technologies(technologies.iter().copied());
                let system = state.system_mut(active_system).ok_or_else(|| {
                    ValidationError::InvalidSystem {
                        system: active_system.clone(),
                    }
                })?;
                match &item.placement {
                    Location::Space => system.place_unit_in_space(unit),
                    Location::Planet(name) => {
                        if let Some(planet) = system.planet_mut(name) {
                            planet.place_unit(unit);
                        }
                    }
                }
            }
            debug!(
                "{player_id} produced {}x {} at {}",
                item.count, item.unit_type, item.placement
            );
        }

        info!("{player_id} production in {active_system}: {cost} resources spent");

        Ok(ProductionReport {
            produced: order.items.clone(),
            resources_spent: cost,
            planets_exhausted,
            trade_goods_spent,
        })
    }
}

/// Exhaust ready controlled planets, richest first, then cover the rest
/// with trade goods.
fn pay(
    state: &mut GameState,
    player_id: &PlayerId,
    cost: u32,
) -> Result<(Vec<String>, u32), ActionError> {
    let mut candidates: Vec<(SystemId, String, u32)> = Vec::new();
    for system in state.galaxy.systems() {
        for planet in system.planets() {
            if planet.is_controlled_by(player_id) && !planet.is_exhausted() && planet.resources > 0
            {
                candidates.push((system.id.clone(), planet.name.clone(), planet.resources));
            }
        }
    }
    candidates.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));

    let mut remaining = cost;
    let mut exhausted = Vec::new();
    for (system_id, planet_name, resources) in candidates {
        if remaining == 0 {
            break;
        }
        if let Some(planet) = state
            .system_mut(&system_id)
            .and_then(|system| system.planet_mut(&planet_name))
        {
            planet.exhaust();
            exhausted.push(planet_name);
            remaining = remaining.saturating_sub(resources);
        }
    }

    let mut trade_goods_spent = 0;
    if remaining > 0 {
        let sheet = &mut state.player_mut(player_id)?.command_sheet;
        if !sheet.spend_trade_goods(remaining) {
            // validate_order checked total spendable; reaching this means
            // the state changed underneath us
            return Err(ValidationError::InsufficientResources {
                required: cost,
                available: cost - remaining,
            }
            .into());
        }
        trade_goods_spent = remaining;
    }

    Ok((exhausted, trade_goods_spent))
}
