//! Space cannon offense, resolved after the movement step.
//!
//! Firing order is the active player first, then the remaining players in
//! seating order. Non-active players may only target the active player;
//! the active player picks any enemy with ships in the system. Hits destroy
//! ships, fighters first, and destroyed units go back to reinforcements.

use crate::dice::{calculate_hits, DiceRoller};
use galaxy::SystemId;
use game::GameState;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use units::{unit_stats, PlayerId, Technology, UnitId, UnitType};

/// One player's space cannon volley
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceCannonVolley {
    pub firing_player: PlayerId,
    pub target_player: Option<PlayerId>,
    pub dice_rolled: u32,
    pub hits: u32,
    pub destroyed: Vec<(UnitId, UnitType)>,
}

/// Full space cannon offense outcome for one tactical action
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceCannonReport {
    pub volleys: Vec<SpaceCannonVolley>,
}

/// A firing unit with its resolved roll profile
struct FiringUnit {
    owner: PlayerId,
    unit_type: UnitType,
    hit_on: u8,
    dice: u8,
}

/// Players with space cannon units able to fire into the active system, in
/// firing order. Units in the system always participate; PDS in adjacent
/// systems participate when their owner has the PDS II upgrade.
pub fn space_cannon_participants(
    state: &GameState,
    active_system: &SystemId,
    active_player: &PlayerId,
) -> Vec<PlayerId> {
    let order = state.seating_order_from(active_player);
    order
        .into_iter()
        .filter(|player| !firing_units_for(state, active_system, player).is_empty())
        .collect()
}

fn firing_units_for(
    state: &GameState,
    active_system: &SystemId,
    player: &PlayerId,
) -> Vec<FiringUnit> {
    let technologies = state
        .player(player)
        .map(|p| p.technologies().clone())
        .unwrap_or_default();

    let mut units = Vec::new();

    if let Some(system) = state.system(active_system) {
        for unit in system.all_units() {
            if &unit.owner != player {
                continue;
            }
            let stats = unit_stats(unit.unit_type, unit.faction, &technologies);
            if let Some(profile) = stats.space_cannon {
                units.push(FiringUnit {
                    owner: unit.owner.clone(),
                    unit_type: unit.unit_type,
                    hit_on: profile.hit_on,
                    dice: profile.dice,
                });
            }
        }
    }

    // PDS II reaches into adjacent systems.
    if technologies.contains(&Technology::PdsIi) {
        for neighbor_id in state.galaxy.adjacent_systems(active_system) {
            let Some(neighbor) = state.system(&neighbor_id) else {
                continue;
            };
            for planet in neighbor.planets() {
                for unit in planet.units() {
                    if &unit.owner == player && unit.unit_type == UnitType::Pds {
                        let stats = unit_stats(unit.unit_type, unit.faction, &technologies);
                        if let Some(profile) = stats.space_cannon {
                            units.push(FiringUnit {
                                owner: unit.owner.clone(),
                                unit_type: unit.unit_type,
                                hit_on: profile.hit_on,
                                dice: profile.dice,
                            });
                        }
                    }
                }
            }
        }
    }

    units
}

/// Players other than `firing_player` with ships in the active system,
/// sorted for deterministic choice.
fn valid_targets(
    state: &GameState,
    active_system: &SystemId,
    firing_player: &PlayerId,
    active_player: &PlayerId,
) -> Vec<PlayerId> {
    let Some(system) = state.system(active_system) else {
        return Vec::new();
    };

    let mut targets: Vec<PlayerId> = system
        .players_with_ships()
        .into_iter()
        .filter(|p| p != firing_player)
        .collect();
    targets.sort();

    // Non-active players may only shoot at the active player.
    if firing_player != active_player {
        targets.retain(|p| p == active_player);
    }

    targets
}

/// Resolve the full space cannon offense step.
///
/// `target_choices` lets the host pick a target per firing player; without
/// a choice the first valid target in sorted order is used.
pub fn resolve_space_cannon_offense(
    state: &mut GameState,
    active_system: &SystemId,
    active_player: &PlayerId,
    target_choices: &HashMap<PlayerId, PlayerId>,
    dice: &mut DiceRoller,
) -> SpaceCannonReport {
    let mut report = SpaceCannonReport::default();

    for firing_player in space_cannon_participants(state, active_system, active_player) {
        let units = firing_units_for(state, active_system, &firing_player);
        let targets = valid_targets(state, active_system, &firing_player, active_player);

        let target = match target_choices.get(&firing_player) {
            Some(choice) if targets.contains(choice) => Some(choice.clone()),
            _ => targets.first().cloned(),
        };

        let Some(target) = target else {
            report.volleys.push(SpaceCannonVolley {
                firing_player,
                target_player: None,
                dice_rolled: 0,
                hits: 0,
                destroyed: Vec::new(),
            });
            continue;
        };

        let mut dice_rolled = 0u32;
        let mut hits = 0u32;
        for unit in &units {
            let results = dice.roll(
                unit.dice as u32,
                format!("space cannon {} ({})", unit.unit_type, unit.owner),
            );
            dice_rolled += unit.dice as u32;
            hits += calculate_hits(&results, unit.hit_on);
        }

        let destroyed = assign_hits(state, active_system, &target, hits);
        debug!(
            "{firing_player} space cannon: {hits} hits on {target}, {} ships destroyed",
            destroyed.len()
        );

        report.volleys.push(SpaceCannonVolley {
            firing_player,
            target_player: Some(target),
            dice_rolled,
            hits,
            destroyed,
        });
    }

    report
}

/// Destroy up to `hits` of the target's ships, fighters first, then in
/// placement order. Destroyed ships return to their owner's reinforcements.
fn assign_hits(
    state: &mut GameState,
    system_id: &SystemId,
    target: &PlayerId,
    hits: u32,
) -> Vec<(UnitId, UnitType)> {
    let mut candidates: Vec<(UnitId, UnitType)> = Vec::new();
    if let Some(system) = state.system(system_id) {
        let target_ships: Vec<(UnitId, UnitType)> = system
            .space_units_of(target)
            .filter(|u| u.is_ship())
            .map(|u| (u.id, u.unit_type))
            .collect();
        candidates.extend(
            target_ships
                .iter()
                .filter(|(_, t)| *t == UnitType::Fighter)
                .copied(),
        );
        candidates.extend(
            target_ships
                .iter()
                .filter(|(_, t)| *t != UnitType::Fighter)
                .copied(),
        );
    }

    let mut destroyed = Vec::new();
    for (unit_id, unit_type) in candidates.into_iter().take(hits as usize) {
        let removed = state
            .system_mut(system_id)
            .and_then(|system| system.remove_unit_from_space(unit_id));
        if let Some(unit) = removed {
            if let Ok(owner) = state.player_mut(&unit.owner) {
                owner.return_to_reinforcements(unit.unit_type, 1);
            }
            destroyed.push((unit_id, unit_type));
        }
    }

    destroyed
}
