//! The invasion sub-pipeline inside a tactical action.
//!
//! Five sub-steps in order: bombardment, commit ground forces, space cannon
//! defense, ground combat, establish control. Committing no ground forces
//! short-circuits straight past the rest. Ground combat itself is delegated
//! to the external combat resolver; without one the defenders simply hold.

use crate::context::ActionError;
use combat::{calculate_hits, CombatResolver, DiceRoller};
use galaxy::SystemId;
use game::{GameState, ValidationError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use units::{PlayerId, UnitId, UnitType};

/// What an invasion did, sub-step by sub-step
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvasionReport {
    pub bombardment_hits: Vec<(String, u32)>,
    pub bombardment_casualties: Vec<(UnitId, UnitType, String)>,
    pub committed: Vec<(UnitId, String)>,
    pub defense_casualties: Vec<(UnitId, UnitType, String)>,
    pub ground_combat_planets: Vec<String>,
    pub control_established: Vec<String>,
    pub already_controlled: Vec<String>,
}

pub struct InvasionController;

impl InvasionController {
    /// Invasion is possible when the active player has ground forces in the
    /// active system's space area (landed there by the movement step).
    pub fn can_invade(state: &GameState, system_id: &SystemId, player: &PlayerId) -> bool {
        state
            .system(system_id)
            .map(|system| {
                system
                    .space_units_of(player)
                    .any(|unit| unit.is_ground_force())
            })
            .unwrap_or(false)
    }

    /// Flip control of a planet to the invader. Gaining control of a planet
    /// the player already controls is an error (Rule 25.2).
    pub fn establish_control(
        state: &mut GameState,
        system_id: &SystemId,
        planet_name: &str,
        player: &PlayerId,
    ) -> Result<(), ValidationError> {
        let planet = state
            .system_mut(system_id)
            .and_then(|system| system.planet_mut(planet_name))
            .ok_or_else(|| ValidationError::InvalidPlacement {
                unit_type: UnitType::Infantry,
                location: planet_name.to_string(),
            })?;

        if planet.is_controlled_by(player) {
            return Err(ValidationError::AlreadyControls {
                player: player.clone(),
                planet: planet_name.to_string(),
            });
        }

        planet.set_controller(Some(player.clone()));
        info!("{player} takes control of {planet_name}");
        Ok(())
    }

    /// Run the full invasion sub-pipeline on the working state
    pub fn run(
        state: &mut GameState,
        active_system: &SystemId,
        player: &PlayerId,
        commitments: &[(UnitId, String)],
        dice: &mut DiceRoller,
        mut resolver: Option<&mut dyn CombatResolver>,
    ) -> Result<InvasionReport, ActionError> {
        let mut report = InvasionReport::default();

        bombardment_step(state, active_system, player, dice, &mut report)?;

        // Commit ground forces; with nothing to commit the invasion ends
        // here and the action proceeds to production.
        if commitments.is_empty() {
            return Ok(report);
        }
        commit_step(state, active_system, player, commitments, &mut report)?;

        space_cannon_defense_step(state, active_system, player, dice, &mut report)?;

        ground_combat_step(state, active_system, player, &mut resolver, &mut report);

        establish_control_step(state, active_system, player, &mut report);

        Ok(report)
    }
}

/// Bombardment (sub-step one). Planetary shield blocks everything except a
/// war sun; hits fall on enemy ground forces, infantry first.
fn bombardment_step(
    state: &mut GameState,
    active_system: &SystemId,
    player: &PlayerId,
    dice: &mut DiceRoller,
    report: &mut InvasionReport,
) -> Result<(), ActionError> {
    let system = state
        .system(active_system)
        .ok_or_else(|| ValidationError::InvalidSystem {
            system: active_system.clone(),
        })?;

    let bombers: Vec<(UnitType, u8, u8)> = system
        .space_units_of(player)
        .filter_map(|unit| {
            unit.stats()
                .bombardment
                .map(|profile| (unit.unit_type, profile.hit_on, profile.dice))
        })
        .collect();
    if bombers.is_empty() {
        return Ok(());
    }

    let targets: Vec<(String, bool)> = system
        .planets()
        .iter()
        .filter(|planet| {
            !planet.is_controlled_by(player) && planet.has_enemy_ground_forces(player)
        })
        .map(|planet| (planet.name.clone(), planet.has_planetary_shield()))
        .collect();

    for (index, (unit_type, hit_on, dice_count)) in bombers.iter().enumerate() {
        // War suns ignore planetary shields; everyone else is blocked.
        let eligible: Vec<&String> = targets
            .iter()
            .filter(|(_, shielded)| !shielded || *unit_type == UnitType::WarSun)
            .map(|(name, _)| name)
            .collect();
        if eligible.is_empty() {
            continue;
        }
        let planet_name = eligible[index % eligible.len()].clone();

        let results = dice.roll(
            *dice_count as u32,
            format!("bombardment {unit_type} vs {planet_name}"),
        );
        let hits = calculate_hits(&results, *hit_on);
        debug!("{player} bombardment of {planet_name}: {hits} hits");
        report.bombardment_hits.push((planet_name.clone(), hits));

        let casualties =
            destroy_enemy_ground_forces(state, active_system, &planet_name, player, hits);
        report.bombardment_casualties.extend(casualties);
    }

    Ok(())
}

/// Commit ground forces (sub-step two): lift each named unit out of the
/// space area and land it on its planet.
fn commit_step(
    state: &mut GameState,
    active_system: &SystemId,
    player: &PlayerId,
    commitments: &[(UnitId, String)],
    report: &mut InvasionReport,
) -> Result<(), ActionError> {
    for (unit_id, planet_name) in commitments {
        let unit = {
            let system =
                state
                    .system_mut(active_system)
                    .ok_or_else(|| ValidationError::InvalidSystem {
                        system: active_system.clone(),
                    })?;
            let unit = system.remove_unit_from_space(*unit_id).ok_or_else(|| {
                ValidationError::UnitNotInSystem {
                    unit: *unit_id,
                    system: active_system.clone(),
                }
            })?;
            if !unit.is_ground_force() || &unit.owner != player {
                let unit_type = unit.unit_type;
                system.place_unit_in_space(unit);
                return Err(ValidationError::InvalidPlacement {
                    unit_type,
                    location: planet_name.clone(),
                }
                .into());
            }
            unit
        };

        let planet = state
            .system_mut(active_system)
            .and_then(|system| system.planet_mut(planet_name))
            .ok_or_else(|| ValidationError::InvalidPlacement {
                unit_type: unit.unit_type,
                location: planet_name.clone(),
            })?;
        planet.place_unit(unit);
        report.committed.push((*unit_id, planet_name.clone()));
    }
    Ok(())
}

/// Space cannon defense (sub-step three): PDS on each invaded planet fire
/// at the forces that just landed.
fn space_cannon_defense_step(
    state: &mut GameState,
    active_system: &SystemId,
    player: &PlayerId,
    dice: &mut DiceRoller,
    report: &mut InvasionReport,
) -> Result<(), ActionError> {
    let mut invaded: Vec<String> = report
        .committed
        .iter()
        .map(|(_, planet)| planet.clone())
        .collect();
    invaded.dedup();

    for planet_name in invaded {
        let defenders: Vec<(UnitType, u8, u8)> = state
            .system(active_system)
            .and_then(|system| system.planet(&planet_name))
            .map(|planet| {
                planet
                    .units()
                    .iter()
                    .filter(|unit| &unit.owner != player)
                    .filter_map(|unit| {
                        unit.stats()
                            .space_cannon
                            .map(|profile| (unit.unit_type, profile.hit_on, profile.dice))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut hits = 0;
        for (unit_type, hit_on, dice_count) in defenders {
            let results = dice.roll(
                dice_count as u32,
                format!("space cannon defense {unit_type} on {planet_name}"),
            );
            hits += calculate_hits(&results, hit_on);
        }

        if hits > 0 {
            let casualties =
                destroy_player_ground_forces(state, active_system, &planet_name, player, hits);
            report.defense_casualties.extend(casualties);
        }
    }

    Ok(())
}

/// Ground combat (sub-step four), delegated to the external resolver
fn ground_combat_step(
    state: &mut GameState,
    active_system: &SystemId,
    player: &PlayerId,
    resolver: &mut Option<&mut dyn CombatResolver>,
    report: &mut InvasionReport,
) {
    let contested: Vec<(String, PlayerId)> = state
        .system(active_system)
        .map(|system| {
            system
                .planets()
                .iter()
                .filter(|planet| {
                    planet.has_ground_forces_of(player) && planet.has_enemy_ground_forces(player)
                })
                .filter_map(|planet| {
                    planet
                        .units()
                        .iter()
                        .find(|unit| &unit.owner != player && unit.is_ground_force())
                        .map(|defender| (planet.name.clone(), defender.owner.clone()))
                })
                .collect()
        })
        .unwrap_or_default();

    for (planet_name, defender) in contested {
        report.ground_combat_planets.push(planet_name.clone());
        if let Some(resolver) = resolver.as_mut() {
            let resolved = resolver.resolve_ground_combat(state, &planet_name, player, &defender);
            *state = resolved;
        }
    }
}

/// Establish control (sub-step five): planets cleared of enemies flip to
/// the invader; planets already held just record the fact.
fn establish_control_step(
    state: &mut GameState,
    active_system: &SystemId,
    player: &PlayerId,
    report: &mut InvasionReport,
) {
    let mut candidates: Vec<String> = report
        .committed
        .iter()
        .map(|(_, planet)| planet.clone())
        .collect();
    candidates.dedup();

    for planet_name in candidates {
        let holds = state
            .system(active_system)
            .and_then(|system| system.planet(&planet_name))
            .map(|planet| {
                planet.has_ground_forces_of(player) && !planet.has_enemy_ground_forces(player)
            })
            .unwrap_or(false);
        if !holds {
            continue;
        }

        match InvasionController::establish_control(state, active_system, &planet_name, player) {
            Ok(()) => report.control_established.push(planet_name),
            Err(ValidationError::AlreadyControls { .. }) => {
                report.already_controlled.push(planet_name)
            }
            Err(_) => {}
        }
    }
}

/// Destroy up to `hits` enemy ground forces on a planet, infantry before
/// mechs, returning casualties to their owners' reinforcements.
fn destroy_enemy_ground_forces(
    state: &mut GameState,
    system_id: &SystemId,
    planet_name: &str,
    player: &PlayerId,
    hits: u32,
) -> Vec<(UnitId, UnitType, String)> {
    destroy_ground_forces_where(state, system_id, planet_name, hits, |owner| owner != player)
}

fn destroy_player_ground_forces(
    state: &mut GameState,
    system_id: &SystemId,
    planet_name: &str,
    player: &PlayerId,
    hits: u32,
) -> Vec<(UnitId, UnitType, String)> {
    destroy_ground_forces_where(state, system_id, planet_name, hits, |owner| owner == player)
}

fn destroy_ground_forces_where(
    state: &mut GameState,
    system_id: &SystemId,
    planet_name: &str,
    hits: u32,
    owner_matches: impl Fn(&PlayerId) -> bool,
) -> Vec<(UnitId, UnitType, String)> {
    // Snapshot targets first, then mutate; infantry absorb hits before mechs.
    let mut targets: Vec<(UnitId, UnitType)> = Vec::new();
    if let Some(planet) = state
        .system(system_id)
        .and_then(|system| system.planet(planet_name))
    {
        let forces: Vec<(UnitId, UnitType)> = planet
            .units()
            .iter()
            .filter(|unit| owner_matches(&unit.owner) && unit.is_ground_force())
            .map(|unit| (unit.id, unit.unit_type))
            .collect();
        targets.extend(
            forces
                .iter()
                .filter(|(_, t)| *t == UnitType::Infantry)
                .copied(),
        );
        targets.extend(
            forces
                .iter()
                .filter(|(_, t)| *t != UnitType::Infantry)
                .copied(),
        );
    }

    let mut destroyed = Vec::new();
    for (unit_id, unit_type) in targets.into_iter().take(hits as usize) {
        let removed = state
            .system_mut(system_id)
            .and_then(|system| system.planet_mut(planet_name))
            .and_then(|planet| planet.remove_unit(unit_id));
        if let Some(unit) = removed {
            if let Ok(owner) = state.player_mut(&unit.owner) {
                owner.return_to_reinforcements(unit.unit_type, 1);
            }
            destroyed.push((unit_id, unit_type, planet_name.to_string()));
        }
    }
    destroyed
}
