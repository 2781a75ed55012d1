use crate::blockade::BlockadeManager;
use crate::context::TacticalContext;
use crate::steps::TacticalStep;
use combat::DiceRoller;
use galaxy::{AnomalyType, SystemId};
use game::{GameState, PipelineError};
use log::debug;
use movement::{Location, MovementExecutor};
use units::UnitId;

/// Step two: execute the validated movement plan atomically, then roll
/// gravity-rift survival for every rift traversed.
pub struct MovementStep;

impl TacticalStep for MovementStep {
    fn name(&self) -> &'static str {
        "Movement"
    }

    fn can_execute(&self, _state: &GameState, context: &TacticalContext) -> bool {
        context.movement_plan.is_some()
    }

    fn execute(
        &self,
        state: &GameState,
        context: &mut TacticalContext,
        dice: &mut DiceRoller,
    ) -> Result<GameState, PipelineError> {
        let Some(plan) = context.movement_plan.clone() else {
            return Ok(state.clone());
        };

        let mut next = state.clone();
        if plan.is_empty() {
            // Moving no ships is a legal movement step.
            return Ok(next);
        }

        MovementExecutor::execute_plan(&mut next, &plan)?;

        // Every gravity rift exited or passed through demands one survival
        // roll per unit: 1-3 destroys, 4-10 survives.
        let mut traversals: Vec<(UnitId, SystemId, Location)> = Vec::new();
        for movement in &plan.ship_movements {
            for _ in rifts_on_path(&next, &movement.from_system, &movement.to_system) {
                traversals.push((
                    movement.unit_id,
                    movement.to_system.clone(),
                    Location::Space,
                ));
            }
        }
        for movement in &plan.ground_force_movements {
            for _ in rifts_on_path(&next, &movement.from_system, &movement.to_system) {
                traversals.push((
                    movement.unit_id,
                    movement.to_system.clone(),
                    movement.to_location.clone(),
                ));
            }
        }

        for (unit_id, destination, location) in traversals {
            let Some(unit) = next.unit(unit_id) else {
                continue; // already lost to an earlier rift
            };
            let label = format!("gravity rift survival {}", unit.unit_type);
            let roll = dice.roll(1, label)[0];
            if roll <= 3 {
                destroy_at(&mut next, &destination, &location, unit_id, context);
            }
        }

        // An arriving fleet can blockade production units in the systems it
        // entered; the capture-return side effect fires immediately.
        let mut destinations: Vec<SystemId> = Vec::new();
        for movement in &plan.ship_movements {
            if !destinations.contains(&movement.to_system) {
                destinations.push(movement.to_system.clone());
            }
        }
        for system_id in destinations {
            let production_units: Vec<UnitId> = next
                .system(&system_id)
                .map(|system| {
                    system
                        .all_units()
                        .filter(|unit| unit.has_production())
                        .map(|unit| unit.id)
                        .collect()
                })
                .unwrap_or_default();
            for unit_id in production_units {
                BlockadeManager::apply_blockade_effects(&mut next, unit_id);
            }
        }

        next.validate_invariants()?;
        Ok(next)
    }
}

/// Systems with a gravity rift that the move exits or passes through; the
/// destination itself never triggers a roll.
fn rifts_on_path(state: &GameState, from: &SystemId, to: &SystemId) -> Vec<SystemId> {
    let Some(path) = state.galaxy.find_path(from, to) else {
        return Vec::new();
    };
    path[..path.len().saturating_sub(1)]
        .iter()
        .filter(|id| {
            state
                .system(id)
                .map(|system| system.has_anomaly(AnomalyType::GravityRift))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

fn destroy_at(
    state: &mut GameState,
    system_id: &SystemId,
    location: &Location,
    unit_id: UnitId,
    context: &mut TacticalContext,
) {
    let removed = state.system_mut(system_id).and_then(|system| match location {
        Location::Space => system.remove_unit_from_space(unit_id),
        Location::Planet(name) => system
            .planet_mut(name)
            .and_then(|planet| planet.remove_unit(unit_id)),
    });

    if let Some(unit) = removed {
        debug!("gravity rift destroys {} {}", unit.owner, unit.unit_type);
        if let Ok(owner) = state.player_mut(&unit.owner) {
            owner.return_to_reinforcements(unit.unit_type, 1);
        }
        context.rift_casualties.push((unit_id, unit.unit_type));
    }
}
