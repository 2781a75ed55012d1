//! Applies validated movement to a working game state.
//!
//! The executor assumes validation already happened; anything it cannot
//! resolve at this point is an invariant violation that aborts the running
//! tactical action.

use crate::operation::{Location, MovementOperation};
use crate::plan::MovementPlan;
use galaxy::SystemId;
use game::{GameState, PipelineError};
use log::debug;
use units::{Unit, UnitId};

pub struct MovementExecutor;

impl MovementExecutor {
    /// Execute every movement in the plan, ships first, then ground forces
    pub fn execute_plan(state: &mut GameState, plan: &MovementPlan) -> Result<(), PipelineError> {
        for movement in &plan.ship_movements {
            let unit = take_from(
                state,
                &movement.from_system,
                &Location::Space,
                movement.unit_id,
            )?;
            debug!(
                "{} {} moves {} -> {}",
                unit.owner, unit.unit_type, movement.from_system, movement.to_system
            );
            place_at(state, &movement.to_system, &Location::Space, unit)?;
        }

        for movement in &plan.ground_force_movements {
            let unit = take_from(
                state,
                &movement.from_system,
                &movement.from_location,
                movement.unit_id,
            )?;
            debug!(
                "{} {} moves {}/{} -> {}/{}",
                unit.owner,
                unit.unit_type,
                movement.from_system,
                movement.from_location,
                movement.to_system,
                movement.to_location
            );
            place_at(state, &movement.to_system, &movement.to_location, unit)?;
        }

        Ok(())
    }

    /// Execute a single validated operation
    pub fn execute_operation(
        state: &mut GameState,
        operation: &MovementOperation,
    ) -> Result<(), PipelineError> {
        let unit = take_from(
            state,
            &operation.from_system,
            &operation.from_location,
            operation.unit.id,
        )?;
        place_at(state, &operation.to_system, &operation.to_location, unit)
    }
}

fn take_from(
    state: &mut GameState,
    system_id: &SystemId,
    location: &Location,
    unit_id: UnitId,
) -> Result<Unit, PipelineError> {
    let system = state
        .system_mut(system_id)
        .ok_or_else(|| PipelineError::InvariantViolated {
            description: format!("system {system_id} vanished during execution"),
        })?;

    let unit = match location {
        Location::Space => system.remove_unit_from_space(unit_id),
        Location::Planet(name) => system
            .planet_mut(name)
            .and_then(|planet| planet.remove_unit(unit_id)),
    };

    unit.ok_or_else(|| PipelineError::InvariantViolated {
        description: format!("unit {unit_id} not found at {system_id}/{location}"),
    })
}

fn place_at(
    state: &mut GameState,
    system_id: &SystemId,
    location: &Location,
    unit: Unit,
) -> Result<(), PipelineError> {
    let system = state
        .system_mut(system_id)
        .ok_or_else(|| PipelineError::InvariantViolated {
            description: format!("system {system_id} vanished during execution"),
        })?;

    match location {
        Location::Space => {
            system.place_unit_in_space(unit);
            Ok(())
        }
        Location::Planet(name) => match system.planet_mut(name) {
            Some(planet) => {
                planet.place_unit(unit);
                Ok(())
            }
            None => Err(PipelineError::InvariantViolated {
                description: format!("planet {name} not found in {system_id}"),
            }),
        },
    }
}
