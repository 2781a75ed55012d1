//! The tactical action coordinator.
//!
//! Binds the movement validator to the step pipeline and owns the
//! transaction boundary: everything before activation is recoverable
//! validation, everything after runs to completion or aborts back to the
//! pre-action snapshot. The coordinator also exposes the read-only queries
//! hosts use between actions.

use crate::blockade::BlockadeManager;
use crate::context::{
    ActionChoices, ActionError, StepOutcome, TacticalActionResult, TacticalContext, TimingWindow,
};
use crate::production::ProductionOrder;
use crate::steps::{
    ActivationStep, InvasionStep, MovementStep, ProductionStep, SpaceCannonStep, TacticalStep,
};
use combat::DiceRoller;
use galaxy::{HexCoord, SystemId};
use game::{ConfigurationError, GameState, ValidationError};
use log::{info, warn};
use movement::{
    path_effective_range, MovementContext, MovementOperation, MovementPlan, MovementValidator,
    ValidationResult,
};
use std::collections::HashSet;
use units::{PlayerId, Technology, Unit, UnitId};

/// Runs tactical actions against immutable snapshots
pub struct TacticalActionCoordinator {
    steps: Vec<Box<dyn TacticalStep>>,
}

impl TacticalActionCoordinator {
    pub fn new() -> Self {
        Self {
            steps: vec![
                Box::new(ActivationStep),
                Box::new(MovementStep),
                Box::new(SpaceCannonStep),
                Box::new(InvasionStep),
                Box::new(ProductionStep),
            ],
        }
    }

    /// Validate and execute one complete tactical action.
    ///
    /// On any failure the input state stands: validation failures are
    /// reported before anything runs, and step failures abandon the working
    /// copy of the state.
    pub fn propose_tactical_action(
        &self,
        state: &GameState,
        player: &PlayerId,
        active_system: &SystemId,
        movement_plan: Option<MovementPlan>,
        production_order: Option<ProductionOrder>,
        choices: ActionChoices,
    ) -> TacticalActionResult {
        let mut dice = DiceRoller::from_seed(choices.dice_seed);
        let mut context = TacticalContext::new(active_system.clone(), player.clone(), choices);
        context.movement_plan = Some(movement_plan.unwrap_or_default());
        context.production_order = production_order;

        // --- pre-commit validation, all recoverable ---

        let player_data = match state.player(player) {
            Ok(player_data) => player_data,
            Err(error) => return failed(context, dice, error.into()),
        };

        if let Err(error) = validate_activation(state, active_system, player) {
            return failed(context, dice, error.into());
        }

        let technologies = player_data.technologies().clone();
        let plan = context
            .movement_plan
            .clone()
            .unwrap_or_default();
        let validator = MovementValidator::new(state);
        let movement_result =
            match validator.validate_plan(&plan, player, &technologies, Some(active_system)) {
                Ok(result) => result,
                Err(error) => return failed(context, dice, error.into()),
            };
        context.movement_result = Some(movement_result.clone());
        if let Some(first) = movement_result.errors.first().cloned() {
            warn!(
                "{player} tactical action on {active_system} rejected: {:?}",
                movement_result.errors
            );
            return failed(context, dice, first.into());
        }

        // --- committed: run the pipeline on a working copy ---

        info!("{player} begins tactical action on {active_system}");
        let mut current = state.clone();
        let mut outcomes = Vec::new();

        for step in &self.steps {
            if !step.can_execute(&current, &context) {
                outcomes.push(StepOutcome {
                    step: step.name().to_string(),
                    executed: false,
                });
                continue;
            }

            reach_pre_step_window(step.name(), &current, &mut context);

            match step.execute(&current, &mut context, &mut dice) {
                Ok(next) => {
                    current = next;
                    outcomes.push(StepOutcome {
                        step: step.name().to_string(),
                        executed: true,
                    });
                }
                Err(error) => {
                    warn!("tactical action aborted in {}: {error}", step.name());
                    let mut result = failed(context, dice, error.into());
                    result.step_outcomes = outcomes;
                    return result;
                }
            }

            reach_post_step_window(step.name(), &current, &mut context);
        }

        if let Err(error) = current.validate_invariants() {
            let mut result = failed(context, dice, error.into());
            result.step_outcomes = outcomes;
            return result;
        }

        TacticalActionResult {
            new_state: Some(current),
            error: None,
            step_outcomes: outcomes,
            windows_reached: context.windows_reached,
            movement_result: context.movement_result,
            space_cannon_report: context.space_cannon_report,
            invasion_report: context.invasion_report,
            production_report: context.production_report,
            rift_casualties: context.rift_casualties,
            dice_log: dice.take_log(),
        }
    }
}

impl Default for TacticalActionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

fn reach_pre_step_window(step: &str, _state: &GameState, context: &mut TacticalContext) {
    match step {
        "Invasion" => context.reach_window(TimingWindow::BeforeInvasion),
        "Production" => context.reach_window(TimingWindow::BeforeProduction),
        _ => {}
    }
}

fn reach_post_step_window(step: &str, state: &GameState, context: &mut TacticalContext) {
    match step {
        "Activation" => context.reach_window(TimingWindow::AfterActivation),
        "Movement" => {
            context.reach_window(TimingWindow::AfterMovement);
            if requires_space_combat(state, &context.active_system) {
                context.reach_window(TimingWindow::StartOfSpaceCombat);
            }
        }
        _ => {}
    }
}

fn failed(context: TacticalContext, mut dice: DiceRoller, error: ActionError) -> TacticalActionResult {
    TacticalActionResult {
        new_state: None,
        error: Some(error),
        step_outcomes: Vec::new(),
        windows_reached: context.windows_reached,
        movement_result: context.movement_result,
        space_cannon_report: context.space_cannon_report,
        invasion_report: context.invasion_report,
        production_report: context.production_report,
        rift_casualties: context.rift_casualties,
        dice_log: dice.take_log(),
    }
}

fn validate_activation(
    state: &GameState,
    system_id: &SystemId,
    player: &PlayerId,
) -> Result<(), ValidationError> {
    let system = state
        .system(system_id)
        .ok_or_else(|| ValidationError::InvalidSystem {
            system: system_id.clone(),
        })?;
    if system.has_command_token(player) {
        return Err(ValidationError::SystemAlreadyActivated {
            system: system_id.clone(),
            player: player.clone(),
        });
    }
    let has_token = state
        .player(player)
        .map(|p| p.command_sheet.tactic_pool > 0)
        .unwrap_or(false);
    if !has_token {
        return Err(ValidationError::NoTacticToken);
    }
    Ok(())
}

// --- public API ---

/// Propose a tactical action with the default pipeline
pub fn propose_tactical_action(
    state: &GameState,
    player: &PlayerId,
    active_system: &SystemId,
    movement_plan: Option<MovementPlan>,
    production_order: Option<ProductionOrder>,
    choices: ActionChoices,
) -> TacticalActionResult {
    TacticalActionCoordinator::new().propose_tactical_action(
        state,
        player,
        active_system,
        movement_plan,
        production_order,
        choices,
    )
}

/// Whether a single movement operation is legal in this state
pub fn is_valid_movement(state: &GameState, operation: &MovementOperation) -> bool {
    MovementValidator::new(state).is_valid_movement(operation)
}

/// Validate a joint movement plan without executing anything
pub fn validate_movement_plan(
    state: &GameState,
    plan: &MovementPlan,
    player: &PlayerId,
    technologies: &HashSet<Technology>,
) -> Result<ValidationResult, ConfigurationError> {
    MovementValidator::new(state).validate_plan(plan, player, technologies, None)
}

/// Effective movement range of a unit along a concrete path of systems
pub fn effective_movement_range(state: &GameState, unit: &Unit, path: &[SystemId]) -> u32 {
    let coords: Vec<HexCoord> = path
        .iter()
        .filter_map(|id| state.galaxy.coord_of(id))
        .collect();
    if coords.len() != path.len() || coords.is_empty() {
        return 0;
    }

    let technologies = state
        .player(&unit.owner)
        .map(|p| p.technologies().clone())
        .unwrap_or_else(|_| unit.technologies.clone());

    let context = MovementContext {
        unit,
        from: coords[0],
        to: coords[coords.len() - 1],
        technologies: &technologies,
        galaxy: &state.galaxy,
        path: Some(&coords),
        active_system: None,
    };
    path_effective_range(&context)
}

/// Whether a player may activate the system right now
pub fn can_activate_system(state: &GameState, system_id: &SystemId, player: &PlayerId) -> bool {
    validate_activation(state, system_id, player).is_ok()
}

/// Space combat is required when two or more players have ships there
pub fn requires_space_combat(state: &GameState, system_id: &SystemId) -> bool {
    state
        .system(system_id)
        .map(|system| system.players_with_ships().len() >= 2)
        .unwrap_or(false)
}

/// Whether a production unit is currently blockaded
pub fn is_blockaded(state: &GameState, production_unit: UnitId) -> bool {
    BlockadeManager::is_unit_blockaded(state, production_unit)
}
