use crate::context::TacticalContext;
use crate::steps::TacticalStep;
use combat::DiceRoller;
use game::{GameState, PipelineError, ValidationError};
use log::info;

/// Step one: spend a tactic token and place a command token in the active
/// system. This is the commit point of the whole action.
pub struct ActivationStep;

impl TacticalStep for ActivationStep {
    fn name(&self) -> &'static str {
        "Activation"
    }

    fn can_execute(&self, _state: &GameState, _context: &TacticalContext) -> bool {
        // Activation is mandatory; the coordinator validated it up front.
        true
    }

    fn execute(
        &self,
        state: &GameState,
        context: &mut TacticalContext,
        _dice: &mut DiceRoller,
    ) -> Result<GameState, PipelineError> {
        let mut next = state.clone();
        let step = self.name().to_string();

        let system = next.system(&context.active_system).ok_or_else(|| {
            PipelineError::StepExecutionFailed {
                step: step.clone(),
                cause: ValidationError::InvalidSystem {
                    system: context.active_system.clone(),
                },
            }
        })?;
        if system.has_command_token(&context.player) {
            return Err(PipelineError::StepExecutionFailed {
                step,
                cause: ValidationError::SystemAlreadyActivated {
                    system: context.active_system.clone(),
                    player: context.player.clone(),
                },
            });
        }

        let player = next
            .player_mut(&context.player)
            .map_err(|error| PipelineError::InvariantViolated {
                description: error.to_string(),
            })?;
        if !player.command_sheet.spend_tactic_token() {
            return Err(PipelineError::StepExecutionFailed {
                step,
                cause: ValidationError::NoTacticToken,
            });
        }

        if let Some(system) = next.system_mut(&context.active_system) {
            system.place_command_token(context.player.clone());
        }
        info!(
            "{} activates {} (tactic pool spent)",
            context.player, context.active_system
        );

        Ok(next)
    }
}
