//! The tactical action steps.
//!
//! Each step is a small object answering `can_execute` against the current
//! state and, when applicable, producing the next state. Steps never mutate
//! their input: they clone, work on the clone and hand it back, which keeps
//! rollback a matter of dropping the clone.

use crate::context::{ActionError, TacticalContext};
use combat::DiceRoller;
use game::{GameState, PipelineError};

mod activation;
mod invasion_step;
mod movement_step;
mod production_step;
mod space_cannon_step;

pub use activation::ActivationStep;
pub use invasion_step::InvasionStep;
pub use movement_step::MovementStep;
pub use production_step::ProductionStep;
pub use space_cannon_step::SpaceCannonStep;

/// One step of the tactical action pipeline
pub trait TacticalStep {
    /// Step name for outcomes and error reporting
    fn name(&self) -> &'static str;

    /// Whether this step applies in the current state
    fn can_execute(&self, state: &GameState, context: &TacticalContext) -> bool;

    /// Execute the step, returning the next state. Errors abort the whole
    /// tactical action; the caller keeps its pre-action snapshot.
    fn execute(
        &self,
        state: &GameState,
        context: &mut TacticalContext,
        dice: &mut DiceRoller,
    ) -> Result<GameState, PipelineError>;
}

/// Map a sub-system failure into a pipeline error for this step.
/// Validation failures become step failures; a configuration error after
/// commit means the state changed underneath us, which is an invariant
/// violation.
pub(crate) fn step_failure(step: &str, error: ActionError) -> PipelineError {
    match error {
        ActionError::Validation(cause) => PipelineError::StepExecutionFailed {
            step: step.to_string(),
            cause,
        },
        ActionError::Pipeline(error) => error,
        ActionError::Configuration(error) => PipelineError::InvariantViolated {
            description: error.to_string(),
        },
    }
}
