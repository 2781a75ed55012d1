use crate::context::TacticalContext;
use crate::invasion::InvasionController;
use crate::steps::{step_failure, TacticalStep};
use combat::DiceRoller;
use game::{GameState, PipelineError};

/// Step four: invasion. Runs when the active player has ground forces in
/// the active system's space area.
pub struct InvasionStep;

impl TacticalStep for InvasionStep {
    fn name(&self) -> &'static str {
        "Invasion"
    }

    fn can_execute(&self, state: &GameState, context: &TacticalContext) -> bool {
        InvasionController::can_invade(state, &context.active_system, &context.player)
    }

    fn execute(
        &self,
        state: &GameState,
        context: &mut TacticalContext,
        dice: &mut DiceRoller,
    ) -> Result<GameState, PipelineError> {
        let mut next = state.clone();
        let commitments = context.choices.ground_force_commitments.clone();
        let report = InvasionController::run(
            &mut next,
            &context.active_system,
            &context.player,
            &commitments,
            dice,
            None,
        )
        .map_err(|error| step_failure(self.name(), error))?;

        context.invasion_report = Some(report);
        next.validate_invariants()?;
        Ok(next)
    }
}
