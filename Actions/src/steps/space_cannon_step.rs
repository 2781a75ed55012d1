use crate::context::TacticalContext;
use crate::steps::TacticalStep;
use combat::{resolve_space_cannon_offense, space_cannon_participants, DiceRoller};
use game::{GameState, PipelineError};

/// Step three: space cannon offense. Every player with a space cannon able
/// to reach the active system fires, active player first.
pub struct SpaceCannonStep;

impl TacticalStep for SpaceCannonStep {
    fn name(&self) -> &'static str {
        "Space Cannon Offense"
    }

    fn can_execute(&self, state: &GameState, context: &TacticalContext) -> bool {
        !space_cannon_participants(state, &context.active_system, &context.player).is_empty()
    }

    fn execute(
        &self,
        state: &GameState,
        context: &mut TacticalContext,
        dice: &mut DiceRoller,
    ) -> Result<GameState, PipelineError> {
        let mut next = state.clone();
        let report = resolve_space_cannon_offense(
            &mut next,
            &context.active_system,
            &context.player,
            &context.choices.space_cannon_targets,
            dice,
        );
        context.space_cannon_report = Some(report);
        next.validate_invariants()?;
        Ok(next)
    }
}
