use crate::context::TacticalContext;
use crate::production::ProductionManager;
use crate::steps::{step_failure, TacticalStep};
use combat::DiceRoller;
use game::{GameState, PipelineError};

/// Step five: production. Runs when the active player has a unit with
/// production in the active system; producing nothing is a no-op.
pub struct ProductionStep;

impl TacticalStep for ProductionStep {
    fn name(&self) -> &'static str {
        "Production"
    }

    fn can_execute(&self, state: &GameState, context: &TacticalContext) -> bool {
        ProductionManager::has_production_units(state, &context.active_system, &context.player)
    }

    fn execute(
        &self,
        state: &GameState,
        context: &mut TacticalContext,
        _dice: &mut DiceRoller,
    ) -> Result<GameState, PipelineError> {
        let mut next = state.clone();

        let Some(order) = context.production_order.clone() else {
            return Ok(next);
        };

        let report = ProductionManager::execute_order(
            &mut next,
            &context.player,
            &context.active_system,
            &order,
        )
        .map_err(|error| step_failure(self.name(), error))?;

        context.production_report = Some(report);
        next.validate_invariants()?;
        Ok(next)
    }
}
