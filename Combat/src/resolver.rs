use galaxy::SystemId;
use game::GameState;
use units::PlayerId;

/// Contract for the external combat resolver.
///
/// The tactical pipeline calls these at its combat windows and otherwise
/// treats battles as opaque: the resolver receives a snapshot and returns
/// the post-combat snapshot.
pub trait CombatResolver {
    /// Resolve a full space battle in the given system
    fn resolve_space_combat(&mut self, state: &GameState, system: &SystemId) -> GameState;

    /// Resolve ground combat on a planet between two players
    fn resolve_ground_combat(
        &mut self,
        state: &GameState,
        planet: &str,
        attacker: &PlayerId,
        defender: &PlayerId,
    ) -> GameState;
}

/// Pass-through resolver for hosts that resolve combat elsewhere. The
/// pipeline still surfaces the combat timing windows; the state is returned
/// unchanged.
pub struct NoopCombatResolver;

impl CombatResolver for NoopCombatResolver {
    fn resolve_space_combat(&mut self, state: &GameState, _system: &SystemId) -> GameState {
        state.clone()
    }

    fn resolve_ground_combat(
        &mut self,
        state: &GameState,
        _planet: &str,
        _attacker: &PlayerId,
        _defender: &PlayerId,
    ) -> GameState {
        state.clone()
    }
}
