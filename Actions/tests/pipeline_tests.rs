//! End-to-end tactical action pipeline behavior: commit points, atomic
//! rollback, timing windows and dice determinism.

use actions::{
    can_activate_system, propose_tactical_action, requires_space_combat, ActionChoices,
    ActionError, ProductionOrder, TimingWindow,
};
use combat::DiceRoller;
use galaxy::{AnomalyType, HexCoord, Planet, System, SystemId};
use game::{GameState, PipelineError, Player, ValidationError};
use movement::{Location, MovementPlan};
use units::{Faction, Unit, UnitType};

// Three systems in a row with two players
fn base_state() -> GameState {
    let mut state = GameState::new();
    state.add_player(Player::new("p1", Faction::Sol));
    state.add_player(Player::new("p2", Faction::Barony));
    for (i, id) in ["a", "b", "c"].iter().enumerate() {
        let system_id = SystemId::from(*id);
        state
            .galaxy
            .place(HexCoord::new(i as i32, 0), system_id.clone());
        state.galaxy.register(System::new(system_id));
    }
    state
}

fn put_ship(state: &mut GameState, system: &str, unit_type: UnitType, owner: &str) -> Unit {
    let unit = Unit::new(unit_type, owner);
    state
        .system_mut(&system.into())
        .unwrap()
        .place_unit_in_space(unit.clone());
    unit
}

#[test]
fn test_successful_action_places_token_and_spends_tactic() {
    let state = base_state();
    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"b".into(),
        None,
        None,
        ActionChoices::default(),
    );

    assert!(result.is_success(), "error: {:?}", result.error);
    let new_state = result.new_state.unwrap();
    assert!(new_state
        .system(&"b".into())
        .unwrap()
        .has_command_token(&"p1".into()));
    assert_eq!(
        new_state
            .player(&"p1".into())
            .unwrap()
            .command_sheet
            .tactic_pool,
        2
    );
    // the input snapshot is untouched
    assert!(!state
        .system(&"b".into())
        .unwrap()
        .has_command_token(&"p1".into()));
    assert_eq!(
        state.player(&"p1".into()).unwrap().command_sheet.tactic_pool,
        3
    );
}

#[test]
fn test_activation_rejected_when_token_already_there() {
    let mut state = base_state();
    state
        .system_mut(&"b".into())
        .unwrap()
        .place_command_token("p1".into());

    assert!(!can_activate_system(&state, &"b".into(), &"p1".into()));

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"b".into(),
        None,
        None,
        ActionChoices::default(),
    );
    assert!(!result.is_success());
    assert!(matches!(
        result.error,
        Some(ActionError::Validation(
            ValidationError::SystemAlreadyActivated { .. }
        ))
    ));
    // nothing ran
    assert!(result.step_outcomes.is_empty());
}

#[test]
fn test_activation_rejected_without_tactic_tokens() {
    let mut state = base_state();
    let sheet = &mut state.player_mut(&"p1".into()).unwrap().command_sheet;
    while sheet.spend_tactic_token() {}

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"b".into(),
        None,
        None,
        ActionChoices::default(),
    );
    assert!(matches!(
        result.error,
        Some(ActionError::Validation(ValidationError::NoTacticToken))
    ));
}

#[test]
fn test_invalid_movement_plan_rejected_before_commit() {
    let mut state = base_state();
    let carrier = put_ship(&mut state, "a", UnitType::Carrier, "p1");

    // carrier has move 1, the plan asks for 2 with no technology
    let mut plan = MovementPlan::new();
    plan.add_ship_movement(carrier.id, "a", "c");

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"c".into(),
        Some(plan),
        None,
        ActionChoices::default(),
    );

    assert!(!result.is_success());
    assert!(matches!(
        result.error,
        Some(ActionError::Validation(
            ValidationError::InsufficientMovement { .. }
        ))
    ));
    // rejection happened before activation: no steps ran, no token placed
    assert!(result.step_outcomes.is_empty());
}

#[test]
fn test_atomic_rollback_when_production_fails() {
    let mut state = base_state();
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    // production site in the active system
    let mut planet = Planet::new("Forge", 4, 0);
    planet.set_controller(Some("p1".into()));
    planet.place_unit(Unit::new(UnitType::SpaceDock, "p1"));
    state.system_mut(&"c".into()).unwrap().add_planet(planet);

    // only one cruiser left in reinforcements, order asks for two
    state
        .player_mut(&"p1".into())
        .unwrap()
        .set_reinforcements(UnitType::Cruiser, 1);

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(cruiser.id, "a", "c");
    let mut order = ProductionOrder::new();
    order.add(UnitType::Cruiser, 2, Location::Space);

    let before = state.clone();
    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"c".into(),
        Some(plan),
        Some(order),
        ActionChoices::default(),
    );

    assert!(!result.is_success());
    match result.error {
        Some(ActionError::Pipeline(PipelineError::StepExecutionFailed { step, cause })) => {
            assert_eq!(step, "Production");
            assert_eq!(
                cause,
                ValidationError::InsufficientReinforcements {
                    unit_type: UnitType::Cruiser,
                    requested: 2,
                    available: 1,
                }
            );
        }
        other => panic!("expected production step failure, got {other:?}"),
    }

    // the earlier steps did run...
    assert!(result
        .step_outcomes
        .iter()
        .any(|o| o.step == "Activation" && o.executed));
    assert!(result
        .step_outcomes
        .iter()
        .any(|o| o.step == "Movement" && o.executed));

    // ...but the caller's state is exactly the pre-action snapshot
    assert_eq!(state, before);
    assert!(!state
        .system(&"c".into())
        .unwrap()
        .has_command_token(&"p1".into()));
    assert_eq!(state.system(&"a".into()).unwrap().space_units().len(), 1);
}

#[test]
fn test_empty_movement_plan_moves_nothing() {
    let mut state = base_state();
    put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"b".into(),
        Some(MovementPlan::new()),
        None,
        ActionChoices::default(),
    );

    assert!(result.is_success());
    let new_state = result.new_state.unwrap();
    // apart from the activation itself, nothing changed
    assert_eq!(new_state.system(&"a".into()).unwrap().space_units().len(), 1);
    assert_eq!(new_state.system(&"b".into()).unwrap().space_units().len(), 0);
}

#[test]
fn test_timing_windows_in_order() {
    let mut state = base_state();
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let mut planet = Planet::new("Forge", 3, 0);
    planet.set_controller(Some("p1".into()));
    planet.place_unit(Unit::new(UnitType::SpaceDock, "p1"));
    state.system_mut(&"c".into()).unwrap().add_planet(planet);

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(cruiser.id, "a", "c");

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"c".into(),
        Some(plan),
        None,
        ActionChoices::default(),
    );

    assert!(result.is_success());
    assert_eq!(
        result.windows_reached,
        vec![
            TimingWindow::AfterActivation,
            TimingWindow::AfterMovement,
            TimingWindow::BeforeProduction,
        ]
    );
}

#[test]
fn test_space_combat_window_surfaces_when_contested() {
    let mut state = base_state();
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");
    put_ship(&mut state, "b", UnitType::Destroyer, "p2");

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(cruiser.id, "a", "b");

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"b".into(),
        Some(plan),
        None,
        ActionChoices::default(),
    );

    assert!(result.is_success());
    assert!(requires_space_combat(
        result.new_state.as_ref().unwrap(),
        &"b".into()
    ));
    assert!(result
        .windows_reached
        .contains(&TimingWindow::StartOfSpaceCombat));
}

#[test]
fn test_same_seed_replays_identically() {
    let mut state = base_state();
    state
        .system_mut(&"b".into())
        .unwrap()
        .add_anomaly(AnomalyType::GravityRift);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let make_plan = |cruiser: &Unit| {
        let mut plan = MovementPlan::new();
        plan.add_ship_movement(cruiser.id, "a", "c");
        plan
    };
    let choices = ActionChoices {
        dice_seed: 99,
        ..Default::default()
    };

    let first = propose_tactical_action(
        &state,
        &"p1".into(),
        &"c".into(),
        Some(make_plan(&cruiser)),
        None,
        choices.clone(),
    );
    let second = propose_tactical_action(
        &state,
        &"p1".into(),
        &"c".into(),
        Some(make_plan(&cruiser)),
        None,
        choices,
    );

    assert_eq!(first.dice_log, second.dice_log);
    assert_eq!(first.rift_casualties, second.rift_casualties);
    assert_eq!(first.new_state, second.new_state);
}

#[test]
fn test_gravity_rift_survival_matches_seeded_roll() {
    let mut state = base_state();
    state
        .system_mut(&"b".into())
        .unwrap()
        .add_anomaly(AnomalyType::GravityRift);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(cruiser.id, "a", "c");

    let seed = 7;
    // the rift check is the first (and only) roll of this action
    let expected_roll = DiceRoller::from_seed(seed).roll(1, "probe")[0];

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"c".into(),
        Some(plan),
        None,
        ActionChoices {
            dice_seed: seed,
            ..Default::default()
        },
    );

    assert!(result.is_success());
    let new_state = result.new_state.unwrap();
    let survived = new_state
        .system(&"c".into())
        .unwrap()
        .space_units()
        .iter()
        .any(|u| u.id == cruiser.id);

    if expected_roll <= 3 {
        assert!(!survived);
        assert_eq!(result.rift_casualties, vec![(cruiser.id, UnitType::Cruiser)]);
        // the casualty went back to reinforcements
        let pool = new_state
            .player(&"p1".into())
            .unwrap()
            .reinforcements(UnitType::Cruiser);
        let before = state
            .player(&"p1".into())
            .unwrap()
            .reinforcements(UnitType::Cruiser);
        assert_eq!(pool, before + 1);
    } else {
        assert!(survived);
        assert!(result.rift_casualties.is_empty());
    }
}

#[test]
fn test_arriving_fleet_blockade_returns_captured_units() {
    let mut state = base_state();

    // p2 runs a dock world in b with no ships overhead, and holds a
    // captured p1 fighter
    let mut planet = Planet::new("Yard", 2, 0);
    planet.set_controller(Some("p2".into()));
    planet.place_unit(Unit::new(UnitType::SpaceDock, "p2"));
    state.system_mut(&"b".into()).unwrap().add_planet(planet);
    state
        .player_mut(&"p2".into())
        .unwrap()
        .capture_unit(Unit::new(UnitType::Fighter, "p1"));

    let fighters_before = state
        .player(&"p1".into())
        .unwrap()
        .reinforcements(UnitType::Fighter);

    // p1 moves a destroyer in, blockading the dock
    let destroyer = put_ship(&mut state, "a", UnitType::Destroyer, "p1");
    let mut plan = MovementPlan::new();
    plan.add_ship_movement(destroyer.id, "a", "b");

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"b".into(),
        Some(plan),
        None,
        ActionChoices::default(),
    );

    assert!(result.is_success(), "error: {:?}", result.error);
    let new_state = result.new_state.unwrap();
    assert!(new_state
        .player(&"p2".into())
        .unwrap()
        .captured_units()
        .is_empty());
    assert_eq!(
        new_state
            .player(&"p1".into())
            .unwrap()
            .reinforcements(UnitType::Fighter),
        fighters_before + 1
    );
}

#[test]
fn test_producing_zero_units_is_a_noop() {
    let mut state = base_state();
    let mut planet = Planet::new("Forge", 3, 0);
    planet.set_controller(Some("p1".into()));
    planet.place_unit(Unit::new(UnitType::SpaceDock, "p1"));
    state.system_mut(&"b".into()).unwrap().add_planet(planet);

    let result = propose_tactical_action(
        &state,
        &"p1".into(),
        &"b".into(),
        None,
        Some(ProductionOrder::new()),
        ActionChoices::default(),
    );

    assert!(result.is_success());
    let new_state = result.new_state.unwrap();
    // planet not exhausted, no units appeared
    let planet = new_state
        .system(&"b".into())
        .unwrap()
        .planet("Forge")
        .unwrap();
    assert!(!planet.is_exhausted());
    assert_eq!(planet.units().len(), 1);
}
