use galaxy::{HexCoord, Planet, System};
use game::{GamePhase, GameState, Player};
use units::{Faction, Unit, UnitType};

fn seeded_state() -> GameState {
    let mut state = GameState::new();
    state.add_player(Player::new("p1", Faction::Sol));
    state.add_player(Player::new("p2", Faction::Arborec));

    let mut system = System::new("center");
    let mut planet = Planet::new("Mecatol Rex", 1, 6);
    planet.set_controller(Some("p1".into()));
    planet.place_unit(Unit::new(UnitType::Infantry, "p1"));
    system.add_planet(planet);
    system.place_unit_in_space(Unit::new(UnitType::Cruiser, "p2"));

    state.galaxy.place(HexCoord::new(0, 0), "center".into());
    state.galaxy.register(system);
    state
}

#[test]
fn test_find_unit_in_space_and_on_planet() {
    let state = seeded_state();
    let system = state.system(&"center".into()).unwrap();

    let ship_id = system.space_units()[0].id;
    let location = state.find_unit(ship_id).unwrap();
    assert_eq!(location.system, "center".into());
    assert!(location.planet.is_none());

    let infantry_id = system.planet("Mecatol Rex").unwrap().units()[0].id;
    let location = state.find_unit(infantry_id).unwrap();
    assert_eq!(location.planet.as_deref(), Some("Mecatol Rex"));
}

#[test]
fn test_controlled_planets() {
    let state = seeded_state();
    let controlled = state.controlled_planets(&"p1".into());
    assert_eq!(controlled.len(), 1);
    assert_eq!(controlled[0].1, "Mecatol Rex");
    assert!(state.controlled_planets(&"p2".into()).is_empty());
}

#[test]
fn test_snapshot_equality_survives_serde() {
    let state = seeded_state();
    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, restored);
}

#[test]
fn test_clone_is_independent() {
    let state = seeded_state();
    let mut working = state.clone();
    working.phase = GamePhase::Action;
    working
        .system_mut(&"center".into())
        .unwrap()
        .place_unit_in_space(Unit::new(UnitType::Destroyer, "p1"));

    assert_eq!(state.phase, GamePhase::Setup);
    assert_eq!(state.system(&"center".into()).unwrap().space_units().len(), 1);
    assert_eq!(working.system(&"center".into()).unwrap().space_units().len(), 2);
}

#[test]
fn test_invariants_hold_for_seeded_state() {
    assert!(seeded_state().validate_invariants().is_ok());
}
