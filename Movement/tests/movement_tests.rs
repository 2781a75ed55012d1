//! Single-operation movement validation against the rulebook.

use galaxy::{AnomalyType, HexCoord, Planet, System, SystemId, WormholeType};
use game::{GameState, Player, ValidationError};
use movement::{Location, MovementExecutor, MovementOperation, MovementValidator};
use units::{Faction, Unit, UnitType};

// Helper to assemble a state with systems laid out in a row
fn state_with_line(ids: &[&str]) -> GameState {
    let mut state = GameState::new();
    state.add_player(Player::new("p1", Faction::Sol));
    state.add_player(Player::new("p2", Faction::Barony));
    for (i, id) in ids.iter().enumerate() {
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
fn test_cruiser_moves_two_systems() {
    let mut state = state_with_line(&["a", "b", "c"]);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let validator = MovementValidator::new(&state);
    let op = MovementOperation::new(cruiser, "a", "c", "p1");
    assert!(validator.is_valid_movement(&op));
}

#[test]
fn test_enemy_ship_blocks_path() {
    let mut state = state_with_line(&["a", "b", "c"]);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");
    put_ship(&mut state, "b", UnitType::Destroyer, "p2");

    let validator = MovementValidator::new(&state);
    let op = MovementOperation::new(cruiser, "a", "c", "p1");
    assert_eq!(
        validator.validate_movement(&op).unwrap_err(),
        ValidationError::EnemyShipBlocksPath {
            system: "b".into()
        }
    );
}

#[test]
fn test_enemy_ship_in_destination_does_not_block() {
    let mut state = state_with_line(&["a", "b", "c"]);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");
    put_ship(&mut state, "c", UnitType::Destroyer, "p2");

    let validator = MovementValidator::new(&state);
    let op = MovementOperation::new(cruiser, "a", "c", "p1");
    assert!(validator.is_valid_movement(&op));
}

#[test]
fn test_own_command_token_blocks_exit() {
    let mut state = state_with_line(&["a", "b"]);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");
    state
        .system_mut(&"a".into())
        .unwrap()
        .place_command_token("p1".into());

    let validator = MovementValidator::new(&state);
    let op = MovementOperation::new(cruiser, "a", "b", "p1");
    assert_eq!(
        validator.validate_movement(&op).unwrap_err(),
        ValidationError::CommandTokenBlocksExit {
            system: "a".into()
        }
    );
}

#[test]
fn test_other_players_token_does_not_block_exit() {
    let mut state = state_with_line(&["a", "b"]);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");
    state
        .system_mut(&"a".into())
        .unwrap()
        .place_command_token("p2".into());

    let validator = MovementValidator::new(&state);
    let op = MovementOperation::new(cruiser, "a", "b", "p1");
    assert!(validator.is_valid_movement(&op));
}

#[test]
fn test_unknown_system_is_invalid() {
    let mut state = state_with_line(&["a"]);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let validator = MovementValidator::new(&state);
    let op = MovementOperation::new(cruiser, "a", "nowhere", "p1");
    assert_eq!(
        validator.validate_movement(&op).unwrap_err(),
        ValidationError::InvalidSystem {
            system: "nowhere".into()
        }
    );
}

#[test]
fn test_wormhole_makes_distant_system_reachable() {
    let mut state = GameState::new();
    state.add_player(Player::new("p1", Faction::Sol));
    for (coord, id) in [(HexCoord::new(0, 0), "a"), (HexCoord::new(5, 0), "b")] {
        state.galaxy.place(coord, id.into());
        let mut system = System::new(id);
        system.add_wormhole(WormholeType::Alpha);
        state.galaxy.register(system);
    }
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let validator = MovementValidator::new(&state);
    let op = MovementOperation::new(cruiser, "a", "b", "p1");
    assert!(validator.is_valid_movement(&op));
}

#[test]
fn test_nebula_entry_requires_activation() {
    let mut state = state_with_line(&["a", "b"]);
    state
        .system_mut(&"b".into())
        .unwrap()
        .add_anomaly(AnomalyType::Nebula);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let validator = MovementValidator::new(&state);
    let op =
        MovementOperation::new(cruiser.clone(), "a", "b", "p1").with_active_system("b");
    assert!(validator.is_valid_movement(&op));

    let op = MovementOperation::new(cruiser, "a", "b", "p1").with_active_system("a");
    assert_eq!(
        validator.validate_movement(&op).unwrap_err(),
        ValidationError::NebulaRequiresActiveSystem {
            system: "b".into()
        }
    );
}

#[test]
fn test_direct_planet_transfer_rejected() {
    let mut state = state_with_line(&["a"]);
    {
        let system = state.system_mut(&"a".into()).unwrap();
        system.add_planet(Planet::new("Bereg", 3, 1));
        system.add_planet(Planet::new("Lirta IV", 2, 3));
    }
    let infantry = Unit::new(UnitType::Infantry, "p1");
    state
        .system_mut(&"a".into())
        .unwrap()
        .planet_mut("Bereg")
        .unwrap()
        .place_unit(infantry.clone());

    let validator = MovementValidator::new(&state);
    let op = MovementOperation::new(infantry, "a", "a", "p1")
        .with_locations(Location::planet("Bereg"), Location::planet("Lirta IV"));
    assert!(matches!(
        validator.validate_movement(&op).unwrap_err(),
        ValidationError::DirectPlanetTransfer { .. }
    ));
}

#[test]
fn test_executor_moves_ship_between_systems() {
    let mut state = state_with_line(&["a", "b"]);
    let cruiser = put_ship(&mut state, "a", UnitType::Cruiser, "p1");
    let op = MovementOperation::new(cruiser.clone(), "a", "b", "p1");

    let mut working = state.clone();
    MovementExecutor::execute_operation(&mut working, &op).unwrap();

    assert!(working
        .system(&"a".into())
        .unwrap()
        .space_units()
        .is_empty());
    assert_eq!(
        working.system(&"b".into()).unwrap().space_units()[0].id,
        cruiser.id
    );
    // the original snapshot is untouched
    assert_eq!(state.system(&"a".into()).unwrap().space_units().len(), 1);
    working.validate_invariants().unwrap();
}
