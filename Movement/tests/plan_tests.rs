//! Joint movement-plan validation: technology assignment, transport
//! capacity and fleet supply.

use galaxy::{HexCoord, Planet, System, SystemId};
use game::{GameState, Player, ValidationError};
use movement::{Location, MovementPlan, MovementValidator};
use std::collections::HashSet;
use units::{Faction, Technology, Unit, UnitType};

fn state_with_line(ids: &[&str]) -> GameState {
    let mut state = GameState::new();
    state.add_player(Player::new("p1", Faction::Sol));
    state.add_player(Player::new("p2", Faction::Hacan));
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

fn techs(list: &[Technology]) -> HashSet<Technology> {
    list.iter().copied().collect()
}

#[test]
fn test_gravity_drive_covers_shortfall_of_one() {
    let mut state = state_with_line(&["a", "b", "c"]);
    let carrier = put_ship(&mut state, "a", UnitType::Carrier, "p1");

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(carrier.id, "a", "c");

    let validator = MovementValidator::new(&state);
    let result = validator
        .validate_plan(
            &plan,
            &"p1".into(),
            &techs(&[Technology::GravityDrive]),
            Some(&"c".into()),
        )
        .unwrap();

    assert!(result.is_valid, "errors: {:?}", result.errors);
    assert_eq!(
        result.technology_effects.get(&Technology::GravityDrive),
        Some(&carrier.id)
    );
}

#[test]
fn test_gravity_drive_helps_only_one_ship() {
    let mut state = state_with_line(&["a", "b", "c"]);
    let first = put_ship(&mut state, "a", UnitType::Carrier, "p1");
    let second = put_ship(&mut state, "a", UnitType::Carrier, "p1");

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(first.id, "a", "c");
    plan.add_ship_movement(second.id, "a", "c");

    let validator = MovementValidator::new(&state);
    let result = validator
        .validate_plan(
            &plan,
            &"p1".into(),
            &techs(&[Technology::GravityDrive]),
            Some(&"c".into()),
        )
        .unwrap();

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(
        result.errors[0],
        ValidationError::InsufficientMovement { unit, .. } if unit == second.id
    ));
}

#[test]
fn test_without_gravity_drive_shortfall_fails() {
    let mut state = state_with_line(&["a", "b", "c"]);
    let carrier = put_ship(&mut state, "a", UnitType::Carrier, "p1");

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(carrier.id, "a", "c");

    let validator = MovementValidator::new(&state);
    let result = validator
        .validate_plan(&plan, &"p1".into(), &HashSet::new(), Some(&"c".into()))
        .unwrap();

    assert!(!result.is_valid);
    assert!(matches!(
        result.errors[0],
        ValidationError::InsufficientMovement { distance: 2, range: 1, .. }
    ));
}

#[test]
fn test_carrier_transports_exactly_its_capacity() {
    let mut state = state_with_line(&["a", "b"]);
    state
        .system_mut(&"a".into())
        .unwrap()
        .add_planet(Planet::new("Home", 4, 2));
    let carrier = put_ship(&mut state, "a", UnitType::Carrier, "p1");

    let mut infantry_ids = Vec::new();
    for _ in 0..5 {
        let infantry = Unit::new(UnitType::Infantry, "p1");
        infantry_ids.push(infantry.id);
        state
            .system_mut(&"a".into())
            .unwrap()
            .planet_mut("Home")
            .unwrap()
            .place_unit(infantry);
    }

    let validator = MovementValidator::new(&state);

    // four fit
    let mut plan = MovementPlan::new();
    plan.add_ship_movement(carrier.id, "a", "b");
    for id in &infantry_ids[..4] {
        plan.add_ground_force_movement(*id, "a", "b", Location::planet("Home"), Location::Space)
            .unwrap();
    }
    let result = validator
        .validate_plan(&plan, &"p1".into(), &HashSet::new(), Some(&"b".into()))
        .unwrap();
    assert!(result.is_valid, "errors: {:?}", result.errors);
    assert_eq!(result.transport_assignments[&carrier.id].len(), 4);

    // five do not
    let mut plan = MovementPlan::new();
    plan.add_ship_movement(carrier.id, "a", "b");
    for id in &infantry_ids {
        plan.add_ground_force_movement(*id, "a", "b", Location::planet("Home"), Location::Space)
            .unwrap();
    }
    let result = validator
        .validate_plan(&plan, &"p1".into(), &HashSet::new(), Some(&"b".into()))
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(
        result.errors[0],
        ValidationError::InsufficientTransport {
            required: 5,
            available: 4,
        }
    );
}

#[test]
fn test_ground_forces_in_space_need_no_assignment() {
    let mut state = state_with_line(&["a", "b"]);
    let carrier = put_ship(&mut state, "a", UnitType::Carrier, "p1");
    let infantry = Unit::new(UnitType::Infantry, "p1");
    state
        .system_mut(&"a".into())
        .unwrap()
        .place_unit_in_space(infantry.clone());

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(carrier.id, "a", "b");
    plan.add_ground_force_movement(infantry.id, "a", "b", Location::Space, Location::Space)
        .unwrap();

    let validator = MovementValidator::new(&state);
    let result = validator
        .validate_plan(&plan, &"p1".into(), &HashSet::new(), Some(&"b".into()))
        .unwrap();
    assert!(result.is_valid);
    assert!(result.transport_assignments.is_empty());
}

#[test]
fn test_fleet_supply_checked_at_destination() {
    let mut state = state_with_line(&["a", "b"]);

    // three cruisers already at the destination
    for _ in 0..3 {
        put_ship(&mut state, "b", UnitType::Cruiser, "p1");
    }
    let incoming = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(incoming.id, "a", "b");

    let validator = MovementValidator::new(&state);
    let result = validator
        .validate_plan(&plan, &"p1".into(), &HashSet::new(), Some(&"b".into()))
        .unwrap();

    // fleet pool starts at three; four non-fighter ships exceed it
    assert!(!result.is_valid);
    assert_eq!(
        result.errors[0],
        ValidationError::FleetSupplyExceeded {
            system: "b".into(),
            ships: 4,
            fleet_pool: 3,
        }
    );
}

#[test]
fn test_fighters_do_not_count_against_fleet_supply() {
    let mut state = state_with_line(&["a", "b"]);
    for _ in 0..3 {
        put_ship(&mut state, "b", UnitType::Fighter, "p1");
    }
    for _ in 0..2 {
        put_ship(&mut state, "b", UnitType::Cruiser, "p1");
    }
    let incoming = put_ship(&mut state, "a", UnitType::Cruiser, "p1");

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(incoming.id, "a", "b");

    let validator = MovementValidator::new(&state);
    let result = validator
        .validate_plan(&plan, &"p1".into(), &HashSet::new(), Some(&"b".into()))
        .unwrap();
    assert!(result.is_valid, "errors: {:?}", result.errors);
}

#[test]
fn test_unit_missing_from_origin_is_reported() {
    let state = state_with_line(&["a", "b"]);
    let ghost = Unit::new(UnitType::Cruiser, "p1");

    let mut plan = MovementPlan::new();
    plan.add_ship_movement(ghost.id, "a", "b");

    let validator = MovementValidator::new(&state);
    let result = validator
        .validate_plan(&plan, &"p1".into(), &HashSet::new(), Some(&"b".into()))
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(
        result.errors[0],
        ValidationError::UnitNotInSystem {
            unit: ghost.id,
            system: "a".into(),
        }
    );
}

#[test]
fn test_empty_plan_is_valid() {
    let state = state_with_line(&["a"]);
    let validator = MovementValidator::new(&state);
    let result = validator
        .validate_plan(
            &MovementPlan::new(),
            &"p1".into(),
            &HashSet::new(),
            Some(&"a".into()),
        )
        .unwrap();
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

#[test]
fn test_unknown_player_is_configuration_error() {
    let state = state_with_line(&["a"]);
    let validator = MovementValidator::new(&state);
    assert!(validator
        .validate_plan(
            &MovementPlan::new(),
            &"ghost".into(),
            &HashSet::new(),
            None
        )
        .is_err());
}
