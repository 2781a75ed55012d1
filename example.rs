//! Text-based demo: set up a small galaxy and run one tactical action.

use imperium::actions::{propose_tactical_action, ActionChoices, ProductionOrder};
use imperium::galaxy::{HexCoord, Planet, System, SystemId};
use imperium::game::{GameState, Player};
use imperium::movement::{Location, MovementPlan};
use imperium::units::{Faction, Technology, Unit, UnitType};

fn main() {
    println!("=== Imperium demo: one tactical action ===\n");

    // Three systems in a row; the far one holds a dock world.
    let mut state = GameState::new();
    let mut sol = Player::new("sol", Faction::Sol);
    sol.add_technology(Technology::GravityDrive);
    state.add_player(sol);
    state.add_player(Player::new("hacan", Faction::Hacan));

    for (i, id) in ["home", "mid", "frontier"].iter().enumerate() {
        let system_id = SystemId::from(*id);
        state
            .galaxy
            .place(HexCoord::new(i as i32, 0), system_id.clone());
        state.galaxy.register(System::new(system_id));
    }

    let mut forge = Planet::new("Forge", 4, 0);
    forge.set_controller(Some("sol".into()));
    forge.place_unit(Unit::new(UnitType::SpaceDock, "sol"));
    state
        .system_mut(&"frontier".into())
        .unwrap()
        .add_planet(forge);

    let carrier = Unit::new(UnitType::Carrier, "sol");
    let infantry = Unit::new(UnitType::Infantry, "sol");
    state
        .system_mut(&"home".into())
        .unwrap()
        .place_unit_in_space(carrier.clone());
    state
        .system_mut(&"home".into())
        .unwrap()
        .place_unit_in_space(infantry.clone());

    // Move the carrier (gravity drive covers the extra hex) with the
    // infantry aboard, then build two fighters at the dock.
    let mut plan = MovementPlan::new();
    plan.add_ship_movement(carrier.id, "home", "frontier");
    plan.add_ground_force_movement(
        infantry.id,
        "home",
        "frontier",
        Location::Space,
        Location::Space,
    )
    .expect("space-to-space transit is legal");

    let mut order = ProductionOrder::new();
    order.add(UnitType::Fighter, 2, Location::Space);

    let result = propose_tactical_action(
        &state,
        &"sol".into(),
        &"frontier".into(),
        Some(plan),
        Some(order),
        ActionChoices {
            dice_seed: 2024,
            ..Default::default()
        },
    );

    match &result.new_state {
        Some(new_state) => {
            println!("Tactical action succeeded!\n");
            for outcome in &result.step_outcomes {
                let marker = if outcome.executed { "x" } else { " " };
                println!("  [{marker}] {}", outcome.step);
            }
            println!("\nTiming windows reached:");
            for window in &result.windows_reached {
                println!("  - {}", window.label());
            }
            if let Some(movement) = &result.movement_result {
                println!("\nTechnology effects: {:?}", movement.technology_effects);
            }
            if let Some(production) = &result.production_report {
                println!(
                    "Production: {} resources spent, planets exhausted: {:?}",
                    production.resources_spent, production.planets_exhausted
                );
            }
            let frontier = new_state.system(&"frontier".into()).unwrap();
            println!(
                "\nFrontier space area now holds {} units",
                frontier.space_units().len()
            );
        }
        None => {
            println!("Tactical action failed: {:?}", result.error);
        }
    }
}
