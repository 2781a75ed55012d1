use galaxy::{AnomalyType, Galaxy, HexCoord, Planet, System, SystemId, WormholeType};
use units::{Unit, UnitType};

// Helper to build a galaxy from (coord, id) pairs
fn build_galaxy(layout: &[((i32, i32), &str)]) -> Galaxy {
    let mut galaxy = Galaxy::new();
    for ((q, r), id) in layout {
        let system_id = SystemId::from(*id);
        galaxy.place(HexCoord::new(*q, *r), system_id.clone());
        galaxy.register(System::new(system_id));
    }
    galaxy
}

#[test]
fn test_adjacency_is_symmetric() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((1, 0), "b"), ((4, 0), "c")]);
    galaxy
        .system_mut(&"a".into())
        .unwrap()
        .add_wormhole(WormholeType::Alpha);
    galaxy
        .system_mut(&"c".into())
        .unwrap()
        .add_wormhole(WormholeType::Alpha);
    galaxy.hyperlane_connect("b".into(), "c".into());

    let ids = ["a", "b", "c"];
    for x in ids {
        for y in ids {
            assert_eq!(
                galaxy.systems_adjacent(&x.into(), &y.into()),
                galaxy.systems_adjacent(&y.into(), &x.into()),
                "adjacency must be symmetric for {x} and {y}"
            );
        }
    }
}

#[test]
fn test_wormhole_adjacency_at_distance() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((5, 0), "b")]);
    assert!(!galaxy.systems_adjacent(&"a".into(), &"b".into()));

    galaxy
        .system_mut(&"a".into())
        .unwrap()
        .add_wormhole(WormholeType::Alpha);
    galaxy
        .system_mut(&"b".into())
        .unwrap()
        .add_wormhole(WormholeType::Alpha);
    assert!(galaxy.systems_adjacent(&"a".into(), &"b".into()));
}

#[test]
fn test_mismatched_wormholes_are_not_adjacent() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((5, 0), "b")]);
    galaxy
        .system_mut(&"a".into())
        .unwrap()
        .add_wormhole(WormholeType::Alpha);
    galaxy
        .system_mut(&"b".into())
        .unwrap()
        .add_wormhole(WormholeType::Beta);
    assert!(!galaxy.systems_adjacent(&"a".into(), &"b".into()));
}

#[test]
fn test_hyperlane_adjacency() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((7, 0), "b")]);
    assert!(!galaxy.systems_adjacent(&"a".into(), &"b".into()));
    galaxy.hyperlane_connect("b".into(), "a".into());
    assert!(galaxy.systems_adjacent(&"a".into(), &"b".into()));
    assert!(galaxy.systems_adjacent(&"b".into(), &"a".into()));
}

#[test]
fn test_path_consecutive_elements_adjacent() {
    let mut galaxy = build_galaxy(&[
        ((0, 0), "a"),
        ((1, 0), "b"),
        ((2, 0), "c"),
        ((6, 0), "far"),
    ]);
    galaxy
        .system_mut(&"c".into())
        .unwrap()
        .add_wormhole(WormholeType::Gamma);
    galaxy
        .system_mut(&"far".into())
        .unwrap()
        .add_wormhole(WormholeType::Gamma);

    let path = galaxy.find_path(&"a".into(), &"far".into()).unwrap();
    assert_eq!(path.first(), Some(&SystemId::from("a")));
    assert_eq!(path.last(), Some(&SystemId::from("far")));
    for pair in path.windows(2) {
        assert!(galaxy.systems_adjacent(&pair[0], &pair[1]));
    }
    // wormhole shortcut beats walking six hexes
    assert_eq!(path.len(), 4);
}

#[test]
fn test_wormhole_shortens_path() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((1, 0), "b"), ((5, 0), "c")]);
    galaxy
        .system_mut(&"a".into())
        .unwrap()
        .add_wormhole(WormholeType::Delta);
    galaxy
        .system_mut(&"c".into())
        .unwrap()
        .add_wormhole(WormholeType::Delta);

    let path = galaxy.find_path(&"a".into(), &"c".into()).unwrap();
    assert_eq!(path, vec![SystemId::from("a"), SystemId::from("c")]);
}

#[test]
fn test_unit_adjacency_excludes_own_system() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((1, 0), "b")]);
    let cruiser = Unit::new(UnitType::Cruiser, "p1");
    let id = cruiser.id;
    galaxy
        .system_mut(&"a".into())
        .unwrap()
        .place_unit_in_space(cruiser);

    assert!(galaxy.unit_adjacent_to_system(id, &"b".into()));
    assert!(!galaxy.unit_adjacent_to_system(id, &"a".into()));
}

#[test]
fn test_planet_adjacent_to_containing_system() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((1, 0), "b"), ((3, 0), "far")]);
    galaxy
        .system_mut(&"a".into())
        .unwrap()
        .add_planet(Planet::new("Arc Prime", 4, 0));

    assert!(galaxy.planet_adjacent_to_system("Arc Prime", &"a".into()));
    assert!(galaxy.planet_adjacent_to_system("Arc Prime", &"b".into()));
    assert!(!galaxy.planet_adjacent_to_system("Arc Prime", &"far".into()));
}

#[test]
fn test_players_neighbors_through_adjacency() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((1, 0), "b"), ((5, 5), "far")]);
    galaxy
        .system_mut(&"a".into())
        .unwrap()
        .place_unit_in_space(Unit::new(UnitType::Cruiser, "p1"));
    galaxy
        .system_mut(&"b".into())
        .unwrap()
        .place_unit_in_space(Unit::new(UnitType::Destroyer, "p2"));
    galaxy
        .system_mut(&"far".into())
        .unwrap()
        .place_unit_in_space(Unit::new(UnitType::Carrier, "p3"));

    assert!(galaxy.players_neighbors(&"p1".into(), &"p2".into()));
    assert!(galaxy.players_neighbors(&"p2".into(), &"p1".into()));
    assert!(!galaxy.players_neighbors(&"p1".into(), &"p3".into()));
}

#[test]
fn test_players_neighbors_via_controlled_planet() {
    let mut galaxy = build_galaxy(&[((0, 0), "a"), ((1, 0), "b")]);
    let mut planet = Planet::new("Lodor", 3, 1);
    planet.set_controller(Some("p1".into()));
    galaxy.system_mut(&"a".into()).unwrap().add_planet(planet);
    galaxy
        .system_mut(&"b".into())
        .unwrap()
        .place_unit_in_space(Unit::new(UnitType::Fighter, "p2"));

    assert!(galaxy.players_neighbors(&"p1".into(), &"p2".into()));
}

#[test]
fn test_anomaly_tags_coexist() {
    let mut system = System::new("weird");
    system.add_anomaly(AnomalyType::Nebula);
    system.add_anomaly(AnomalyType::GravityRift);
    assert!(system.has_anomaly(AnomalyType::Nebula));
    assert!(system.has_anomaly(AnomalyType::GravityRift));
    assert!(!system.has_anomaly(AnomalyType::Supernova));
}
