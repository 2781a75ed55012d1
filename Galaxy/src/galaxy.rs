use crate::hex::HexCoord;
use crate::system::{System, SystemId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use units::{PlayerId, UnitId};

/// The hex-based game board.
///
/// Owns both the topology (coordinates, hyperlane edges) and the system
/// registry. Adjacency is the union of physical distance one, shared
/// wormhole class, and hyperlane edges; every query below works on that
/// combined graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    #[serde(with = "coords_as_pairs")]
    coords: HashMap<HexCoord, SystemId>,
    positions: HashMap<SystemId, HexCoord>,
    systems: HashMap<SystemId, System>,
    hyperlanes: HashSet<(SystemId, SystemId)>,
}

// `HexCoord` is a struct, so it can't be used directly as a JSON object key
// (serde_json map keys must serialize as strings). Serialize `coords` as a
// sequence of pairs instead; the in-memory representation stays a HashMap.
mod coords_as_pairs {
    use super::{HashMap, HexCoord, SystemId};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        map: &HashMap<HexCoord, SystemId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        map.iter().collect::<Vec<_>>().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<HexCoord, SystemId>, D::Error> {
        let pairs = Vec::<(HexCoord, SystemId)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl Galaxy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a system id at a coordinate.
    ///
    /// The mapping is injective in both directions; placing onto an occupied
    /// coordinate or re-placing an already placed id is rejected.
    pub fn place(&mut self, coord: HexCoord, system_id: SystemId) -> bool {
        if self.coords.contains_key(&coord) || self.positions.contains_key(&system_id) {
            return false;
        }
        self.coords.insert(coord, system_id.clone());
        self.positions.insert(system_id, coord);
        true
    }

    /// Register a system object under its id
    pub fn register(&mut self, system: System) {
        self.systems.insert(system.id.clone(), system);
    }

    pub fn coord_of(&self, system_id: &SystemId) -> Option<HexCoord> {
        self.positions.get(system_id).copied()
    }

    pub fn system_of(&self, coord: HexCoord) -> Option<&SystemId> {
        self.coords.get(&coord)
    }

    pub fn system(&self, system_id: &SystemId) -> Option<&System> {
        self.systems.get(system_id)
    }

    pub fn system_mut(&mut self, system_id: &SystemId) -> Option<&mut System> {
        self.systems.get_mut(system_id)
    }

    pub fn systems(&self) -> impl Iterator<Item = &System> {
        self.systems.values()
    }

    pub fn systems_mut(&mut self) -> impl Iterator<Item = &mut System> {
        self.systems.values_mut()
    }

    pub fn system_ids(&self) -> impl Iterator<Item = &SystemId> {
        self.systems.keys()
    }

    /// Add a symmetric hyperlane edge, independent of physical distance
    pub fn hyperlane_connect(&mut self, a: SystemId, b: SystemId) {
        let edge = if a <= b { (a, b) } else { (b, a) };
        self.hyperlanes.insert(edge);
    }

    fn has_hyperlane(&self, a: &SystemId, b: &SystemId) -> bool {
        let edge = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        self.hyperlanes.contains(&edge)
    }

    /// Whether two distinct systems are adjacent: physical distance one,
    /// matching wormhole class, or a hyperlane edge. A system is never
    /// adjacent to itself.
    pub fn systems_adjacent(&self, a: &SystemId, b: &SystemId) -> bool {
        if a == b {
            return false;
        }

        if let (Some(coord_a), Some(coord_b)) = (self.coord_of(a), self.coord_of(b)) {
            if coord_a.distance(coord_b) == 1 {
                return true;
            }
        }

        if let (Some(sys_a), Some(sys_b)) = (self.system(a), self.system(b)) {
            if sys_a.shares_wormhole_with(sys_b) {
                return true;
            }
        }

        self.has_hyperlane(a, b)
    }

    /// Systems adjacent to `system_id` in a stable order: physical neighbors
    /// in canonical hex direction order first, then wormhole and hyperlane
    /// partners sorted by id.
    pub fn adjacent_systems(&self, system_id: &SystemId) -> Vec<SystemId> {
        let mut result: Vec<SystemId> = Vec::new();

        if let Some(coord) = self.coord_of(system_id) {
            for neighbor_coord in coord.neighbors() {
                if let Some(neighbor_id) = self.system_of(neighbor_coord) {
                    result.push(neighbor_id.clone());
                }
            }
        }

        let mut nonlocal: Vec<SystemId> = self
            .systems
            .keys()
            .filter(|other| !result.contains(other) && self.systems_adjacent(system_id, other))
            .cloned()
            .collect();
        nonlocal.sort();
        result.extend(nonlocal);

        result
    }

    /// Shortest path over the adjacency graph, endpoints included.
    ///
    /// Breadth-first search with the stable neighbor order of
    /// [`Galaxy::adjacent_systems`], so ties always break the same way.
    pub fn find_path(&self, from: &SystemId, to: &SystemId) -> Option<Vec<SystemId>> {
        if self.coord_of(from).is_none() || self.coord_of(to).is_none() {
            return None;
        }
        if from == to {
            return Some(vec![from.clone()]);
        }

        let mut queue: VecDeque<SystemId> = VecDeque::new();
        let mut came_from: HashMap<SystemId, SystemId> = HashMap::new();
        queue.push_back(from.clone());
        came_from.insert(from.clone(), from.clone());

        while let Some(current) = queue.pop_front() {
            for neighbor in self.adjacent_systems(&current) {
                if came_from.contains_key(&neighbor) {
                    continue;
                }
                came_from.insert(neighbor.clone(), current.clone());
                if &neighbor == to {
                    let mut path = Vec::new();
                    let mut current = neighbor;
                    loop {
                        path.push(current.clone());
                        if &current == from {
                            break;
                        }
                        current = came_from[&current].clone();
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(neighbor);
            }
        }

        None
    }

    /// The system whose space area or planets contain the unit
    pub fn find_unit_system(&self, unit_id: UnitId) -> Option<&SystemId> {
        self.systems
            .values()
            .find(|s| s.all_units().any(|u| u.id == unit_id))
            .map(|s| &s.id)
    }

    /// The system containing the named planet
    pub fn find_planet_system(&self, planet_name: &str) -> Option<&SystemId> {
        self.systems
            .values()
            .find(|s| s.planet(planet_name).is_some())
            .map(|s| &s.id)
    }

    /// Whether a unit is adjacent to a system. A unit inside the target
    /// system is not adjacent to it.
    pub fn unit_adjacent_to_system(&self, unit_id: UnitId, target: &SystemId) -> bool {
        match self.find_unit_system(unit_id) {
            Some(home) => self.systems_adjacent(home, target),
            None => false,
        }
    }

    /// Whether a planet is adjacent to a system. A planet counts as adjacent
    /// to its own containing system.
    pub fn planet_adjacent_to_system(&self, planet_name: &str, target: &SystemId) -> bool {
        match self.find_planet_system(planet_name) {
            Some(home) if home == target => true,
            Some(home) => self.systems_adjacent(home, target),
            None => false,
        }
    }

    /// Systems where a player has a unit or controls a planet
    pub fn player_presence_systems(&self, player: &PlayerId) -> BTreeSet<SystemId> {
        let mut presence = BTreeSet::new();
        for system in self.systems.values() {
            let has_units = system.all_units().any(|u| &u.owner == player);
            let controls_planet = system
                .planets()
                .iter()
                .any(|p| p.is_controlled_by(player));
            if has_units || controls_planet {
                presence.insert(system.id.clone());
            }
        }
        presence
    }

    /// Two players are neighbors when their presence systems share a system
    /// or touch through adjacency
    pub fn players_neighbors(&self, a: &PlayerId, b: &PlayerId) -> bool {
        let presence_a = self.player_presence_systems(a);
        let presence_b = self.player_presence_systems(b);

        if presence_a.intersection(&presence_b).next().is_some() {
            return true;
        }

        presence_a
            .iter()
            .any(|sa| presence_b.iter().any(|sb| self.systems_adjacent(sa, sb)))
    }
}
