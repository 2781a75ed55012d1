use serde::{Deserialize, Serialize};
use units::{PlayerId, Unit, UnitId};

/// A planet inside a system.
///
/// Planets hold ground forces and structures on their surface. Control
/// changes through invasion; the exhausted flag cycles once per round when
/// the planet is spent for resources or influence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub resources: u32,
    pub influence: u32,
    controller: Option<PlayerId>,
    units: Vec<Unit>,
    exhausted: bool,
}

impl Planet {
    pub fn new(name: impl Into<String>, resources: u32, influence: u32) -> Self {
        Self {
            name: name.into(),
            resources,
            influence,
            controller: None,
            units: Vec::new(),
            exhausted: false,
        }
    }

    pub fn controller(&self) -> Option<&PlayerId> {
        self.controller.as_ref()
    }

    pub fn set_controller(&mut self, player: Option<PlayerId>) {
        self.controller = player;
    }

    pub fn is_controlled_by(&self, player: &PlayerId) -> bool {
        self.controller.as_ref() == Some(player)
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Spend the planet. Returns false if it was already exhausted.
    pub fn exhaust(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        self.exhausted = true;
        true
    }

    /// Ready the planet at the start of a round
    pub fn ready(&mut self) {
        self.exhausted = false;
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn place_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    pub fn remove_unit(&mut self, unit_id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id == unit_id)?;
        Some(self.units.remove(index))
    }

    pub fn units_of<'a>(&'a self, player: &'a PlayerId) -> impl Iterator<Item = &'a Unit> + 'a {
        self.units.iter().filter(move |u| &u.owner == player)
    }

    pub fn has_ground_forces_of(&self, player: &PlayerId) -> bool {
        self.units_of(player).any(|u| u.is_ground_force())
    }

    /// Ground forces of anyone other than `player`
    pub fn has_enemy_ground_forces(&self, player: &PlayerId) -> bool {
        self.units
            .iter()
            .any(|u| &u.owner != player && u.is_ground_force())
    }

    /// A planet is shielded when a unit with planetary shield is on it
    pub fn has_planetary_shield(&self) -> bool {
        self.units.iter().any(|u| u.has_planetary_shield())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use units::UnitType;

    #[test]
    fn test_exhaust_ready_cycle() {
        let mut planet = Planet::new("Mecatol Rex", 1, 6);
        assert!(!planet.is_exhausted());
        assert!(planet.exhaust());
        assert!(planet.is_exhausted());
        assert!(!planet.exhaust());
        planet.ready();
        assert!(!planet.is_exhausted());
    }

    #[test]
    fn test_unit_placement_and_removal() {
        let mut planet = Planet::new("Abyz", 3, 0);
        let infantry = Unit::new(UnitType::Infantry, "p1");
        let id = infantry.id;
        planet.place_unit(infantry);
        assert!(planet.has_ground_forces_of(&"p1".into()));

        let removed = planet.remove_unit(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(!planet.has_ground_forces_of(&"p1".into()));
    }

    #[test]
    fn test_control_changes() {
        let mut planet = Planet::new("Fria", 2, 0);
        assert!(planet.controller().is_none());
        planet.set_controller(Some("p2".into()));
        assert!(planet.is_controlled_by(&"p2".into()));
        assert!(!planet.is_controlled_by(&"p1".into()));
    }
}
