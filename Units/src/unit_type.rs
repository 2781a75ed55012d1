use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents every kind of piece in the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Carrier,
    Cruiser,
    CruiserIi,
    Destroyer,
    Dreadnought,
    Fighter,
    Infantry,
    Mech,
    Pds,
    SpaceDock,
    WarSun,
    Flagship,
}

impl UnitType {
    /// Get the display name of the unit type
    pub fn name(self) -> &'static str {
        match self {
            UnitType::Carrier => "Carrier",
            UnitType::Cruiser => "Cruiser",
            UnitType::CruiserIi => "Cruiser II",
            UnitType::Destroyer => "Destroyer",
            UnitType::Dreadnought => "Dreadnought",
            UnitType::Fighter => "Fighter",
            UnitType::Infantry => "Infantry",
            UnitType::Mech => "Mech",
            UnitType::Pds => "PDS",
            UnitType::SpaceDock => "Space Dock",
            UnitType::WarSun => "War Sun",
            UnitType::Flagship => "Flagship",
        }
    }

    /// Ships occupy the space area of a system
    pub fn is_ship(self) -> bool {
        matches!(
            self,
            UnitType::Carrier
                | UnitType::Cruiser
                | UnitType::CruiserIi
                | UnitType::Destroyer
                | UnitType::Dreadnought
                | UnitType::Fighter
                | UnitType::Flagship
                | UnitType::WarSun
        )
    }

    /// Ground forces live on planets and only transit space inside transports
    pub fn is_ground_force(self) -> bool {
        matches!(self, UnitType::Infantry | UnitType::Mech)
    }

    /// Structures are placed on planets and never move
    pub fn is_structure(self) -> bool {
        matches!(self, UnitType::Pds | UnitType::SpaceDock)
    }

    /// Fighters and infantry are bought two at a time for one cost
    pub fn is_produced_in_pairs(self) -> bool {
        matches!(self, UnitType::Fighter | UnitType::Infantry)
    }

    /// Units that ride in another ship's capacity while in space
    pub fn consumes_capacity(self) -> bool {
        matches!(self, UnitType::Fighter | UnitType::Infantry | UnitType::Mech)
    }

    /// Parse the wire name of a unit type (`"cruiser_ii"`, `"war_sun"`, ...)
    pub fn parse(name: &str) -> Option<UnitType> {
        match name {
            "carrier" => Some(UnitType::Carrier),
            "cruiser" => Some(UnitType::Cruiser),
            "cruiser_ii" => Some(UnitType::CruiserIi),
            "destroyer" => Some(UnitType::Destroyer),
            "dreadnought" => Some(UnitType::Dreadnought),
            "fighter" => Some(UnitType::Fighter),
            "infantry" => Some(UnitType::Infantry),
            "mech" => Some(UnitType::Mech),
            "pds" => Some(UnitType::Pds),
            "space_dock" => Some(UnitType::SpaceDock),
            "war_sun" => Some(UnitType::WarSun),
            "flagship" => Some(UnitType::Flagship),
            _ => None,
        }
    }

    /// Get all unit types
    pub fn all_types() -> [UnitType; 12] {
        [
            UnitType::Carrier,
            UnitType::Cruiser,
            UnitType::CruiserIi,
            UnitType::Destroyer,
            UnitType::Dreadnought,
            UnitType::Fighter,
            UnitType::Infantry,
            UnitType::Mech,
            UnitType::Pds,
            UnitType::SpaceDock,
            UnitType::WarSun,
            UnitType::Flagship,
        ]
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_classification() {
        assert!(UnitType::Carrier.is_ship());
        assert!(UnitType::Fighter.is_ship());
        assert!(UnitType::Flagship.is_ship());
        assert!(!UnitType::Infantry.is_ship());
        assert!(!UnitType::Pds.is_ship());
    }

    #[test]
    fn test_ground_force_classification() {
        assert!(UnitType::Infantry.is_ground_force());
        assert!(UnitType::Mech.is_ground_force());
        assert!(!UnitType::SpaceDock.is_ground_force());
    }

    #[test]
    fn test_classes_are_disjoint() {
        for unit_type in UnitType::all_types() {
            let classes = [
                unit_type.is_ship(),
                unit_type.is_ground_force(),
                unit_type.is_structure(),
            ];
            assert_eq!(
                classes.iter().filter(|c| **c).count(),
                1,
                "{unit_type} must belong to exactly one class"
            );
        }
    }
}
