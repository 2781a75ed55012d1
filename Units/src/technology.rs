use crate::unit_type::UnitType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Researched technologies that affect movement or upgrade unit types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    // Movement technologies
    GravityDrive,
    FleetLogistics,
    LightWaveDeflector,
    // Unit upgrade technologies
    CruiserIi,
    DreadnoughtIi,
    CarrierIi,
    DestroyerIi,
    FighterIi,
    PdsIi,
    // Other
    PlasmaScoring,
}

/// How a movement technology can cover a range shortfall during plan
/// validation. Assignment happens at plan level, one ship at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementBoost {
    /// Largest shortfall this technology can cover for a single ship
    pub bonus: u8,
    /// Whether the boost may only be assigned to one ship per tactical action
    pub once_per_action: bool,
}

impl Technology {
    /// Get the display name of the technology
    pub fn name(self) -> &'static str {
        match self {
            Technology::GravityDrive => "Gravity Drive",
            Technology::FleetLogistics => "Fleet Logistics",
            Technology::LightWaveDeflector => "Light-Wave Deflector",
            Technology::CruiserIi => "Cruiser II",
            Technology::DreadnoughtIi => "Dreadnought II",
            Technology::CarrierIi => "Carrier II",
            Technology::DestroyerIi => "Destroyer II",
            Technology::FighterIi => "Fighter II",
            Technology::PdsIi => "PDS II",
            Technology::PlasmaScoring => "Plasma Scoring",
        }
    }

    /// Movement boost signature, for technologies assignable to ships that
    /// fall short of their required range. `None` for everything else.
    pub fn movement_boost(self) -> Option<MovementBoost> {
        match self {
            Technology::GravityDrive => Some(MovementBoost {
                bonus: 1,
                once_per_action: true,
            }),
            _ => None,
        }
    }

    /// The unit type this technology upgrades, if it is a unit upgrade
    pub fn upgrades(self) -> Option<UnitType> {
        match self {
            Technology::CruiserIi => Some(UnitType::Cruiser),
            Technology::DreadnoughtIi => Some(UnitType::Dreadnought),
            Technology::CarrierIi => Some(UnitType::Carrier),
            Technology::DestroyerIi => Some(UnitType::Destroyer),
            Technology::FighterIi => Some(UnitType::Fighter),
            Technology::PdsIi => Some(UnitType::Pds),
            _ => None,
        }
    }

    /// Parse the wire name of a technology (`"gravity_drive"`, ...)
    pub fn parse(name: &str) -> Option<Technology> {
        match name {
            "gravity_drive" => Some(Technology::GravityDrive),
            "fleet_logistics" => Some(Technology::FleetLogistics),
            "light_wave_deflector" => Some(Technology::LightWaveDeflector),
            "cruiser_ii" => Some(Technology::CruiserIi),
            "dreadnought_ii" => Some(Technology::DreadnoughtIi),
            "carrier_ii" => Some(Technology::CarrierIi),
            "destroyer_ii" => Some(Technology::DestroyerIi),
            "fighter_ii" => Some(Technology::FighterIi),
            "pds_ii" => Some(Technology::PdsIi),
            "plasma_scoring" => Some(Technology::PlasmaScoring),
            _ => None,
        }
    }

    /// Movement technologies in the fixed order plan validation tries them
    pub fn movement_technologies() -> [Technology; 1] {
        [Technology::GravityDrive]
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
