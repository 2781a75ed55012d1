//! Per-type capability table with faction and technology modifiers.
//!
//! `unit_stats` is a pure function: the same `(type, faction, techs)` input
//! always yields the same bundle, so callers are free to memoize it.

use crate::faction::Faction;
use crate::technology::Technology;
use crate::unit_type::UnitType;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Full capability bundle for a unit type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Resource cost of one production purchase (a full pair for fighters
    /// and infantry)
    pub cost: u32,
    /// Base movement value; zero for pieces that cannot move on their own
    pub movement: u8,
    /// Number of fighters / ground forces this unit can carry
    pub capacity: u8,
    /// Combat roll hits on this value or higher; `None` for non-combatants
    pub combat_value: Option<u8>,
    /// Dice rolled per combat round
    pub combat_dice: u8,
    /// Base production value. For space docks this is the bonus added to the
    /// host planet's resource value.
    pub production: u8,
    pub sustain_damage: bool,
    pub bombardment: Option<RollProfile>,
    pub space_cannon: Option<RollProfile>,
    pub planetary_shield: bool,
    pub anti_fighter_barrage: bool,
    pub deploy: bool,
}

/// Hit threshold and dice count for an ability roll
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollProfile {
    /// Minimum d10 result that scores a hit
    pub hit_on: u8,
    /// Number of dice rolled
    pub dice: u8,
}

impl UnitStats {
    pub fn has_production(&self) -> bool {
        self.production > 0
    }

    pub fn has_space_cannon(&self) -> bool {
        self.space_cannon.is_some()
    }

    pub fn has_bombardment(&self) -> bool {
        self.bombardment.is_some()
    }
}

fn base_stats(unit_type: UnitType) -> UnitStats {
    let none = UnitStats {
        cost: 0,
        movement: 0,
        capacity: 0,
        combat_value: None,
        combat_dice: 0,
        production: 0,
        sustain_damage: false,
        bombardment: None,
        space_cannon: None,
        planetary_shield: false,
        anti_fighter_barrage: false,
        deploy: false,
    };

    match unit_type {
        UnitType::Carrier => UnitStats {
            cost: 3,
            movement: 1,
            capacity: 4,
            combat_value: Some(9),
            combat_dice: 1,
            ..none
        },
        UnitType::Cruiser => UnitStats {
            cost: 2,
            movement: 2,
            combat_value: Some(7),
            combat_dice: 1,
            ..none
        },
        UnitType::CruiserIi => UnitStats {
            cost: 2,
            movement: 3,
            capacity: 1,
            combat_value: Some(6),
            combat_dice: 1,
            ..none
        },
        UnitType::Destroyer => UnitStats {
            cost: 1,
            movement: 2,
            combat_value: Some(9),
            combat_dice: 1,
            anti_fighter_barrage: true,
            ..none
        },
        UnitType::Dreadnought => UnitStats {
            cost: 4,
            movement: 1,
            capacity: 1,
            combat_value: Some(5),
            combat_dice: 1,
            sustain_damage: true,
            bombardment: Some(RollProfile { hit_on: 5, dice: 1 }),
            ..none
        },
        UnitType::Fighter => UnitStats {
            cost: 1, // full pair
            movement: 0,
            combat_value: Some(9),
            combat_dice: 1,
            ..none
        },
        UnitType::Infantry => UnitStats {
            cost: 1, // full pair
            combat_value: Some(8),
            combat_dice: 1,
            ..none
        },
        UnitType::Mech => UnitStats {
            cost: 2,
            combat_value: Some(6),
            combat_dice: 1,
            sustain_damage: true,
            deploy: true,
            ..none
        },
        UnitType::Pds => UnitStats {
            cost: 2,
            space_cannon: Some(RollProfile { hit_on: 6, dice: 1 }),
            planetary_shield: true,
            ..none
        },
        UnitType::SpaceDock => UnitStats {
            cost: 4,
            production: 2, // added to host planet resources
            ..none
        },
        UnitType::WarSun => UnitStats {
            cost: 12,
            movement: 2,
            capacity: 6,
            combat_value: Some(3),
            combat_dice: 3,
            sustain_damage: true,
            bombardment: Some(RollProfile { hit_on: 3, dice: 3 }),
            ..none
        },
        UnitType::Flagship => UnitStats {
            cost: 8,
            movement: 1,
            capacity: 3,
            combat_value: Some(7),
            combat_dice: 2,
            sustain_damage: true,
            ..none
        },
    }
}

lazy_static! {
    static ref BASE_STATS: HashMap<UnitType, UnitStats> = UnitType::all_types()
        .into_iter()
        .map(|t| (t, base_stats(t)))
        .collect();
}

/// Apply a unit upgrade technology to the base stats of its target type.
fn upgraded_stats(unit_type: UnitType, tech: Technology) -> UnitStats {
    let base = BASE_STATS[&unit_type];
    match tech {
        Technology::CruiserIi => BASE_STATS[&UnitType::CruiserIi],
        Technology::CarrierIi => UnitStats {
            movement: 2,
            ..base
        },
        Technology::DreadnoughtIi => UnitStats {
            movement: 2,
            ..base
        },
        Technology::DestroyerIi => UnitStats {
            movement: 2,
            combat_value: Some(8),
            combat_dice: 2,
            ..base
        },
        Technology::FighterIi => UnitStats {
            movement: 2,
            combat_value: Some(8),
            ..base
        },
        Technology::PdsIi => UnitStats {
            space_cannon: Some(RollProfile { hit_on: 5, dice: 1 }),
            ..base
        },
        _ => base,
    }
}

/// Look up the capability bundle for a unit.
///
/// Side-effect free: unit upgrade technologies owned by the player replace
/// the base line for their target type. Movement-affecting technologies such
/// as Gravity Drive are deliberately not resolved here; the movement rule
/// engine applies them at plan level.
///
/// The `faction` parameter keeps the lookup signature total over future
/// faction-specific lines; no base-game line varies by faction.
pub fn unit_stats(
    unit_type: UnitType,
    _faction: Option<Faction>,
    technologies: &HashSet<Technology>,
) -> UnitStats {
    for tech in technologies {
        if tech.upgrades() == Some(unit_type) {
            return upgraded_stats(unit_type, *tech);
        }
    }
    BASE_STATS[&unit_type]
}
