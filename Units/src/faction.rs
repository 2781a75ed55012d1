use serde::{Deserialize, Serialize};
use std::fmt;

/// The playable factions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Sol,
    Hacan,
    Xxcha,
    Jord,
    Yssaril,
    Naalu,
    Barony,
    Saar,
    Muaat,
    Arborec,
    L1z1x,
    Winnu,
}

impl Faction {
    /// Get the display name of the faction
    pub fn name(self) -> &'static str {
        match self {
            Faction::Sol => "Federation of Sol",
            Faction::Hacan => "Emirates of Hacan",
            Faction::Xxcha => "Xxcha Kingdom",
            Faction::Jord => "Jord",
            Faction::Yssaril => "Yssaril Tribes",
            Faction::Naalu => "Naalu Collective",
            Faction::Barony => "Barony of Letnev",
            Faction::Saar => "Clan of Saar",
            Faction::Muaat => "Embers of Muaat",
            Faction::Arborec => "Arborec",
            Faction::L1z1x => "L1Z1X Mindnet",
            Faction::Winnu => "Winnu",
        }
    }

    /// Maximum commodities this faction may hold at once
    pub fn commodity_limit(self) -> u32 {
        match self {
            Faction::Sol => 4,
            Faction::Hacan => 6, // trade faction
            Faction::Xxcha => 4,
            Faction::Jord => 4,
            Faction::Yssaril => 3,
            Faction::Naalu => 3,
            Faction::Barony => 2,
            Faction::Saar => 3,
            Faction::Muaat => 4,
            Faction::Arborec => 3,
            Faction::L1z1x => 2,
            Faction::Winnu => 3,
        }
    }

    /// Get all factions
    pub fn all_factions() -> [Faction; 12] {
        [
            Faction::Sol,
            Faction::Hacan,
            Faction::Xxcha,
            Faction::Jord,
            Faction::Yssaril,
            Faction::Naalu,
            Faction::Barony,
            Faction::Saar,
            Faction::Muaat,
            Faction::Arborec,
            Faction::L1z1x,
            Faction::Winnu,
        ]
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_limits_positive() {
        for faction in Faction::all_factions() {
            assert!(faction.commodity_limit() >= 2);
            assert!(faction.commodity_limit() <= 6);
        }
    }
}
