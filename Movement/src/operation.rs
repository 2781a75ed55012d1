use galaxy::SystemId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use units::{PlayerId, Technology, Unit};

/// Where a unit starts or ends inside a system
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Space,
    Planet(String),
}

impl Location {
    pub fn is_space(&self) -> bool {
        matches!(self, Location::Space)
    }

    pub fn planet(name: impl Into<String>) -> Self {
        Location::Planet(name.into())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Space => write!(f, "space"),
            Location::Planet(name) => write!(f, "{name}"),
        }
    }
}

/// A single proposed unit movement.
///
/// This is an internal operation, not a full tactical action: the validator
/// judges it in isolation. The optional technology set overrides the unit
/// owner's known technologies; the optional active system feeds the nebula
/// rule when the operation runs inside a tactical action.
#[derive(Clone, Debug, PartialEq)]
pub struct MovementOperation {
    pub unit: Unit,
    pub from_system: SystemId,
    pub to_system: SystemId,
    pub player: PlayerId,
    pub from_location: Location,
    pub to_location: Location,
    pub technologies: Option<HashSet<Technology>>,
    pub active_system: Option<SystemId>,
}

impl MovementOperation {
    /// Space-to-space movement, the common case for ships
    pub fn new(
        unit: Unit,
        from_system: impl Into<SystemId>,
        to_system: impl Into<SystemId>,
        player: impl Into<PlayerId>,
    ) -> Self {
        Self {
            unit,
            from_system: from_system.into(),
            to_system: to_system.into(),
            player: player.into(),
            from_location: Location::Space,
            to_location: Location::Space,
            technologies: None,
            active_system: None,
        }
    }

    pub fn with_locations(mut self, from: Location, to: Location) -> Self {
        self.from_location = from;
        self.to_location = to;
        self
    }

    pub fn with_technologies(mut self, technologies: HashSet<Technology>) -> Self {
        self.technologies = Some(technologies);
        self
    }

    pub fn with_active_system(mut self, active_system: impl Into<SystemId>) -> Self {
        self.active_system = Some(active_system.into());
        self
    }
}
