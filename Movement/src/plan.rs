use crate::operation::Location;
use galaxy::SystemId;
use game::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use units::{Technology, UnitId};

/// One ship moving between space areas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipMovement {
    pub unit_id: UnitId,
    pub from_system: SystemId,
    pub to_system: SystemId,
}

/// One ground force moving, possibly lifting off a planet or landing on one
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundForceMovement {
    pub unit_id: UnitId,
    pub from_system: SystemId,
    pub to_system: SystemId,
    pub from_location: Location,
    pub to_location: Location,
}

/// A complete movement plan for one tactical action.
///
/// An empty plan is legal: "move no ships" is a valid movement step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementPlan {
    pub ship_movements: Vec<ShipMovement>,
    pub ground_force_movements: Vec<GroundForceMovement>,
}

impl MovementPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ship_movements.is_empty() && self.ground_force_movements.is_empty()
    }

    pub fn add_ship_movement(
        &mut self,
        unit_id: UnitId,
        from_system: impl Into<SystemId>,
        to_system: impl Into<SystemId>,
    ) {
        self.ship_movements.push(ShipMovement {
            unit_id,
            from_system: from_system.into(),
            to_system: to_system.into(),
        });
    }

    /// Add a ground force movement. Moving directly from one planet to
    /// another is rejected here; ground forces transit through space.
    pub fn add_ground_force_movement(
        &mut self,
        unit_id: UnitId,
        from_system: impl Into<SystemId>,
        to_system: impl Into<SystemId>,
        from_location: Location,
        to_location: Location,
    ) -> Result<(), ValidationError> {
        if let (Location::Planet(from), Location::Planet(to)) = (&from_location, &to_location) {
            if from != to {
                return Err(ValidationError::DirectPlanetTransfer {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        self.ground_force_movements.push(GroundForceMovement {
            unit_id,
            from_system: from_system.into(),
            to_system: to_system.into(),
            from_location,
            to_location,
        });
        Ok(())
    }
}

/// Outcome of joint plan validation: overall verdict, itemized errors, which
/// ship each movement technology was assigned to, and which transport
/// carries which ground forces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub technology_effects: HashMap<Technology, UnitId>,
    pub transport_assignments: HashMap<UnitId, Vec<UnitId>>,
}

impl ValidationResult {
    pub fn valid(
        technology_effects: HashMap<Technology, UnitId>,
        transport_assignments: HashMap<UnitId, Vec<UnitId>>,
    ) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            technology_effects,
            transport_assignments,
        }
    }

    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: false,
            errors,
            technology_effects: HashMap::new(),
            transport_assignments: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_empty_plan_is_legal() {
        let plan = MovementPlan::new();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_direct_planet_transfer_rejected() {
        let mut plan = MovementPlan::new();
        let err = plan
            .add_ground_force_movement(
                Uuid::new_v4(),
                "a",
                "a",
                Location::planet("Bereg"),
                Location::planet("Lirta IV"),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DirectPlanetTransfer {
                from: "Bereg".to_string(),
                to: "Lirta IV".to_string(),
            }
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn test_planet_to_space_allowed() {
        let mut plan = MovementPlan::new();
        plan.add_ground_force_movement(
            Uuid::new_v4(),
            "a",
            "b",
            Location::planet("Bereg"),
            Location::Space,
        )
        .unwrap();
        assert_eq!(plan.ground_force_movements.len(), 1);
    }
}
