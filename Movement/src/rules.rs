//! Composable movement rules.
//!
//! Each rule answers two pure questions over a [`MovementContext`]: may the
//! unit move, and how far can it go. The engine holds a fixed list of rules
//! and a movement is legal only when every rule allows it. Denial always
//! wins over permission; the nebula cap of one wins over gravity-rift
//! bonuses.

use crate::context::MovementContext;
use galaxy::{AnomalyType, HexCoord};
use game::ValidationError;
use std::collections::HashSet;
use units::{unit_stats, Technology, Unit};

/// A movement rule: a legality predicate plus a range query
pub trait MovementRule {
    fn can_move(&self, context: &MovementContext) -> bool;
    fn movement_range(&self, unit: &Unit, technologies: &HashSet<Technology>) -> u32;
}

/// Movement a path actually requires: hops along the adjacency graph when a
/// path is known, hex distance otherwise. Wormholes and hyperlanes shorten
/// the former, never the latter.
pub fn required_movement(context: &MovementContext) -> u32 {
    match context.path {
        Some(path) if !path.is_empty() => (path.len() - 1) as u32,
        _ => context.from.distance(context.to),
    }
}

/// Effective range of a unit along its path: base movement, plus one per
/// gravity rift exited or passed through, clamped to one when the move
/// starts inside a nebula.
pub fn path_effective_range(context: &MovementContext) -> u32 {
    let base = unit_stats(
        context.unit.unit_type,
        context.unit.faction,
        context.technologies,
    )
    .movement as u32;

    let traversal = context.traversal();
    let mut range = base;

    // Rifts grant their bonus on exit, so the destination's rift does not count.
    for coord in &traversal[..traversal.len().saturating_sub(1)] {
        if has_anomaly_at(context, *coord, AnomalyType::GravityRift) {
            range += 1;
        }
    }

    if has_anomaly_at(context, context.from, AnomalyType::Nebula) {
        range = range.min(1);
    }

    range
}

fn has_anomaly_at(context: &MovementContext, coord: HexCoord, anomaly: AnomalyType) -> bool {
    context
        .galaxy
        .system_of(coord)
        .and_then(|id| context.galaxy.system(id))
        .map(|system| system.has_anomaly(anomaly))
        .unwrap_or(false)
}

/// Units move up to their effective range
pub struct BasicMovementRule;

impl MovementRule for BasicMovementRule {
    fn can_move(&self, context: &MovementContext) -> bool {
        required_movement(context) <= path_effective_range(context)
    }

    fn movement_range(&self, unit: &Unit, technologies: &HashSet<Technology>) -> u32 {
        unit_stats(unit.unit_type, unit.faction, technologies).movement as u32
    }
}

/// Gravity Drive adds one to a single ship per tactical action. Which ship
/// receives it is decided during plan validation, so at rule level the
/// technology never denies anything.
pub struct GravityDriveRule;

impl MovementRule for GravityDriveRule {
    fn can_move(&self, _context: &MovementContext) -> bool {
        true
    }

    fn movement_range(&self, unit: &Unit, technologies: &HashSet<Technology>) -> u32 {
        unit_stats(unit.unit_type, unit.faction, technologies).movement as u32
    }
}

/// Anomaly semantics per tag of each system on the path
pub struct AnomalyRule;

impl AnomalyRule {
    /// Typed form of the legality check, reporting which system and tag
    /// denied the move.
    pub fn check(&self, context: &MovementContext) -> Result<(), ValidationError> {
        let traversal = context.traversal();
        let destination = *traversal.last().unwrap_or(&context.to);

        // Exiting an anomaly is never blocked, so the origin is skipped.
        for coord in traversal.iter().skip(1) {
            let Some(system_id) = context.galaxy.system_of(*coord) else {
                continue;
            };
            let Some(system) = context.galaxy.system(system_id) else {
                continue;
            };

            if system.has_anomaly(AnomalyType::AsteroidField) {
                return Err(ValidationError::AnomalyBlocksMovement {
                    system: system_id.clone(),
                    anomaly: AnomalyType::AsteroidField,
                });
            }

            if system.has_anomaly(AnomalyType::Supernova) {
                return Err(ValidationError::AnomalyBlocksMovement {
                    system: system_id.clone(),
                    anomaly: AnomalyType::Supernova,
                });
            }

            // A nebula may only be entered as the active system, which also
            // rules out passing through one.
            if system.has_anomaly(AnomalyType::Nebula)
                && (*coord != destination || context.active_system != Some(*coord))
            {
                return Err(ValidationError::NebulaRequiresActiveSystem {
                    system: system_id.clone(),
                });
            }

            // Gravity rifts never block; their bonus and survival rolls are
            // handled by range calculation and step execution.
        }

        Ok(())
    }
}

impl MovementRule for AnomalyRule {
    fn can_move(&self, context: &MovementContext) -> bool {
        self.check(context).is_ok()
    }

    fn movement_range(&self, unit: &Unit, technologies: &HashSet<Technology>) -> u32 {
        unit_stats(unit.unit_type, unit.faction, technologies).movement as u32
    }
}

/// Applies every rule; movement is legal only under their conjunction.
///
/// The rule list is fixed at construction. New rules are additions to this
/// engine, not runtime configuration.
pub struct MovementRuleEngine {
    anomaly: AnomalyRule,
    rules: Vec<Box<dyn MovementRule>>,
}

impl MovementRuleEngine {
    pub fn new() -> Self {
        Self {
            anomaly: AnomalyRule,
            rules: vec![
                Box::new(BasicMovementRule),
                Box::new(GravityDriveRule),
                Box::new(AnomalyRule),
            ],
        }
    }

    pub fn can_move(&self, context: &MovementContext) -> bool {
        self.rules.iter().all(|rule| rule.can_move(context))
    }

    /// Like [`MovementRuleEngine::can_move`] but with a typed denial
    pub fn check(&self, context: &MovementContext) -> Result<(), ValidationError> {
        self.anomaly.check(context)?;

        let required = required_movement(context);
        let range = path_effective_range(context);
        if required > range {
            return Err(ValidationError::InsufficientMovement {
                unit: context.unit.id,
                distance: required,
                range,
            });
        }

        Ok(())
    }

    pub fn max_movement_range(&self, unit: &Unit, technologies: &HashSet<Technology>) -> u32 {
        self.rules
            .iter()
            .map(|rule| rule.movement_range(unit, technologies))
            .max()
            .unwrap_or(0)
    }
}

impl Default for MovementRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
