//! # Movement Crate
//!
//! The movement rule engine and the canonical movement validator.
//!
//! A movement is judged by a fixed list of composable rules (basic range,
//! gravity drive, anomalies); the validator layers the board-level checks on
//! top: command tokens, enemy ships along the path, transport capacity and
//! fleet supply. Both the single-operation entry point and the joint plan
//! entry point go through the same validator, so there is exactly one place
//! where movement legality is decided.
//!
//! ## Core Components
//!
//! - **[`MovementContext`]**: everything a rule may look at
//! - **[`MovementRule`] / [`MovementRuleEngine`]**: composable legality rules
//! - **[`MovementOperation`] / [`MovementPlan`]**: what players propose
//! - **[`MovementValidator`]**: single-op and joint plan validation
//! - **[`MovementExecutor`]**: applies a validated plan to a working state

pub mod context;
pub mod executor;
pub mod operation;
pub mod plan;
pub mod rules;
pub mod validator;

pub use context::MovementContext;
pub use executor::MovementExecutor;
pub use operation::{Location, MovementOperation};
pub use plan::{GroundForceMovement, MovementPlan, ShipMovement, ValidationResult};
pub use rules::{
    path_effective_range, AnomalyRule, BasicMovementRule, GravityDriveRule, MovementRule,
    MovementRuleEngine,
};
pub use validator::MovementValidator;
