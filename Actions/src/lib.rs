//! # Actions Crate
//!
//! The tactical action: a five-step pipeline (activation, movement, space
//! cannon offense, invasion, production) over an immutable game state, plus
//! the production and blockade subsystems the later steps consult.
//!
//! The coordinator owns the transaction boundary. Validation failures are
//! returned before anything commits; once activation commits, a failing
//! step aborts the whole action and the caller keeps the pre-action
//! snapshot.
//!
//! ## Core Components
//!
//! - **[`TacticalActionCoordinator`] / [`propose_tactical_action`]**: entry point
//! - **[`TacticalStep`]**: the step interface, one implementation per step
//! - **[`ProductionManager`]**: cost, reinforcements, placement, capacity
//! - **[`BlockadeManager`]**: blockade detection and its side effects
//! - **[`InvasionController`]**: the invasion sub-pipeline

pub mod blockade;
pub mod context;
pub mod coordinator;
pub mod invasion;
pub mod production;
pub mod steps;

pub use blockade::BlockadeManager;
pub use context::{
    ActionChoices, ActionError, StepOutcome, TacticalActionResult, TacticalContext, TimingWindow,
};
pub use coordinator::{
    can_activate_system, effective_movement_range, is_blockaded, is_valid_movement,
    propose_tactical_action, requires_space_combat, validate_movement_plan,
    TacticalActionCoordinator,
};
pub use invasion::{InvasionController, InvasionReport};
pub use production::{ProductionManager, ProductionOrder, ProductionReport, ProductionRequest};
pub use steps::TacticalStep;
