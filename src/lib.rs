//! # Imperium: Hex-Map 4X Rules Engine
//!
//! A rules engine core for a four-player-plus strategy board game on a
//! hexagonal galaxy map. The engine maintains a canonical game state,
//! validates candidate player operations against the rulebook, and applies
//! chosen operations deterministically to produce a new state.
//!
//! ## Workspace Overview
//!
//! The engine is organized as a Cargo workspace of specialized crates:
//!
//! - **[`units`]** - Unit types, factions, technologies and the capability table
//! - **[`galaxy`]** - Hex coordinates, systems, planets, adjacency, pathfinding
//! - **[`game`]** - Immutable game-state snapshots, players, command sheets, errors
//! - **[`movement`]** - Composable movement rules and the canonical validator
//! - **[`combat`]** - Seeded dice, space cannon resolution, combat contracts
//! - **[`actions`]** - The five-step tactical action pipeline and coordinator
//!
//! ## System Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     Host Layer                       │
//! │  (UI, AI evaluators, scenario builders, persistence) │
//! └──────────────────────────┬───────────────────────────┘
//!                            │  propose_tactical_action
//! ┌──────────────────────────▼───────────────────────────┐
//! │                      Actions                         │
//! │  coordinator · steps · production · blockade         │
//! └───────┬───────────────┬──────────────┬───────────────┘
//!         │               │              │
//! ┌───────▼──────┐ ┌──────▼───────┐ ┌────▼─────────┐
//! │   Movement   │ │    Combat    │ │     Game     │
//! │ rules+valid. │ │ dice+cannon  │ │  state+errors│
//! └───────┬──────┘ └──────┬───────┘ └────┬─────────┘
//!         │               │              │
//!       ┌─▼───────────────▼──────────────▼─┐
//!       │          Galaxy  ·  Units        │
//!       └──────────────────────────────────┘
//! ```
//!
//! ## Key Properties
//!
//! - **Immutable state**: every transition returns a new [`game::GameState`];
//!   a failed action leaves the caller's snapshot untouched
//! - **Typed errors**: validation denials, pipeline aborts and caller bugs
//!   are distinct types, never strings or panics
//! - **Deterministic dice**: one seeded roller per action with a full log,
//!   so replays reproduce exactly
//! - **Closed rule set**: movement rules and pipeline steps are fixed lists
//!   of small objects, extended by adding code, not configuration
//!
//! ## Quick Start
//!
//! ```bash
//! # Build the workspace
//! cargo build --workspace
//!
//! # Run all tests
//! cargo test --workspace
//!
//! # Run the demo scenario
//! cargo run --bin example
//! ```

// Architecture documentation module
pub mod architecture;

// Re-export all workspace crates
pub use actions;
pub use combat;
pub use galaxy;
pub use game;
pub use movement;
pub use units;

// Re-export commonly used types
pub use actions::{
    propose_tactical_action, ActionChoices, ProductionOrder, TacticalActionResult,
};
pub use combat::DiceRoller;
pub use galaxy::{Galaxy, HexCoord, Planet, System, SystemId};
pub use game::{GamePhase, GameState, Player};
pub use movement::{MovementPlan, MovementValidator};
pub use units::{Faction, PlayerId, Technology, Unit, UnitType};
