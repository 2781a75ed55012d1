//! # Game Crate
//!
//! Canonical game state and the players that act on it. `GameState` is an
//! immutable snapshot: transition functions clone, mutate the clone and hand
//! back a new value, so a failed tactical action can always fall back to the
//! snapshot it started from.
//!
//! ## Core Components
//!
//! - **[`GameState`]**: players + galaxy + phase/round/speaker, as a value
//! - **[`Player`]**: command sheet, reinforcements, technologies, captures
//! - **[`CommandSheet`]**: the three token pools and trade goods
//! - **[`ValidationError`] / [`PipelineError`] / [`ConfigurationError`]**:
//!   the engine-wide error taxonomy

pub mod command_sheet;
pub mod error;
pub mod player;
pub mod state;

pub use command_sheet::{CommandPool, CommandSheet};
pub use error::{
    parse_technology, parse_unit_type, ConfigurationError, PipelineError, ValidationError,
};
pub use player::Player;
pub use state::{GamePhase, GameState, UnitLocation};
