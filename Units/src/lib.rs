//! # Units Crate
//!
//! Unit data model for the tactical engine: the closed set of unit types,
//! factions and technologies, the per-type capability table, and the `Unit`
//! instances that populate systems and planets.
//!
//! ## Core Components
//!
//! - **[`UnitType`]**: closed enum of every piece in the game
//! - **[`UnitStats`]**: capability bundle (movement, capacity, combat, abilities)
//! - **[`unit_stats`]**: pure `(type, faction, techs) -> UnitStats` lookup
//! - **[`Unit`]**: an owned piece with identity, faction and known technologies
//! - **[`Faction`]**: the playable factions with their commodity ceilings
//! - **[`Technology`]**: researched technologies, including unit upgrades

pub mod faction;
pub mod stats;
pub mod technology;
pub mod unit;
pub mod unit_type;

pub use faction::Faction;
pub use stats::{unit_stats, UnitStats};
pub use technology::{MovementBoost, Technology};
pub use unit::{PlayerId, Unit, UnitError, UnitId};
pub use unit_type::UnitType;
