//! # Combat Crate
//!
//! Dice and the combat-adjacent abilities the tactical pipeline resolves
//! itself: space cannon offense and bombardment rolls. Full fleet battles
//! are delegated to an external [`CombatResolver`]; the engine only defines
//! the contract and the timing windows where it fires.
//!
//! ## Determinism
//!
//! Every die in a tactical action comes from one seeded [`DiceRoller`].
//! The roller records a labeled log of results, so a replay with the same
//! seed and the same decisions reproduces the action exactly.

pub mod dice;
pub mod resolver;
pub mod space_cannon;

pub use dice::{calculate_hits, DiceRollRecord, DiceRoller};
pub use resolver::{CombatResolver, NoopCombatResolver};
pub use space_cannon::{
    resolve_space_cannon_offense, space_cannon_participants, SpaceCannonReport, SpaceCannonVolley,
};
