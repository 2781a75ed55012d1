//! # Galaxy Crate
//!
//! The hex-based game board: axial coordinates, systems with planets and
//! space areas, wormhole and anomaly tags, and the topology queries the
//! movement rules depend on (adjacency, pathfinding, neighbor detection).
//!
//! ## Core Components
//!
//! - **[`HexCoord`]**: axial hex coordinates with distance and neighbors
//! - **[`System`]**: a board tile with planets, a space area, tags and tokens
//! - **[`Planet`]**: a named planet with resources, control and a surface
//! - **[`Galaxy`]**: coordinate registry, adjacency and BFS pathfinding

pub mod galaxy;
pub mod hex;
pub mod planet;
pub mod system;

pub use galaxy::Galaxy;
pub use hex::HexCoord;
pub use planet::Planet;
pub use system::{AnomalyType, System, SystemId, WormholeType};
