//! # Architecture Documentation
//!
//! This module documents how the engine crates fit together and where the
//! important boundaries are.
//!
//! # Crate Organization
//!
//! ## Units Crate: Pieces and Capabilities
//!
//! **Purpose:** The closed data model for game pieces
//!
//! **Responsibilities:**
//! - The twelve unit types and their ship / ground force / structure classes
//! - The pure capability lookup `(type, faction, techs) -> UnitStats`
//! - Unit upgrade technologies rewriting base stat lines
//! - Unit instances with identity, ownership and sustained damage
//!
//! **Key Types:**
//! - `UnitType`, `Faction`, `Technology`: closed enums, matched exhaustively
//! - `UnitStats`: movement, capacity, combat, production, ability flags
//! - `Unit`: one piece on the board
//!
//! ## Galaxy Crate: The Board
//!
//! **Purpose:** Topology and the entity containers on it
//!
//! **Responsibilities:**
//! - Axial hex coordinates with distance and neighbor iteration
//! - Systems holding planets, a space area, wormhole and anomaly tags
//! - Adjacency as the union of physical, wormhole and hyperlane edges
//! - Breadth-first pathfinding with a stable neighbor order
//! - Player presence and neighbor detection
//!
//! **Key Types:**
//! - `HexCoord`, `Galaxy`, `System`, `Planet`
//! - `WormholeType`, `AnomalyType`
//!
//! ## Game Crate: Canonical State
//!
//! **Purpose:** The immutable snapshot every rule reads
//!
//! **Responsibilities:**
//! - Players with command sheets, reinforcements, technologies, captures
//! - Phase, round and speaker bookkeeping
//! - Structural invariants (unit uniqueness, ships in space only)
//! - The engine-wide error taxonomy
//!
//! **Key Types:**
//! - `GameState`: cloned by every transition, never mutated in place
//! - `ValidationError` / `PipelineError` / `ConfigurationError`
//!
//! ## Movement Crate: Legality
//!
//! **Purpose:** One canonical answer to "may these units move there"
//!
//! **Responsibilities:**
//! - Composable movement rules (basic range, gravity drive, anomalies)
//! - Single-operation validation with board-level checks
//! - Joint plan validation with best-fit technology assignment,
//!   first-fit transport and destination-time fleet supply
//! - Plan execution against a working state copy
//!
//! **Key Types:**
//! - `MovementRule`, `MovementRuleEngine`, `MovementContext`
//! - `MovementValidator`, `MovementPlan`, `ValidationResult`
//!
//! ## Combat Crate: Dice and Cannons
//!
//! **Purpose:** Deterministic randomness and the combat the engine owns
//!
//! **Responsibilities:**
//! - Seeded d10 rolls with a replayable labeled log
//! - Space cannon offense with the active-player targeting rule
//! - Contracts for the external space and ground combat resolver
//!
//! **Key Types:**
//! - `DiceRoller`, `DiceRollRecord`
//! - `CombatResolver` (trait), `SpaceCannonReport`
//!
//! ## Actions Crate: The Tactical Action
//!
//! **Purpose:** The transaction that changes the game
//!
//! **Responsibilities:**
//! - The five-step pipeline: activation, movement, space cannon offense,
//!   invasion, production
//! - Pre-commit validation versus post-commit rollback
//! - The production and blockade subsystems
//! - Timing-window labels for external reactive effects
//!
//! **Key Types:**
//! - `TacticalActionCoordinator`, `TacticalStep`, `TacticalContext`
//! - `ProductionManager`, `BlockadeManager`, `InvasionController`
//!
//! # Data Flow
//!
//! A host proposes an operation:
//!
//! 1. The coordinator resolves the player and validates activation —
//!    failures here are typed values and nothing has changed
//! 2. The movement plan is validated jointly: path rules per ship, then
//!    technology assignment, transport and fleet supply
//! 3. Steps run in order against a working copy of the state; each step
//!    clones, mutates and returns the next state
//! 4. A failing step aborts the action; the caller still holds the
//!    pre-action snapshot, which is the rollback
//! 5. On success the result carries the new state, per-step outcomes,
//!    reached timing windows and the full dice log
//!
//! # Integration Points
//!
//! - **Combat resolver**: space combat and ground combat are delegated
//!   through the `CombatResolver` trait; the pipeline only surfaces the
//!   windows where they fire
//! - **Choice points**: fleet-supply overflow targets, space cannon targets
//!   and ground-force commitments arrive as values in `ActionChoices`,
//!   never as callbacks
//! - **Caching**: hosts may cache derived data (legal moves, paths) keyed
//!   on a state snapshot; any new snapshot invalidates
//!
//! # Concurrency Model
//!
//! The core is single-threaded and cooperative. A tactical action is a
//! synchronous transaction: no rule consults I/O and no step suspends.
//! `GameState` is a value; sharing it across threads is the host's
//! concern, not the engine's.
