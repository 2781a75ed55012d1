use galaxy::{AnomalyType, SystemId};
use thiserror::Error;
use units::{PlayerId, UnitId, UnitType};

/// Recoverable pre-commit failures. The caller sees the error and the game
/// state is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("system {system} does not exist")]
    InvalidSystem { system: SystemId },

    #[error("own command token in {system} blocks moving out")]
    CommandTokenBlocksExit { system: SystemId },

    #[error("enemy ships in {system} block the path")]
    EnemyShipBlocksPath { system: SystemId },

    #[error("no path from {from} to {to}")]
    NoPathExists { from: SystemId, to: SystemId },

    #[error("unit {unit} needs range {distance} but has {range}")]
    InsufficientMovement {
        unit: UnitId,
        distance: u32,
        range: u32,
    },

    #[error("{required} transport slots needed, {available} available")]
    InsufficientTransport { required: u32, available: u32 },

    #[error("{ships} non-fighter ships in {system} exceed fleet pool of {fleet_pool}")]
    FleetSupplyExceeded {
        system: SystemId,
        ships: u32,
        fleet_pool: u32,
    },

    #[error("{anomaly} in {system} blocks movement")]
    AnomalyBlocksMovement {
        system: SystemId,
        anomaly: AnomalyType,
    },

    #[error("nebula {system} can only be entered as the active system")]
    NebulaRequiresActiveSystem { system: SystemId },

    #[error("ground forces cannot move from {from} directly to {to}")]
    DirectPlanetTransfer { from: String, to: String },

    #[error("production costs {required} resources, {available} available")]
    InsufficientResources { required: u32, available: u32 },

    #[error("{requested} {unit_type} requested, {available} in reinforcements")]
    InsufficientReinforcements {
        unit_type: UnitType,
        requested: u32,
        available: u32,
    },

    #[error("production in {system} is blockaded")]
    BlockadedProduction { system: SystemId },

    #[error("{unit_type} cannot be placed at {location}")]
    InvalidPlacement {
        unit_type: UnitType,
        location: String,
    },

    #[error("{used} production used, combined capacity is {capacity}")]
    ProductionCapacityExceeded { used: u32, capacity: u32 },

    #[error("{player} already controls {planet}")]
    AlreadyControls { player: PlayerId, planet: String },

    #[error("unit {unit} is not in system {system}")]
    UnitNotInSystem { unit: UnitId, system: SystemId },

    #[error("no tactic token available")]
    NoTacticToken,

    #[error("system {system} already carries a command token of {player}")]
    SystemAlreadyActivated { system: SystemId, player: PlayerId },
}

/// Post-commit failures. The tactical action aborts and the pre-action
/// snapshot is restored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("step {step} failed: {cause}")]
    StepExecutionFailed {
        step: String,
        cause: ValidationError,
    },

    #[error("invariant violated: {description}")]
    InvariantViolated { description: String },
}

/// Caller bugs. Never swallowed, never converted into validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown unit type: {0}")]
    UnknownUnitType(String),

    #[error("unknown technology: {0}")]
    UnknownTechnology(String),

    #[error("player {0} is not in this game")]
    PlayerNotInGame(PlayerId),
}

/// Resolve a wire-format unit type name for a host request
pub fn parse_unit_type(name: &str) -> Result<UnitType, ConfigurationError> {
    UnitType::parse(name).ok_or_else(|| ConfigurationError::UnknownUnitType(name.to_string()))
}

/// Resolve a wire-format technology name for a host request
pub fn parse_technology(name: &str) -> Result<units::Technology, ConfigurationError> {
    units::Technology::parse(name)
        .ok_or_else(|| ConfigurationError::UnknownTechnology(name.to_string()))
}
