use crate::invasion::InvasionReport;
use crate::production::{ProductionOrder, ProductionReport};
use combat::{DiceRollRecord, SpaceCannonReport};
use galaxy::SystemId;
use game::{ConfigurationError, GameState, PipelineError, ValidationError};
use movement::{MovementPlan, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use units::{PlayerId, UnitId};

/// Labeled points between steps where external reactive effects may fire.
/// The pipeline records which windows were reached; it never resolves the
/// effects itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimingWindow {
    AfterActivation,
    AfterMovement,
    StartOfSpaceCombat,
    BeforeInvasion,
    BeforeProduction,
}

impl TimingWindow {
    pub fn label(self) -> &'static str {
        match self {
            TimingWindow::AfterActivation => "after_activation",
            TimingWindow::AfterMovement => "after_movement",
            TimingWindow::StartOfSpaceCombat => "start_of_space_combat",
            TimingWindow::BeforeInvasion => "before_invasion",
            TimingWindow::BeforeProduction => "before_production",
        }
    }
}

/// Host decisions the pipeline cannot make on its own
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionChoices {
    /// Seed for the action's dice; the same seed replays identically
    pub dice_seed: u64,
    /// Per firing player, which enemy to target with space cannon
    pub space_cannon_targets: HashMap<PlayerId, PlayerId>,
    /// Ground forces to commit from space onto planets during invasion
    pub ground_force_commitments: Vec<(UnitId, String)>,
}

/// Mutable context shared by the steps of one tactical action
#[derive(Clone, Debug)]
pub struct TacticalContext {
    pub active_system: SystemId,
    pub player: PlayerId,
    pub movement_plan: Option<MovementPlan>,
    pub production_order: Option<ProductionOrder>,
    pub choices: ActionChoices,
    // accumulated outputs
    pub movement_result: Option<ValidationResult>,
    pub space_cannon_report: Option<SpaceCannonReport>,
    pub invasion_report: Option<InvasionReport>,
    pub production_report: Option<ProductionReport>,
    pub rift_casualties: Vec<(UnitId, units::UnitType)>,
    pub windows_reached: Vec<TimingWindow>,
}

impl TacticalContext {
    pub fn new(
        active_system: impl Into<SystemId>,
        player: impl Into<PlayerId>,
        choices: ActionChoices,
    ) -> Self {
        Self {
            active_system: active_system.into(),
            player: player.into(),
            movement_plan: None,
            production_order: None,
            choices,
            movement_result: None,
            space_cannon_report: None,
            invasion_report: None,
            production_report: None,
            rift_casualties: Vec::new(),
            windows_reached: Vec::new(),
        }
    }

    pub fn reach_window(&mut self, window: TimingWindow) {
        if !self.windows_reached.contains(&window) {
            self.windows_reached.push(window);
        }
    }
}

/// Anything that can stop a tactical action
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// What happened to one step of the pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: String,
    pub executed: bool,
}

/// Structured result of one proposed tactical action.
///
/// On success `new_state` holds the post-action snapshot; on failure
/// `error` explains why and the input state stands.
#[derive(Debug)]
pub struct TacticalActionResult {
    pub new_state: Option<GameState>,
    pub error: Option<ActionError>,
    pub step_outcomes: Vec<StepOutcome>,
    pub windows_reached: Vec<TimingWindow>,
    pub movement_result: Option<ValidationResult>,
    pub space_cannon_report: Option<SpaceCannonReport>,
    pub invasion_report: Option<InvasionReport>,
    pub production_report: Option<ProductionReport>,
    pub rift_casualties: Vec<(UnitId, units::UnitType)>,
    pub dice_log: Vec<DiceRollRecord>,
}

impl TacticalActionResult {
    pub fn is_success(&self) -> bool {
        self.new_state.is_some()
    }
}
