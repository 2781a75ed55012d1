//! Blockade detection and its side effects.
//!
//! A production unit is blockaded when its system holds enemy ships and
//! none of its owner's ships. Blockaded units cannot produce ships (ground
//! forces are unaffected), captured units of the blockading players are
//! returned, and further capture of their units is forbidden while the
//! blockade lasts.

use galaxy::SystemId;
use game::GameState;
use log::info;
use std::collections::BTreeSet;
use units::{PlayerId, Unit, UnitId};

pub struct BlockadeManager;

impl BlockadeManager {
    /// Whether a production unit is blockaded. Units without production can
    /// never be blockaded.
    pub fn is_unit_blockaded(state: &GameState, unit_id: UnitId) -> bool {
        let Some((system_id, unit)) = find_unit(state, unit_id) else {
            return false;
        };
        if !unit.has_production() {
            return false;
        }
        Self::is_system_blockaded_for(state, &system_id, &unit.owner)
    }

    /// The blockade condition itself: enemy ships present, no friendly ships
    pub fn is_system_blockaded_for(
        state: &GameState,
        system_id: &SystemId,
        player: &PlayerId,
    ) -> bool {
        match state.system(system_id) {
            Some(system) => {
                system.has_enemy_ships(player) && !system.has_friendly_ships(player)
            }
            None => false,
        }
    }

    /// A blockaded unit can still produce ground forces, never ships
    pub fn can_produce_ships(state: &GameState, unit_id: UnitId) -> bool {
        !Self::is_unit_blockaded(state, unit_id)
    }

    pub fn can_produce_ground_forces(_state: &GameState, _unit_id: UnitId) -> bool {
        true
    }

    /// Players whose ships enforce the blockade on a unit
    pub fn blockading_players(state: &GameState, unit_id: UnitId) -> BTreeSet<PlayerId> {
        if !Self::is_unit_blockaded(state, unit_id) {
            return BTreeSet::new();
        }
        let Some((system_id, unit)) = find_unit(state, unit_id) else {
            return BTreeSet::new();
        };
        let Some(system) = state.system(&system_id) else {
            return BTreeSet::new();
        };
        system
            .space_units()
            .iter()
            .filter(|u| u.owner != unit.owner && u.is_ship())
            .map(|u| u.owner.clone())
            .collect()
    }

    /// Apply the capture side effect of a blockade: every unit the blockaded
    /// player has captured from a blockading player goes home, into that
    /// player's reinforcements.
    pub fn apply_blockade_effects(state: &mut GameState, unit_id: UnitId) {
        let Some((_, unit)) = find_unit(state, unit_id) else {
            return;
        };
        let blockaded_owner = unit.owner.clone();
        let blockading = Self::blockading_players(state, unit_id);

        for blockading_player in blockading {
            let released = match state.player_mut(&blockaded_owner) {
                Ok(owner) => owner.release_captured_of(&blockading_player),
                Err(_) => Vec::new(),
            };
            if released.is_empty() {
                continue;
            }
            info!(
                "blockade: {} returns {} captured units to {}",
                blockaded_owner,
                released.len(),
                blockading_player
            );
            if let Ok(home) = state.player_mut(&blockading_player) {
                for unit in released {
                    home.return_to_reinforcements(unit.unit_type, 1);
                }
            }
        }
    }

    /// Rule 14.2a: a blockaded player cannot capture units belonging to a
    /// player blockading them.
    pub fn can_capture_unit(
        state: &GameState,
        target_unit: &Unit,
        capturing_player: &PlayerId,
    ) -> bool {
        for system in state.galaxy.systems() {
            for unit in system.all_units() {
                if &unit.owner != capturing_player || !unit.has_production() {
                    continue;
                }
                if !Self::is_unit_blockaded(state, unit.id) {
                    continue;
                }
                if Self::blockading_players(state, unit.id).contains(&target_unit.owner) {
                    return false;
                }
            }
        }
        true
    }
}

fn find_unit(state: &GameState, unit_id: UnitId) -> Option<(SystemId, Unit)> {
    for system in state.galaxy.systems() {
        if let Some(unit) = system.all_units().find(|u| u.id == unit_id) {
            return Some((system.id.clone(), unit.clone()));
        }
    }
    None
}
