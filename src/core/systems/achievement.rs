//=========================================================================
// Achievement System
//=========================================================================
//
// Session counters that survive across sessions through the save file.
//
// The facade merges the loaded save in at initialize and snapshots the
// counters (`create_save_data`) for the pause panel and for the final
// persist step of release.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::save::AchievementSaveData;
use crate::core::systems::GameSystem;

//=== AchievementSystem ===================================================

pub struct AchievementSystem {
    enemy_kills: u32,
    soldiers_trained: u32,
    stages_cleared: u32,
    survival_ticks: u64,
}

impl AchievementSystem {
    pub fn new() -> Self {
        Self {
            enemy_kills: 0,
            soldiers_trained: 0,
            stages_cleared: 0,
            survival_ticks: 0,
        }
    }

    //--- Recording --------------------------------------------------------

    pub fn record_enemy_kill(&mut self) {
        self.enemy_kills += 1;
    }

    pub fn record_soldier_trained(&mut self) {
        self.soldiers_trained += 1;
    }

    pub fn record_stage_cleared(&mut self) {
        self.stages_cleared += 1;
    }

    //--- Persistence ------------------------------------------------------

    /// Snapshot of the current counters as an opaque save payload.
    pub fn create_save_data(&self) -> AchievementSaveData {
        AchievementSaveData {
            enemy_kills: self.enemy_kills,
            soldiers_trained: self.soldiers_trained,
            stages_cleared: self.stages_cleared,
            survival_ticks: self.survival_ticks,
        }
    }

    /// Adopts a loaded save: the session continues from its counters.
    pub fn set_save_data(&mut self, data: &AchievementSaveData) {
        self.enemy_kills = data.enemy_kills;
        self.soldiers_trained = data.soldiers_trained;
        self.stages_cleared = data.stages_cleared;
        self.survival_ticks = data.survival_ticks;
    }
}

impl Default for AchievementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystem for AchievementSystem {
    fn update(&mut self, _ctx: &mut GameContext) {
        self.survival_ticks += 1;
    }

    fn release(&mut self, _ctx: &mut GameContext) {
        info!(
            "achievements: {} kills, {} trained, {} stages, {} ticks survived",
            self.enemy_kills, self.soldiers_trained, self.stages_cleared, self.survival_ticks
        );
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_round_trip_through_save_data() {
        let mut system = AchievementSystem::new();
        system.record_enemy_kill();
        system.record_enemy_kill();
        system.record_soldier_trained();
        system.record_stage_cleared();

        let data = system.create_save_data();
        assert_eq!(data.enemy_kills, 2);
        assert_eq!(data.soldiers_trained, 1);
        assert_eq!(data.stages_cleared, 1);

        let mut restored = AchievementSystem::new();
        restored.set_save_data(&data);
        assert_eq!(restored.create_save_data(), data);
    }

    #[test]
    fn survival_ticks_accumulate_per_update() {
        let mut system = AchievementSystem::new();
        let mut ctx = GameContext::new();

        for _ in 0..5 {
            system.update(&mut ctx);
        }
        assert_eq!(system.create_save_data().survival_ticks, 5);
    }
}
