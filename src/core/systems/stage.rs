//=========================================================================
// Stage System
//=========================================================================
//
// Wave spawning, stage progression, and the base's hearts.
//
// The stage publishes its public state onto the context board every
// update; that board is the only way other participants learn stage
// facts (no subsystem holds a stage reference).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::context::{GameCommand, GameContext, StageBoard};
use crate::core::systems::GameSystem;
use crate::core::units::{EnemyKind, Vec3, WeaponKind};

//=== Tuning ==============================================================

/// Ticks between enemy spawns.
const SPAWN_INTERVAL_TICKS: u32 = 180;

/// Kills needed to advance one stage level.
const KILLS_PER_STAGE: i32 = 10;

/// Hearts the base starts with.
const BASE_HEARTS: i32 = 5;

//=== StageSystem =========================================================

/// Drives enemy waves and tracks stage progress.
pub struct StageSystem {
    stage_level: i32,
    enemy_killed_count: i32,
    hearts: i32,
    base_position: Vec3,
    spawn_point: Vec3,
    spawn_cooldown: u32,
}

impl StageSystem {
    pub fn new() -> Self {
        Self {
            stage_level: 0,
            enemy_killed_count: 0,
            hearts: 0,
            base_position: Vec3::ZERO,
            spawn_point: Vec3::ZERO,
            spawn_cooldown: 0,
        }
    }

    pub fn stage_level(&self) -> i32 {
        self.stage_level
    }

    pub fn enemy_killed_count(&self) -> i32 {
        self.enemy_killed_count
    }

    pub fn hearts(&self) -> i32 {
        self.hearts
    }

    /// Enemy archetype for the current stage level.
    fn wave_kind(&self) -> EnemyKind {
        match self.stage_level {
            ..=1 => EnemyKind::Elf,
            2 => EnemyKind::Troll,
            _ => EnemyKind::Ogre,
        }
    }

    fn wave_weapon(&self) -> WeaponKind {
        match self.wave_kind() {
            EnemyKind::Elf => WeaponKind::Gun,
            EnemyKind::Troll => WeaponKind::Rifle,
            EnemyKind::Ogre => WeaponKind::Rocket,
        }
    }

    fn publish_board(&self, ctx: &mut GameContext) {
        ctx.board = StageBoard {
            stage_level: self.stage_level,
            base_position: self.base_position,
            hearts: self.hearts,
        };
    }

    //--- Facade entry points ----------------------------------------------

    /// Bumps the kill counter; advances the stage level every
    /// `KILLS_PER_STAGE` kills.
    pub fn add_enemy_killed_count(&mut self, ctx: &mut GameContext) {
        self.enemy_killed_count += 1;
        debug!("enemy killed count: {}", self.enemy_killed_count);

        if self.enemy_killed_count % KILLS_PER_STAGE == 0 {
            self.stage_level += 1;
            info!("stage advanced to {}", self.stage_level);
            ctx.commands.push(GameCommand::StageAdvanced(self.stage_level));
        }
        self.publish_board(ctx);
    }

    /// An enemy reached the base: lose a heart; at zero the session ends.
    pub fn on_base_attacked(&mut self, ctx: &mut GameContext) {
        self.hearts -= 1;
        ctx.commands.push(GameCommand::ShowHeart(self.hearts));

        if self.hearts <= 0 {
            info!("base has fallen");
            ctx.commands.push(GameCommand::ChangeToMainMenu);
        }
        self.publish_board(ctx);
    }
}

impl Default for StageSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystem for StageSystem {
    fn initialize(&mut self, ctx: &mut GameContext) {
        self.stage_level = 1;
        self.enemy_killed_count = 0;
        self.hearts = BASE_HEARTS;
        self.base_position = Vec3::new(0.0, 0.0, -20.0);
        self.spawn_point = Vec3::new(0.0, 0.0, 40.0);
        self.spawn_cooldown = SPAWN_INTERVAL_TICKS;

        // Startup injection: the board is how everyone else learns where
        // the base is before the first update runs.
        self.publish_board(ctx);
        ctx.commands.push(GameCommand::ShowStageLevel(self.stage_level));
        ctx.commands.push(GameCommand::ShowHeart(self.hearts));
        info!("stage system ready (level {})", self.stage_level);
    }

    fn update(&mut self, ctx: &mut GameContext) {
        self.spawn_cooldown = self.spawn_cooldown.saturating_sub(1);
        if self.spawn_cooldown == 0 {
            self.spawn_cooldown = SPAWN_INTERVAL_TICKS;
            ctx.commands.push(GameCommand::SpawnEnemy {
                kind: self.wave_kind(),
                weapon: self.wave_weapon(),
                position: self.spawn_point,
                attack_position: self.base_position,
            });
        }

        self.publish_board(ctx);
    }

    fn release(&mut self, _ctx: &mut GameContext) {
        info!(
            "stage released at level {} ({} kills)",
            self.stage_level, self.enemy_killed_count
        );
    }
}

//=========================================================================
// Tests
//=========================================================================
