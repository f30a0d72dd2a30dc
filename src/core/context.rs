//=========================================================================
// Game Context
//=========================================================================
//
// Shared data container passed into every subsystem, UI, and observer
// call.
//
// Subsystems never hold a reference to the facade or to each other;
// anything that must cross a subsystem boundary is pushed here as a
// command and routed by the facade at the tick boundary.
//
// Architecture:
//   Subsystem::update(&mut GameContext)
//        │ push
//        ▼
//   CommandQueue ──take()──> GameFacade::drain_commands() ──> pass-throughs
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::events::GameEvent;
use crate::core::systems::camp::CampInfo;
use crate::core::ui::soldier_info::SoldierInfo;
use crate::core::units::{EnemyKind, SoldierKind, Vec3, WeaponKind};

//=== GameCommand =========================================================

/// A request a subsystem, UI view, or observer routes back through the
/// facade. Each variant maps to exactly one facade pass-through.
#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    /// Train a soldier at a camp: costs ability points, then spawns.
    TrainSoldier {
        kind: SoldierKind,
        weapon: WeaponKind,
        level: i32,
        position: Vec3,
        cost: i32,
    },

    /// Run the build pipeline for a soldier and add it to the roster.
    SpawnSoldier {
        kind: SoldierKind,
        weapon: WeaponKind,
        level: i32,
        position: Vec3,
    },

    /// Run the build pipeline for an enemy and add it to the roster.
    SpawnEnemy {
        kind: EnemyKind,
        weapon: WeaponKind,
        position: Vec3,
        attack_position: Vec3,
    },

    /// Publish a game event to the observer lists.
    Notify(GameEvent),

    /// Bump the stage kill counter (and the achievement mirror).
    AddEnemyKilledCount,

    /// Grant ability points.
    GainAp(i32),

    /// An enemy reached the base; the stage loses a heart.
    EnemyReachedBase { kind: EnemyKind },

    /// The stage advanced to a new level.
    StageAdvanced(i32),

    /// End the session and return to the main menu.
    ChangeToMainMenu,

    // -- UI routing --
    ShowCampInfo(CampInfo),
    ShowSoldierInfo(SoldierInfo),
    ShowMessage(String),
    ShowHeart(i32),
    ShowAp(i32),
    ShowStageLevel(i32),
}

//=== CommandQueue ========================================================

/// Queue of pending facade commands.
///
/// Pushed during updates, taken by the facade at the tick boundary.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: Vec<GameCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a command for the next facade drain.
    pub fn push(&mut self, command: GameCommand) {
        self.queue.push(command);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameCommand> {
        self.queue.iter()
    }

    /// Takes all queued commands, leaving the queue empty.
    pub fn take(&mut self) -> Vec<GameCommand> {
        std::mem::take(&mut self.queue)
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }
}

//=== StageBoard ==========================================================

/// Stage state published for every other participant to read.
///
/// Written by the stage system (once at initialize, refreshed each
/// update); this is how stage knowledge reaches enemy plumbing and the
/// UI without a direct subsystem reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageBoard {
    pub stage_level: i32,
    pub base_position: Vec3,
    pub hearts: i32,
}

//=== GameContext =========================================================

/// Shared context handed to subsystem, UI, and observer calls.
#[derive(Debug, Default)]
pub struct GameContext {
    /// Pending requests for the facade.
    pub commands: CommandQueue,

    /// Stage snapshot, written by the stage system.
    pub board: StageBoard,
}

impl GameContext {
    pub fn new() -> Self {
        Self {
            commands: CommandQueue::new(),
            board: StageBoard::default(),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_preserves_push_order() {
        let mut queue = CommandQueue::new();
        queue.push(GameCommand::AddEnemyKilledCount);
        queue.push(GameCommand::GainAp(2));
        queue.push(GameCommand::ChangeToMainMenu);

        assert_eq!(queue.len(), 3);

        let drained = queue.take();
        assert_eq!(drained[0], GameCommand::AddEnemyKilledCount);
        assert_eq!(drained[1], GameCommand::GainAp(2));
        assert_eq!(drained[2], GameCommand::ChangeToMainMenu);
        assert!(queue.is_empty());
    }

    #[test]
    fn take_on_empty_queue_is_empty() {
        let mut queue = CommandQueue::new();
        assert!(queue.take().is_empty());
    }

    #[test]
    fn context_starts_blank() {
        let ctx = GameContext::new();
        assert!(ctx.commands.is_empty());
        assert_eq!(ctx.board, StageBoard::default());
    }
}
