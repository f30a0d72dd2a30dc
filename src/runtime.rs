//=========================================================================
// Game Loop
//=========================================================================
//
// Process-level holder and frame driver.
//
// Architecture:
// ```text
//     GameLoopBuilder ──build()──> GameLoop ──run(host)──> [fixed TPS]
//         │                          │
//         ├─ with_tps()              ├─ owns the single GameFacade
//         └─ with_save_path()        └─ owns the SceneStateMachine
// ```
//
// The loop is the one place the "single shared instance" lives: the
// facade is constructed here and lent by `&mut` into the scene hooks,
// never reachable through a global.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::facade::GameFacade;
use crate::core::scene::flow::StartState;
use crate::core::scene::SceneStateMachine;
use crate::host::GameHost;

//=== GameLoopBuilder =====================================================

/// Fluent configuration for the loop. Construction performs no side
/// effects; everything real happens once the battle scene initializes
/// the facade.
///
/// # Default Values
///
/// - **TPS**: 60.0 (core ticks per second in `run`)
/// - **Save path**: facade default (`bastion_save.ron`)
pub struct GameLoopBuilder {
    tps: f64,
    save_path: Option<PathBuf>,
}

impl GameLoopBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            save_path: None,
        }
    }

    /// Sets the target ticks per second for `run`.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Overrides where achievement progress is persisted.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    pub fn build(self) -> GameLoop {
        info!("building game loop (TPS: {})", self.tps);

        let mut game = GameFacade::new();
        if let Some(path) = self.save_path {
            game.set_save_path(path);
        }

        GameLoop {
            game,
            scenes: SceneStateMachine::new(),
            tps: self.tps,
            started: false,
        }
    }
}

impl Default for GameLoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== GameLoop ============================================================

/// Owns the facade and the scene machine; the host drives it one tick
/// per frame (or hands the cadence to `run`).
pub struct GameLoop {
    game: GameFacade,
    scenes: SceneStateMachine,
    tps: f64,
    started: bool,
}

impl GameLoop {
    pub fn game(&self) -> &GameFacade {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameFacade {
        &mut self.game
    }

    /// Name of the active scene state.
    pub fn scene_name(&self) -> Option<&'static str> {
        self.scenes.state_name()
    }

    /// Installs the boot state. Runs implicitly on the first tick.
    pub fn start(&mut self, host: &mut dyn GameHost) {
        if self.started {
            warn!("start called twice; ignoring");
            return;
        }
        self.started = true;
        self.scenes
            .set_state(Box::new(StartState::new()), "", &mut self.game, host);
    }

    /// One frame: pump host events, then advance the scene flow.
    /// The only supported entry cadence is one call per frame.
    pub fn tick(&mut self, host: &mut dyn GameHost) {
        if !self.started {
            self.start(host);
        }
        host.pump();
        self.scenes.tick(&mut self.game, host);
    }

    /// Blocks, ticking at the configured TPS, until the host requests
    /// quit. A battle interrupted by quit is still released so progress
    /// persists.
    pub fn run(&mut self, host: &mut dyn GameHost) {
        info!("entering game loop at {} TPS", self.tps);
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);

        loop {
            let frame_start = Instant::now();

            self.tick(host);

            if host.quit_requested() {
                info!("host requested quit");
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }

        self.game.release();
        info!("game loop exited");
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ChannelHost, HostEvent};

    #[test]
    fn builder_defaults() {
        let builder = GameLoopBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert!(builder.save_path.is_none());
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let game_loop = GameLoopBuilder::new()
            .with_tps(120.0)
            .with_save_path("scratch.ron")
            .build();
        assert_eq!(game_loop.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_rejects_zero_tps() {
        GameLoopBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_rejects_negative_tps() {
        GameLoopBuilder::new().with_tps(-30.0);
    }

    #[test]
    fn first_tick_boots_into_the_flow() {
        let mut game_loop = GameLoopBuilder::new().build();
        let (mut host, _tx) = ChannelHost::new(8);

        assert_eq!(game_loop.scene_name(), None);
        game_loop.tick(&mut host);

        // The boot state already handed off to the menu behind a load.
        assert_eq!(game_loop.scene_name(), Some("MainMenu"));
        assert_eq!(host.pending_load(), Some("Menu"));
    }

    #[test]
    fn run_exits_on_quit() {
        let mut game_loop = GameLoopBuilder::new().with_tps(240.0).build();
        let (mut host, tx) = ChannelHost::new(8);

        tx.send(HostEvent::Quit).unwrap();
        game_loop.run(&mut host);

        // Quit arrived before any battle began; nothing was initialized.
        assert!(!game_loop.game().is_initialized());
    }
}
