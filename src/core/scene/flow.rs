//=========================================================================
// Scene Flow
//=========================================================================
//
// The game's concrete top-level flow:
//
//   StartState ──> MainMenuState ──click──> BattleState
//                        ▲                      │
//                        └──────game over───────┘
//
// Each state decides its own outgoing transition; nothing outside this
// file knows the order these run in.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::facade::GameFacade;
use crate::core::scene::{SceneDirective, SceneState};
use crate::host::GameHost;

//=== StartState ==========================================================

/// One-shot boot state; hands straight off to the menu.
#[derive(Debug, Default)]
pub struct StartState;

impl StartState {
    pub fn new() -> Self {
        Self
    }
}

impl SceneState for StartState {
    fn name(&self) -> &'static str {
        "Start"
    }

    fn on_update(&mut self, _game: &mut GameFacade, _host: &mut dyn GameHost) -> SceneDirective {
        SceneDirective::switch(MainMenuState::new(), "Menu")
    }
}

//=== MainMenuState =======================================================

/// Waits in the menu until the player clicks anything, then starts a
/// battle session.
#[derive(Debug, Default)]
pub struct MainMenuState;

impl MainMenuState {
    pub fn new() -> Self {
        Self
    }
}

impl SceneState for MainMenuState {
    fn name(&self) -> &'static str {
        "MainMenu"
    }

    fn on_begin(&mut self, _game: &mut GameFacade, _host: &mut dyn GameHost) {
        info!("entered main menu");
    }

    fn on_update(&mut self, _game: &mut GameFacade, host: &mut dyn GameHost) -> SceneDirective {
        if host.take_click().is_some() {
            return SceneDirective::switch(BattleState::new(), "Battle");
        }
        SceneDirective::Stay
    }
}

//=== BattleState =========================================================

/// The gameplay state: owns the facade session for its whole lifetime.
/// Leaves for the menu once the facade reports game over.
#[derive(Debug, Default)]
pub struct BattleState;

impl BattleState {
    pub fn new() -> Self {
        Self
    }
}

impl SceneState for BattleState {
    fn name(&self) -> &'static str {
        "Battle"
    }

    fn on_begin(&mut self, game: &mut GameFacade, _host: &mut dyn GameHost) {
        game.initialize();
    }

    fn on_update(&mut self, game: &mut GameFacade, host: &mut dyn GameHost) -> SceneDirective {
        game.update(host);

        if game.is_game_over() {
            return SceneDirective::switch(MainMenuState::new(), "Menu");
        }
        SceneDirective::Stay
    }

    fn on_end(&mut self, game: &mut GameFacade) {
        game.release();
    }
}

//=========================================================================
// Tests
//=========================================================================
