//=========================================================================
// Game Status View
//=========================================================================
//
// The always-on HUD: ability points, stage level, base hearts, and a
// transient message line that expires after a fixed number of ticks.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::ui::UiView;

//=== Tuning ==============================================================

/// Ticks a message stays on screen.
const MESSAGE_TTL_TICKS: u32 = 120;

//=== GameStatusUi ========================================================

#[derive(Debug, Default)]
pub struct GameStatusUi {
    ap: i32,
    stage_level: i32,
    hearts: i32,
    message: Option<String>,
    message_ttl: u32,
}

impl GameStatusUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_ap(&mut self, ap: i32) {
        self.ap = ap;
    }

    pub fn show_stage_level(&mut self, level: i32) {
        self.stage_level = level;
    }

    pub fn show_heart(&mut self, hearts: i32) {
        self.hearts = hearts;
    }

    pub fn show_message(&mut self, message: &str) {
        self.message = Some(message.to_owned());
        self.message_ttl = MESSAGE_TTL_TICKS;
    }

    pub fn ap(&self) -> i32 {
        self.ap
    }

    pub fn stage_level(&self) -> i32 {
        self.stage_level
    }

    pub fn hearts(&self) -> i32 {
        self.hearts
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl UiView for GameStatusUi {
    fn update(&mut self) {
        if self.message_ttl > 0 {
            self.message_ttl -= 1;
            if self.message_ttl == 0 {
                self.message = None;
            }
        }
    }

    fn release(&mut self) {
        *self = Self::default();
    }
}

//=========================================================================
// Tests
//=========================================================================
