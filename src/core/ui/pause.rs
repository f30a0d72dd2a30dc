//=========================================================================
// Pause View
//=========================================================================
//
// The pause overlay. Shows the achievement snapshot captured at the
// moment the game paused; the facade toggles it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::save::AchievementSaveData;
use crate::core::ui::UiView;

//=== GamePauseUi =========================================================

#[derive(Debug, Default)]
pub struct GamePauseUi {
    visible: bool,
    snapshot: Option<AchievementSaveData>,
}

impl GamePauseUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, snapshot: AchievementSaveData) {
        self.snapshot = Some(snapshot);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.snapshot = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn snapshot(&self) -> Option<&AchievementSaveData> {
        self.snapshot.as_ref()
    }
}

impl UiView for GamePauseUi {
    fn release(&mut self) {
        self.hide();
    }
}

//=========================================================================
// Tests
//=========================================================================
