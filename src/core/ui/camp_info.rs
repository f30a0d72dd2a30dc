//=========================================================================
// Camp Info View
//=========================================================================
//
// Panel describing the clicked camp. Shown and hidden by the facade;
// showing camp info hides the soldier panel and vice versa.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::systems::camp::CampInfo;
use crate::core::ui::UiView;

//=== CampInfoUi ==========================================================

#[derive(Debug, Default)]
pub struct CampInfoUi {
    visible: bool,
    info: Option<CampInfo>,
}

impl CampInfoUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_info(&mut self, info: CampInfo) {
        self.info = Some(info);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn info(&self) -> Option<&CampInfo> {
        self.info.as_ref()
    }
}

impl UiView for CampInfoUi {
    fn release(&mut self) {
        self.visible = false;
        self.info = None;
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{SoldierKind, Vec3, WeaponKind};

    fn info() -> CampInfo {
        CampInfo {
            trains: SoldierKind::Rookie,
            weapon: WeaponKind::Gun,
            position: Vec3::ZERO,
            train_cost: 2,
            train_level: 1,
        }
    }

    #[test]
    fn show_and_hide() {
        let mut view = CampInfoUi::new();
        assert!(!view.is_visible());

        view.show_info(info());
        assert!(view.is_visible());
        assert_eq!(view.info().unwrap().trains, SoldierKind::Rookie);

        view.hide();
        assert!(!view.is_visible());
        // Hidden keeps the last info; release clears it.
        assert!(view.info().is_some());

        view.release();
        assert!(view.info().is_none());
    }
}
