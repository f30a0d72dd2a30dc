//=========================================================================
// Soldier Info View
//=========================================================================
//
// Panel describing the clicked soldier.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::ui::UiView;
use crate::core::units::{CharacterId, SoldierKind, WeaponKind};

//=== SoldierInfo =========================================================

/// Display snapshot of a soldier, taken from the roster at click time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoldierInfo {
    pub id: CharacterId,
    pub kind: SoldierKind,
    pub level: i32,
    pub hp: i32,
    pub weapon: Option<WeaponKind>,
}

//=== SoldierInfoUi =======================================================

#[derive(Debug, Default)]
pub struct SoldierInfoUi {
    visible: bool,
    info: Option<SoldierInfo>,
}

impl SoldierInfoUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_info(&mut self, info: SoldierInfo) {
        self.info = Some(info);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn info(&self) -> Option<&SoldierInfo> {
        self.info.as_ref()
    }
}

impl UiView for SoldierInfoUi {
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

    #[test]
    fn show_records_snapshot() {
        let mut view = SoldierInfoUi::new();
        view.show_info(SoldierInfo {
            id: CharacterId(3),
            kind: SoldierKind::Captain,
            level: 4,
            hp: 90,
            weapon: Some(WeaponKind::Rocket),
        });

        assert!(view.is_visible());
        let info = view.info().unwrap();
        assert_eq!(info.id, CharacterId(3));
        assert_eq!(info.level, 4);
    }
}
