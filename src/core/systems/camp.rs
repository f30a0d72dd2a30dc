//=========================================================================
// Camp System
//=========================================================================
//
// The player's training camps: one camp per soldier archetype.
//
// A camp click shows the camp's info panel and requests a training run;
// the facade charges ability points and only then spawns the soldier.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::{GameCommand, GameContext};
use crate::core::systems::GameSystem;
use crate::core::units::{SoldierKind, Vec3, WeaponKind};

//=== CampInfo ============================================================

/// Display snapshot of a camp, shipped to the camp info UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampInfo {
    pub trains: SoldierKind,
    pub weapon: WeaponKind,
    pub position: Vec3,
    pub train_cost: i32,
    pub train_level: i32,
}

//=== Camp ================================================================

#[derive(Debug, Clone, Copy)]
struct Camp {
    trains: SoldierKind,
    weapon: WeaponKind,
    position: Vec3,
    train_cost: i32,
    train_level: i32,
}

impl Camp {
    fn info(&self) -> CampInfo {
        CampInfo {
            trains: self.trains,
            weapon: self.weapon,
            position: self.position,
            train_cost: self.train_cost,
            train_level: self.train_level,
        }
    }
}

//=== CampSystem ==========================================================

/// Owns the camp roster and turns camp clicks into training requests.
pub struct CampSystem {
    camps: Vec<Camp>,
}

impl CampSystem {
    pub fn new() -> Self {
        Self { camps: Vec::new() }
    }

    pub fn camp_count(&self) -> usize {
        self.camps.len()
    }

    pub fn camp_info(&self, kind: SoldierKind) -> Option<CampInfo> {
        self.camps.iter().find(|c| c.trains == kind).map(Camp::info)
    }

    /// Routed here by the facade when the host's hit-test lands on a
    /// camp. Shows the info panel and requests a (paid) training run.
    pub fn on_camp_clicked(&mut self, kind: SoldierKind, ctx: &mut GameContext) {
        let Some(camp) = self.camps.iter().find(|c| c.trains == kind) else {
            warn!("click on unknown camp {:?}", kind);
            return;
        };

        ctx.commands.push(GameCommand::ShowCampInfo(camp.info()));
        ctx.commands.push(GameCommand::TrainSoldier {
            kind: camp.trains,
            weapon: camp.weapon,
            level: camp.train_level,
            position: camp.position,
            cost: camp.train_cost,
        });
    }
}

impl Default for CampSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystem for CampSystem {
    fn initialize(&mut self, _ctx: &mut GameContext) {
        // Composition point for the camp roster.
        self.camps = vec![
            Camp {
                trains: SoldierKind::Rookie,
                weapon: WeaponKind::Gun,
                position: Vec3::new(-10.0, 0.0, 5.0),
                train_cost: 2,
                train_level: 1,
            },
            Camp {
                trains: SoldierKind::Sergeant,
                weapon: WeaponKind::Rifle,
                position: Vec3::new(0.0, 0.0, 5.0),
                train_cost: 4,
                train_level: 1,
            },
            Camp {
                trains: SoldierKind::Captain,
                weapon: WeaponKind::Rocket,
                position: Vec3::new(10.0, 0.0, 5.0),
                train_cost: 6,
                train_level: 1,
            },
        ];
        info!("camp system ready ({} camps)", self.camps.len());
    }

    fn release(&mut self, _ctx: &mut GameContext) {
        self.camps.clear();
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_system() -> (CampSystem, GameContext) {
        let mut system = CampSystem::new();
        let mut ctx = GameContext::new();
        system.initialize(&mut ctx);
        (system, ctx)
    }

    #[test]
    fn initialize_registers_one_camp_per_kind() {
        let (system, _ctx) = ready_system();
        assert_eq!(system.camp_count(), 3);
        assert!(system.camp_info(SoldierKind::Rookie).is_some());
        assert!(system.camp_info(SoldierKind::Sergeant).is_some());
        assert!(system.camp_info(SoldierKind::Captain).is_some());
    }

    #[test]
    fn camp_click_shows_info_and_requests_training() {
        let (mut system, mut ctx) = ready_system();

        system.on_camp_clicked(SoldierKind::Rookie, &mut ctx);

        let commands = ctx.commands.take();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], GameCommand::ShowCampInfo(info) if info.trains == SoldierKind::Rookie));
        assert!(matches!(
            commands[1],
            GameCommand::TrainSoldier {
                kind: SoldierKind::Rookie,
                weapon: WeaponKind::Gun,
                cost: 2,
                ..
            }
        ));
    }

    #[test]
    fn click_before_initialize_is_contained() {
        let mut system = CampSystem::new();
        let mut ctx = GameContext::new();

        system.on_camp_clicked(SoldierKind::Rookie, &mut ctx);
        assert!(ctx.commands.is_empty());
    }
}
