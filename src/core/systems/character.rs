//=========================================================================
// Character System
//=========================================================================
//
// Roster of every live soldier and enemy.
//
// The pipeline hands fully-built characters here; the roster owns them
// until explicit removal or until the per-tick reap notices they died
// or (for enemies) reached the base. Combat math itself lives outside
// the core and arrives through the visitor seam.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::context::{GameCommand, GameContext};
use crate::core::events::GameEvent;
use crate::core::systems::GameSystem;
use crate::core::ui::soldier_info::SoldierInfo;
use crate::core::units::visitor::CharacterVisitor;
use crate::core::units::{CharacterId, Enemy, Soldier};

//=== CharacterSystem =====================================================

pub struct CharacterSystem {
    soldiers: Vec<Soldier>,
    enemies: Vec<Enemy>,
}

impl CharacterSystem {
    pub fn new() -> Self {
        Self {
            soldiers: Vec::new(),
            enemies: Vec::new(),
        }
    }

    //--- Roster -----------------------------------------------------------

    pub fn add_soldier(&mut self, soldier: Soldier) {
        debug!("roster: +soldier {:?} {:?}", soldier.id(), soldier.kind());
        self.soldiers.push(soldier);
    }

    pub fn remove_soldier(&mut self, id: CharacterId) -> bool {
        let before = self.soldiers.len();
        self.soldiers.retain(|s| s.id() != id);
        before != self.soldiers.len()
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        debug!("roster: +enemy {:?} {:?}", enemy.id(), enemy.kind());
        self.enemies.push(enemy);
    }

    pub fn remove_enemy(&mut self, id: CharacterId) -> bool {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.id() != id);
        before != self.enemies.len()
    }

    pub fn soldier_count(&self) -> usize {
        self.soldiers.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn soldier(&self, id: CharacterId) -> Option<&Soldier> {
        self.soldiers.iter().find(|s| s.id() == id)
    }

    pub fn soldier_info(&self, id: CharacterId) -> Option<SoldierInfo> {
        self.soldier(id).map(|s| SoldierInfo {
            id: s.id(),
            kind: s.kind(),
            level: s.level(),
            hp: s.attr().hp(),
            weapon: s.weapon().map(|w| w.kind()),
        })
    }

    //--- Visitor ----------------------------------------------------------

    /// Runs a visitor over every soldier, then every enemy. Mutable
    /// access so external combat collaborators can apply damage.
    pub fn run_visitor(&mut self, visitor: &mut dyn CharacterVisitor) {
        for soldier in &mut self.soldiers {
            visitor.visit_soldier(soldier);
        }
        for enemy in &mut self.enemies {
            visitor.visit_enemy(enemy);
        }
    }
}

impl Default for CharacterSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystem for CharacterSystem {
    /// Per-tick plumbing: reap the dead, march enemies, detect arrivals.
    fn update(&mut self, ctx: &mut GameContext) {
        // Soldiers: reap deaths.
        let mut i = 0;
        while i < self.soldiers.len() {
            if self.soldiers[i].attr().is_dead() {
                let fallen = self.soldiers.remove(i);
                ctx.commands.push(GameCommand::Notify(GameEvent::SoldierKilled {
                    kind: fallen.kind(),
                    level: fallen.level(),
                }));
            } else {
                i += 1;
            }
        }

        // Enemies: reap deaths, then march survivors and catch arrivals.
        let mut i = 0;
        while i < self.enemies.len() {
            if self.enemies[i].attr().is_dead() {
                let slain = self.enemies.remove(i);
                ctx.commands.push(GameCommand::Notify(GameEvent::EnemyKilled {
                    kind: slain.kind(),
                    position: slain.position(),
                }));
                ctx.commands.push(GameCommand::AddEnemyKilledCount);
                ctx.commands.push(GameCommand::GainAp(slain.kind().ap_reward()));
                continue;
            }

            self.enemies[i].advance();
            if self.enemies[i].has_reached_target() {
                let arrived = self.enemies.remove(i);
                ctx.commands.push(GameCommand::EnemyReachedBase {
                    kind: arrived.kind(),
                });
                continue;
            }

            i += 1;
        }
    }

    fn release(&mut self, _ctx: &mut GameContext) {
        info!(
            "character roster released ({} soldiers, {} enemies)",
            self.soldiers.len(),
            self.enemies.len()
        );
        self.soldiers.clear();
        self.enemies.clear();
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory::CharacterFactory;
    use crate::core::units::visitor::{AreaDamageVisitor, RosterCountVisitor};
    use crate::core::units::{EnemyKind, SoldierKind, Vec3, WeaponKind};

    fn spawn_enemy(factory: &mut CharacterFactory, from: Vec3, to: Vec3) -> Enemy {
        factory
            .create_enemy(EnemyKind::Elf, WeaponKind::Gun, from, to)
            .unwrap()
    }

    #[test]
    fn roster_add_remove_and_counts() {
        let mut factory = CharacterFactory::new();
        let mut system = CharacterSystem::new();

        let soldier = factory
            .create_soldier(SoldierKind::Rookie, WeaponKind::Gun, 1, Vec3::ZERO)
            .unwrap();
        let soldier_id = soldier.id();
        system.add_soldier(soldier);

        let enemy = spawn_enemy(&mut factory, Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO);
        let enemy_id = enemy.id();
        system.add_enemy(enemy);

        assert_eq!(system.soldier_count(), 1);
        assert_eq!(system.enemy_count(), 1);

        assert!(system.remove_soldier(soldier_id));
        assert!(!system.remove_soldier(soldier_id));
        assert!(system.remove_enemy(enemy_id));
        assert_eq!(system.soldier_count(), 0);
        assert_eq!(system.enemy_count(), 0);
    }

    #[test]
    fn visitor_walks_the_whole_roster() {
        let mut factory = CharacterFactory::new();
        let mut system = CharacterSystem::new();

        system.add_soldier(
            factory
                .create_soldier(SoldierKind::Captain, WeaponKind::Rocket, 2, Vec3::ZERO)
                .unwrap(),
        );
        system.add_enemy(spawn_enemy(&mut factory, Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO));

        let mut counter = RosterCountVisitor::default();
        system.run_visitor(&mut counter);
        assert_eq!(counter.soldiers, 1);
        assert_eq!(counter.enemies, 1);
    }

    #[test]
    fn dead_enemy_is_reaped_with_kill_bookkeeping() {
        let mut factory = CharacterFactory::new();
        let mut system = CharacterSystem::new();
        let mut ctx = GameContext::new();

        let at = Vec3::new(3.0, 0.0, 0.0);
        system.add_enemy(spawn_enemy(&mut factory, at, Vec3::new(100.0, 0.0, 0.0)));

        // External combat collaborator deals lethal damage.
        let mut blast = AreaDamageVisitor::new(at, 5.0, 10_000);
        system.run_visitor(&mut blast);
        assert_eq!(blast.hits, 1);

        system.update(&mut ctx);
        assert_eq!(system.enemy_count(), 0);

        let commands = ctx.commands.take();
        assert!(commands.iter().any(|c| matches!(
            c,
            GameCommand::Notify(GameEvent::EnemyKilled { kind: EnemyKind::Elf, .. })
        )));
        assert!(commands.contains(&GameCommand::AddEnemyKilledCount));
        assert!(commands.contains(&GameCommand::GainAp(EnemyKind::Elf.ap_reward())));
    }

    #[test]
    fn enemy_reaching_base_is_reported_not_killed() {
        let mut factory = CharacterFactory::new();
        let mut system = CharacterSystem::new();
        let mut ctx = GameContext::new();

        // One Elf step away from the base.
        system.add_enemy(spawn_enemy(&mut factory, Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO));

        system.update(&mut ctx);
        assert_eq!(system.enemy_count(), 0);

        let commands = ctx.commands.take();
        assert!(commands.contains(&GameCommand::EnemyReachedBase { kind: EnemyKind::Elf }));
        assert!(!commands.contains(&GameCommand::AddEnemyKilledCount));
    }

    #[test]
    fn dead_soldier_raises_soldier_killed() {
        let mut factory = CharacterFactory::new();
        let mut system = CharacterSystem::new();
        let mut ctx = GameContext::new();

        let mut soldier = factory
            .create_soldier(SoldierKind::Rookie, WeaponKind::Gun, 2, Vec3::ZERO)
            .unwrap();
        soldier.attr_mut().take_damage(10_000);
        system.add_soldier(soldier);

        system.update(&mut ctx);
        assert_eq!(system.soldier_count(), 0);

        let commands = ctx.commands.take();
        assert!(commands.iter().any(|c| matches!(
            c,
            GameCommand::Notify(GameEvent::SoldierKilled { kind: SoldierKind::Rookie, level: 2 })
        )));
    }

    #[test]
    fn soldier_info_snapshot() {
        let mut factory = CharacterFactory::new();
        let mut system = CharacterSystem::new();

        let soldier = factory
            .create_soldier(SoldierKind::Sergeant, WeaponKind::Rifle, 3, Vec3::ZERO)
            .unwrap();
        let id = soldier.id();
        system.add_soldier(soldier);

        let info = system.soldier_info(id).unwrap();
        assert_eq!(info.kind, SoldierKind::Sergeant);
        assert_eq!(info.level, 3);
        assert_eq!(info.weapon, Some(WeaponKind::Rifle));

        assert!(system.soldier_info(CharacterId(9999)).is_none());
    }
}
