//=========================================================================
// Entity Build Pipeline
//=========================================================================
//
// Factory + builder steps + director for character creation.
//
// Flow:
//   1. Factory: recipe table lookup by kind, bare allocation
//   2. Parameter assembly: shared + kind-specific fields into a param
//   3. Builder: plain step functions that each apply one field group
//   4. Director: replays the per-category step list in the order it owns
//
// A kind with no registered recipe produces no entity: the lookup miss
// is logged and the call returns `None`, which callers must treat as
// "no entity produced" and abort the creation (steps 2-4 never run).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::units::{
    AttrStrategy, CharacterAttr, CharacterId, Enemy, EnemyKind, Soldier, SoldierKind, Vec3,
    Weapon, WeaponKind,
};

//=== Build Parameters ====================================================

/// Transient record for one soldier creation. Owned by the creation
/// call; discarded once the director has finished.
pub struct SoldierBuildParam {
    pub character: Soldier,
    pub weapon: WeaponKind,
    pub level: i32,
    pub spawn_position: Vec3,
}

/// Transient record for one enemy creation. Enemies carry an attack
/// target in addition to the shared fields.
pub struct EnemyBuildParam {
    pub character: Enemy,
    pub weapon: WeaponKind,
    pub spawn_position: Vec3,
    pub attack_position: Vec3,
}

//=== Builder Steps =======================================================
//
// Each step applies exactly one field group and knows nothing about
// ordering; sequencing belongs to the director.
//

pub type SoldierBuildStep = fn(&mut SoldierBuildParam);
pub type EnemyBuildStep = fn(&mut EnemyBuildParam);

fn soldier_attr_step(param: &mut SoldierBuildParam) {
    param
        .character
        .set_attr(CharacterAttr::new(AttrStrategy::Soldier, param.level));
}

fn soldier_weapon_step(param: &mut SoldierBuildParam) {
    param.character.set_weapon(Weapon::new(param.weapon));
}

fn soldier_transform_step(param: &mut SoldierBuildParam) {
    param.character.set_position(param.spawn_position);
}

fn enemy_attr_step(param: &mut EnemyBuildParam) {
    param
        .character
        .set_attr(CharacterAttr::new(AttrStrategy::Enemy, 1));
}

fn enemy_weapon_step(param: &mut EnemyBuildParam) {
    param.character.set_weapon(Weapon::new(param.weapon));
}

fn enemy_transform_step(param: &mut EnemyBuildParam) {
    param.character.set_position(param.spawn_position);
    param.character.set_attack_position(param.attack_position);
}

//=== BuildDirector =======================================================

/// Owns the fixed configuration order per category and replays it.
///
/// Builders stay reusable behind different orders because the sequence
/// lives here, not in the steps.
pub struct BuildDirector {
    soldier_steps: Vec<SoldierBuildStep>,
    enemy_steps: Vec<EnemyBuildStep>,
}

impl BuildDirector {
    /// Fixed order for both categories: attributes, then weapon, then
    /// spawn transform.
    pub fn new() -> Self {
        Self {
            soldier_steps: vec![soldier_attr_step, soldier_weapon_step, soldier_transform_step],
            enemy_steps: vec![enemy_attr_step, enemy_weapon_step, enemy_transform_step],
        }
    }

    pub fn construct_soldier(&self, param: &mut SoldierBuildParam) {
        for step in &self.soldier_steps {
            step(param);
        }
    }

    pub fn construct_enemy(&self, param: &mut EnemyBuildParam) {
        for step in &self.enemy_steps {
            step(param);
        }
    }
}

impl Default for BuildDirector {
    fn default() -> Self {
        Self::new()
    }
}

//=== CharacterFactory ====================================================

type SoldierRecipe = Box<dyn Fn(CharacterId) -> Soldier>;
type EnemyRecipe = Box<dyn Fn(CharacterId) -> Enemy>;

/// Creates fully-configured characters from kind enumerations.
///
/// Recipes are registered at one composition point ([`CharacterFactory::new`]);
/// lookup decides *which* character is allocated, the director decides
/// the order its configuration runs in.
pub struct CharacterFactory {
    director: BuildDirector,
    soldier_recipes: HashMap<SoldierKind, SoldierRecipe>,
    enemy_recipes: HashMap<EnemyKind, EnemyRecipe>,
    next_id: u64,
}

impl CharacterFactory {
    /// Factory with every known kind registered.
    pub fn new() -> Self {
        let mut factory = Self::empty();

        for kind in [SoldierKind::Rookie, SoldierKind::Sergeant, SoldierKind::Captain] {
            factory.register_soldier_recipe(kind, Box::new(move |id| Soldier::bare(id, kind)));
        }
        for kind in [EnemyKind::Elf, EnemyKind::Troll, EnemyKind::Ogre] {
            factory.register_enemy_recipe(kind, Box::new(move |id| Enemy::bare(id, kind)));
        }

        factory
    }

    /// Factory with no recipes. Every creation reports an unmapped kind
    /// until recipes are registered.
    pub fn empty() -> Self {
        Self {
            director: BuildDirector::new(),
            soldier_recipes: HashMap::new(),
            enemy_recipes: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn register_soldier_recipe(&mut self, kind: SoldierKind, recipe: SoldierRecipe) {
        if self.soldier_recipes.insert(kind, recipe).is_some() {
            warn!("soldier recipe for {:?} was already registered and has been replaced", kind);
        }
    }

    pub fn register_enemy_recipe(&mut self, kind: EnemyKind, recipe: EnemyRecipe) {
        if self.enemy_recipes.insert(kind, recipe).is_some() {
            warn!("enemy recipe for {:?} was already registered and has been replaced", kind);
        }
    }

    fn alloc_id(&mut self) -> CharacterId {
        self.next_id += 1;
        CharacterId(self.next_id)
    }

    //--- Creation ---------------------------------------------------------

    /// Creates a soldier of the given kind, or `None` when the kind has
    /// no recipe.
    pub fn create_soldier(
        &mut self,
        kind: SoldierKind,
        weapon: WeaponKind,
        level: i32,
        spawn_position: Vec3,
    ) -> Option<Soldier> {
        if !self.soldier_recipes.contains_key(&kind) {
            warn!("create_soldier: no recipe registered for {:?}", kind);
            return None;
        }

        let id = self.alloc_id();
        let character = self.soldier_recipes[&kind](id);

        let mut param = SoldierBuildParam {
            character,
            weapon,
            level,
            spawn_position,
        };
        self.director.construct_soldier(&mut param);

        debug!("built soldier {:?} {:?} lv{}", id, kind, level);
        Some(param.character)
    }

    /// Creates an enemy of the given kind, or `None` when the kind has
    /// no recipe.
    pub fn create_enemy(
        &mut self,
        kind: EnemyKind,
        weapon: WeaponKind,
        spawn_position: Vec3,
        attack_position: Vec3,
    ) -> Option<Enemy> {
        if !self.enemy_recipes.contains_key(&kind) {
            warn!("create_enemy: no recipe registered for {:?}", kind);
            return None;
        }

        let id = self.alloc_id();
        let character = self.enemy_recipes[&kind](id);

        let mut param = EnemyBuildParam {
            character,
            weapon,
            spawn_position,
            attack_position,
        };
        self.director.construct_enemy(&mut param);

        debug!("built enemy {:?} {:?}", id, kind);
        Some(param.character)
    }
}

impl Default for CharacterFactory {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soldier_matches_creation_inputs() {
        let mut factory = CharacterFactory::new();

        let soldier = factory
            .create_soldier(SoldierKind::Rookie, WeaponKind::Gun, 3, Vec3::ZERO)
            .expect("Rookie is registered");

        assert_eq!(soldier.kind(), SoldierKind::Rookie);
        assert_eq!(soldier.weapon().map(|w| w.kind()), Some(WeaponKind::Gun));
        assert_eq!(soldier.level(), 3);
        assert_eq!(soldier.position(), Vec3::ZERO);
        // Fully built: attributes are live, not placeholder.
        assert!(soldier.attr().max_hp() > 0);
    }

    #[test]
    fn enemy_matches_creation_inputs() {
        let mut factory = CharacterFactory::new();
        let spawn = Vec3::new(20.0, 0.0, 0.0);
        let target = Vec3::new(0.0, 0.0, -5.0);

        let enemy = factory
            .create_enemy(EnemyKind::Troll, WeaponKind::Rifle, spawn, target)
            .expect("Troll is registered");

        assert_eq!(enemy.kind(), EnemyKind::Troll);
        assert_eq!(enemy.weapon().map(|w| w.kind()), Some(WeaponKind::Rifle));
        assert_eq!(enemy.position(), spawn);
        assert_eq!(enemy.attack_position(), target);
        assert!(enemy.attr().max_hp() > 0);
    }

    #[test]
    fn unmapped_kind_returns_none_and_consumes_nothing() {
        let mut factory = CharacterFactory::empty();

        assert!(factory
            .create_soldier(SoldierKind::Captain, WeaponKind::Gun, 1, Vec3::ZERO)
            .is_none());
        assert!(factory
            .create_enemy(EnemyKind::Ogre, WeaponKind::Gun, Vec3::ZERO, Vec3::ZERO)
            .is_none());

        // The id counter only moves on successful allocation.
        factory.register_soldier_recipe(
            SoldierKind::Captain,
            Box::new(|id| Soldier::bare(id, SoldierKind::Captain)),
        );
        let soldier = factory
            .create_soldier(SoldierKind::Captain, WeaponKind::Gun, 1, Vec3::ZERO)
            .unwrap();
        assert_eq!(soldier.id(), CharacterId(1));
    }

    #[test]
    fn ids_are_unique_across_categories() {
        let mut factory = CharacterFactory::new();

        let soldier = factory
            .create_soldier(SoldierKind::Rookie, WeaponKind::Gun, 1, Vec3::ZERO)
            .unwrap();
        let enemy = factory
            .create_enemy(EnemyKind::Elf, WeaponKind::Gun, Vec3::ZERO, Vec3::ZERO)
            .unwrap();

        assert_ne!(soldier.id(), enemy.id());
    }

    #[test]
    fn director_applies_every_step() {
        let director = BuildDirector::new();
        let mut param = SoldierBuildParam {
            character: Soldier::bare(CharacterId(7), SoldierKind::Sergeant),
            weapon: WeaponKind::Rocket,
            level: 2,
            spawn_position: Vec3::new(1.0, 2.0, 3.0),
        };

        director.construct_soldier(&mut param);

        assert_eq!(param.character.level(), 2);
        assert_eq!(
            param.character.weapon().map(|w| w.kind()),
            Some(WeaponKind::Rocket)
        );
        assert_eq!(param.character.position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
