//=========================================================================
// Character Visitor
//=========================================================================
//
// Traversal seam over the full character roster.
//
// External collaborators (combat resolution, statistics, debugging
// tools) implement this trait and run over every soldier and enemy via
// the facade's `run_character_visitor`. Access is mutable so a combat
// collaborator can apply damage without the roster exposing its storage.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Enemy, Soldier, Vec3};

//=== CharacterVisitor ====================================================

/// Visitor over the character roster. Both hooks default to no-ops so an
/// implementation can care about a single category.
pub trait CharacterVisitor {
    fn visit_soldier(&mut self, _soldier: &mut Soldier) {}

    fn visit_enemy(&mut self, _enemy: &mut Enemy) {}
}

//=== RosterCountVisitor ==================================================

/// Counts characters per category.
#[derive(Debug, Default)]
pub struct RosterCountVisitor {
    pub soldiers: usize,
    pub enemies: usize,
}

impl CharacterVisitor for RosterCountVisitor {
    fn visit_soldier(&mut self, _soldier: &mut Soldier) {
        self.soldiers += 1;
    }

    fn visit_enemy(&mut self, _enemy: &mut Enemy) {
        self.enemies += 1;
    }
}

//=== AreaDamageVisitor ===================================================

/// Applies damage to every enemy within a radius of a center point.
///
/// This is the shape a combat collaborator takes: the core does not own
/// damage formulas, it only offers the traversal.
#[derive(Debug)]
pub struct AreaDamageVisitor {
    center: Vec3,
    radius: f32,
    damage: i32,
    pub hits: usize,
}

impl AreaDamageVisitor {
    pub fn new(center: Vec3, radius: f32, damage: i32) -> Self {
        Self {
            center,
            radius,
            damage,
            hits: 0,
        }
    }
}

impl CharacterVisitor for AreaDamageVisitor {
    fn visit_enemy(&mut self, enemy: &mut Enemy) {
        if enemy.position().distance_to(self.center) <= self.radius {
            enemy.attr_mut().take_damage(self.damage);
            self.hits += 1;
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
