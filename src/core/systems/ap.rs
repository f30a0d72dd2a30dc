//=========================================================================
// Ability Point System
//=========================================================================
//
// The player's action-point pool: training and abilities spend from it,
// kills pay into it. Every change ships the new total to the status UI.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::context::{GameCommand, GameContext};
use crate::core::systems::GameSystem;

//=== Tuning ==============================================================

/// Pool at session start.
const STARTING_AP: i32 = 10;

//=== ApSystem ============================================================

pub struct ApSystem {
    ap: i32,
}

impl ApSystem {
    pub fn new() -> Self {
        Self { ap: 0 }
    }

    pub fn current_ap(&self) -> i32 {
        self.ap
    }

    /// Deducts `value` if the pool covers it. Returns whether the spend
    /// happened; the pool never goes negative.
    pub fn cost_ap(&mut self, value: i32, ctx: &mut GameContext) -> bool {
        if value > self.ap {
            debug!("ap spend of {} refused (pool {})", value, self.ap);
            return false;
        }
        self.ap -= value;
        ctx.commands.push(GameCommand::ShowAp(self.ap));
        true
    }

    pub fn gain_ap(&mut self, value: i32, ctx: &mut GameContext) {
        self.ap += value;
        ctx.commands.push(GameCommand::ShowAp(self.ap));
    }
}

impl Default for ApSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystem for ApSystem {
    fn initialize(&mut self, ctx: &mut GameContext) {
        self.ap = STARTING_AP;
        ctx.commands.push(GameCommand::ShowAp(self.ap));
        info!("ap system ready (pool {})", self.ap);
    }

    fn release(&mut self, _ctx: &mut GameContext) {
        self.ap = 0;
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_succeeds_within_pool() {
        let mut system = ApSystem::new();
        let mut ctx = GameContext::new();
        system.initialize(&mut ctx);
        ctx.commands.clear();

        assert!(system.cost_ap(4, &mut ctx));
        assert_eq!(system.current_ap(), STARTING_AP - 4);
        assert!(ctx.commands.take().contains(&GameCommand::ShowAp(STARTING_AP - 4)));
    }

    #[test]
    fn cost_beyond_pool_is_refused() {
        let mut system = ApSystem::new();
        let mut ctx = GameContext::new();
        system.initialize(&mut ctx);
        ctx.commands.clear();

        assert!(!system.cost_ap(STARTING_AP + 1, &mut ctx));
        assert_eq!(system.current_ap(), STARTING_AP);
        // A refused spend shows nothing.
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn gains_accumulate() {
        let mut system = ApSystem::new();
        let mut ctx = GameContext::new();
        system.initialize(&mut ctx);

        system.gain_ap(3, &mut ctx);
        assert_eq!(system.current_ap(), STARTING_AP + 3);
    }
}
