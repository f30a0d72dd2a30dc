//=========================================================================
// Built-in Observers
//=========================================================================
//
// Observers the facade registers at initialize:
//
// - EnemyKilledObserver: announces kills on the status UI.
// - ComboObserver: counts kills of either side inside a tick-decayed
//   window; subscribed under both event kinds and ticked through the
//   bus's forwarded update hook.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::context::{GameCommand, GameContext};
use crate::core::events::{GameEvent, GameEventObserver, ObserverError};

//=== EnemyKilledObserver =================================================

/// Pushes a kill announcement to the status UI for every enemy death.
#[derive(Debug, Default)]
pub struct EnemyKilledObserver {
    kills_seen: u32,
}

impl EnemyKilledObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kills_seen(&self) -> u32 {
        self.kills_seen
    }
}

impl GameEventObserver for EnemyKilledObserver {
    fn on_event(&mut self, event: &GameEvent, ctx: &mut GameContext) -> Result<(), ObserverError> {
        let GameEvent::EnemyKilled { kind, .. } = event else {
            return Err(ObserverError::Failed(format!(
                "unexpected event {:?}",
                event.kind()
            )));
        };

        self.kills_seen += 1;
        ctx.commands
            .push(GameCommand::ShowMessage(format!("{:?} down", kind)));
        Ok(())
    }
}

//=== ComboObserver =======================================================

/// Window length in ticks. Each qualifying event rearms the window;
/// when it runs dry the streak resets.
const COMBO_WINDOW_TICKS: u32 = 120;

/// Streak length at which the combo is announced.
const COMBO_ANNOUNCE_AT: u32 = 3;

/// Counts kills (of either side) that land close together in time.
///
/// Registered under both `EnemyKilled` and `SoldierKilled`; since the
/// bus ticks an observer once per registration, the window burns down
/// in per-registration steps and the constant is sized for that.
#[derive(Debug, Default)]
pub struct ComboObserver {
    streak: u32,
    window: u32,
}

impl ComboObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }
}

impl GameEventObserver for ComboObserver {
    fn on_event(&mut self, _event: &GameEvent, ctx: &mut GameContext) -> Result<(), ObserverError> {
        self.streak += 1;
        self.window = COMBO_WINDOW_TICKS;

        if self.streak >= COMBO_ANNOUNCE_AT {
            ctx.commands
                .push(GameCommand::ShowMessage(format!("{} combo!", self.streak)));
        }
        Ok(())
    }

    fn update(&mut self, _ctx: &mut GameContext) {
        if self.window == 0 {
            return;
        }
        self.window -= 1;
        if self.window == 0 && self.streak > 0 {
            debug!("combo window expired at streak {}", self.streak);
            self.streak = 0;
        }
    }

    fn release(&mut self) {
        self.streak = 0;
        self.window = 0;
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{EnemyKind, SoldierKind, Vec3};

    fn killed_elf() -> GameEvent {
        GameEvent::EnemyKilled {
            kind: EnemyKind::Elf,
            position: Vec3::ZERO,
        }
    }

    #[test]
    fn enemy_killed_observer_announces() {
        let mut observer = EnemyKilledObserver::new();
        let mut ctx = GameContext::new();

        observer.on_event(&killed_elf(), &mut ctx).unwrap();

        assert_eq!(observer.kills_seen(), 1);
        assert_eq!(ctx.commands.len(), 1);
        assert!(matches!(
            ctx.commands.take()[0],
            GameCommand::ShowMessage(_)
        ));
    }

    #[test]
    fn enemy_killed_observer_rejects_wrong_kind() {
        let mut observer = EnemyKilledObserver::new();
        let mut ctx = GameContext::new();

        let wrong = GameEvent::SoldierKilled {
            kind: SoldierKind::Rookie,
            level: 1,
        };
        assert!(observer.on_event(&wrong, &mut ctx).is_err());
        assert_eq!(observer.kills_seen(), 0);
    }

    #[test]
    fn combo_announces_at_threshold() {
        let mut combo = ComboObserver::new();
        let mut ctx = GameContext::new();

        combo.on_event(&killed_elf(), &mut ctx).unwrap();
        combo.on_event(&killed_elf(), &mut ctx).unwrap();
        assert!(ctx.commands.is_empty());

        combo.on_event(&killed_elf(), &mut ctx).unwrap();
        assert_eq!(combo.streak(), 3);
        assert_eq!(ctx.commands.len(), 1);
    }

    #[test]
    fn combo_window_expires_and_resets_streak() {
        let mut combo = ComboObserver::new();
        let mut ctx = GameContext::new();

        combo.on_event(&killed_elf(), &mut ctx).unwrap();
        assert_eq!(combo.streak(), 1);

        for _ in 0..COMBO_WINDOW_TICKS {
            combo.update(&mut ctx);
        }
        assert_eq!(combo.streak(), 0);

        // A fresh kill after expiry starts a new streak.
        combo.on_event(&killed_elf(), &mut ctx).unwrap();
        assert_eq!(combo.streak(), 1);
    }

    #[test]
    fn release_clears_state() {
        let mut combo = ComboObserver::new();
        let mut ctx = GameContext::new();

        combo.on_event(&killed_elf(), &mut ctx).unwrap();
        combo.release();
        assert_eq!(combo.streak(), 0);
    }
}
