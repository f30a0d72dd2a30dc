//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use bastion_core::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime driver
pub use crate::{GameLoop, GameLoopBuilder};

// Facade and shared context
pub use crate::core::context::{GameCommand, GameContext, StageBoard};
pub use crate::core::facade::GameFacade;

// Scene flow
pub use crate::core::scene::flow::{BattleState, MainMenuState, StartState};
pub use crate::core::scene::{SceneDirective, SceneState, SceneStateMachine};

// Events
pub use crate::core::events::{
    EventKind, GameEvent, GameEventObserver, GameEventSystem, ObserverError, ObserverHandle,
};

// Character pipeline and data model
pub use crate::core::factory::{BuildDirector, CharacterFactory, EnemyBuildParam, SoldierBuildParam};
pub use crate::core::units::visitor::{AreaDamageVisitor, CharacterVisitor, RosterCountVisitor};
pub use crate::core::units::{
    AttrStrategy, CharacterAttr, CharacterId, Enemy, EnemyKind, Soldier, SoldierKind, Vec3,
    Weapon, WeaponKind,
};

// Subsystem lifecycle and command payloads
pub use crate::core::systems::camp::CampInfo;
pub use crate::core::systems::GameSystem;
pub use crate::core::ui::soldier_info::SoldierInfo;

// Persistence
pub use crate::core::save::{AchievementSaveData, SaveError};

// Host bridge
pub use crate::host::{ChannelHost, ClickHit, GameHost, HostEvent};
