//=========================================================================
// Game Facade
//=========================================================================
//
// The single surface everything else calls.
//
// Owns every gameplay subsystem and UI view, sequences their
// initialize/update/release in one fixed order, routes host input, and
// drains the command queue subsystems use to talk across boundaries.
// No caller is ever handed a subsystem to keep; accessors lend.
//
// Architecture:
//   tick ─> update()
//            ├─ process_input()          host hit list ─> camp/soldier
//            ├─ subsystems (fixed order) push commands
//            ├─ UI views
//            └─ drain_commands()         commands ─> pass-throughs
//
// There is no global instance: the runtime driver owns one facade and
// lends it down the scene hooks.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::{GameCommand, GameContext};
use crate::core::events::observers::{ComboObserver, EnemyKilledObserver};
use crate::core::events::{EventKind, GameEvent, GameEventSystem, ObserverHandle};
use crate::core::factory::CharacterFactory;
use crate::core::save::AchievementSaveData;
use crate::core::systems::achievement::AchievementSystem;
use crate::core::systems::ap::ApSystem;
use crate::core::systems::camp::{CampInfo, CampSystem};
use crate::core::systems::character::CharacterSystem;
use crate::core::systems::stage::StageSystem;
use crate::core::systems::GameSystem;
use crate::core::ui::camp_info::CampInfoUi;
use crate::core::ui::pause::GamePauseUi;
use crate::core::ui::soldier_info::{SoldierInfo, SoldierInfoUi};
use crate::core::ui::status::GameStatusUi;
use crate::core::ui::UiView;
use crate::core::units::visitor::CharacterVisitor;
use crate::core::units::{CharacterId, Enemy, EnemyKind, Soldier, SoldierKind, Vec3, WeaponKind};
use crate::host::GameHost;

//=== Tuning ==============================================================

/// Drain passes allowed per tick before leftovers defer to the next
/// tick. Command chains are short (train -> spawn, notify -> show); a
/// longer chain means an observer is feeding the queue from itself.
const MAX_DRAIN_PASSES: u32 = 8;

const DEFAULT_SAVE_PATH: &str = "bastion_save.ron";

//=== GameFacade ==========================================================

/// Mediator and facade over the whole gameplay core.
///
/// Construction allocates and nothing more; `initialize` builds the
/// subsystems, `release` tears them down and persists progress. Every
/// pass-through null-guards so calls before `initialize` (or after
/// `release`) are no-ops instead of faults.
pub struct GameFacade {
    game_over: bool,
    save_path: PathBuf,
    context: GameContext,
    factory: Option<CharacterFactory>,

    // Subsystems, in initialization/update order.
    events: Option<GameEventSystem>,
    camp: Option<CampSystem>,
    stage: Option<StageSystem>,
    characters: Option<CharacterSystem>,
    ap: Option<ApSystem>,
    achievements: Option<AchievementSystem>,

    // UI views, updated after the subsystems.
    camp_info_ui: Option<CampInfoUi>,
    soldier_info_ui: Option<SoldierInfoUi>,
    status_ui: Option<GameStatusUi>,
    pause_ui: Option<GamePauseUi>,
}

impl GameFacade {
    pub fn new() -> Self {
        Self {
            game_over: false,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            context: GameContext::new(),
            factory: None,
            events: None,
            camp: None,
            stage: None,
            characters: None,
            ap: None,
            achievements: None,
            camp_info_ui: None,
            soldier_info_ui: None,
            status_ui: None,
            pause_ui: None,
        }
    }

    /// Where progress is persisted. Set before `initialize`.
    pub fn set_save_path(&mut self, path: impl Into<PathBuf>) {
        self.save_path = path.into();
    }

    pub fn is_initialized(&self) -> bool {
        self.events.is_some()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Builds every subsystem and UI view in the fixed order, loads
    /// persisted progress, and registers the built-in observers. Called
    /// once per game session.
    pub fn initialize(&mut self) {
        if self.is_initialized() {
            warn!("initialize called on a live session; ignoring");
            return;
        }
        info!("initializing game facade");

        self.game_over = false;
        self.factory = Some(CharacterFactory::new());

        // The bus exists before any subsystem that raises events; then
        // the subsystems in declaration order; UI views after them.
        self.events = Some(GameEventSystem::new());
        self.camp = Some(CampSystem::new());
        self.stage = Some(StageSystem::new());
        self.characters = Some(CharacterSystem::new());
        self.ap = Some(ApSystem::new());
        self.achievements = Some(AchievementSystem::new());
        self.camp_info_ui = Some(CampInfoUi::new());
        self.soldier_info_ui = Some(SoldierInfoUi::new());
        self.status_ui = Some(GameStatusUi::new());
        self.pause_ui = Some(GamePauseUi::new());

        // Initialize hooks in the same order. The stage publishes its
        // board here; that is the startup injection everything else
        // reads instead of holding a stage reference.
        if let Some(sys) = self.events.as_mut() {
            sys.initialize(&mut self.context);
        }
        if let Some(sys) = self.camp.as_mut() {
            sys.initialize(&mut self.context);
        }
        if let Some(sys) = self.stage.as_mut() {
            sys.initialize(&mut self.context);
        }
        if let Some(sys) = self.characters.as_mut() {
            sys.initialize(&mut self.context);
        }
        if let Some(sys) = self.ap.as_mut() {
            sys.initialize(&mut self.context);
        }
        if let Some(sys) = self.achievements.as_mut() {
            sys.initialize(&mut self.context);
        }

        self.load_data();
        self.register_builtin_observers();
        self.drain_commands();
    }

    fn register_builtin_observers(&mut self) {
        use std::cell::RefCell;
        use std::rc::Rc;

        let Some(events) = self.events.as_mut() else {
            return;
        };

        events.register_observer(
            EventKind::EnemyKilled,
            Rc::new(RefCell::new(EnemyKilledObserver::new())),
        );

        // The combo observer watches both sides of the fight.
        let combo: ObserverHandle = Rc::new(RefCell::new(ComboObserver::new()));
        events.register_observer(EventKind::EnemyKilled, combo.clone());
        events.register_observer(EventKind::SoldierKilled, combo);
    }

    /// Advances every owned subsystem and UI view one tick, in the same
    /// fixed order as initialization, after routing host input. No-op
    /// before `initialize`.
    pub fn update(&mut self, host: &mut dyn GameHost) {
        if !self.is_initialized() {
            return;
        }

        self.process_input(host);

        if let Some(sys) = self.events.as_mut() {
            sys.update(&mut self.context);
        }
        if let Some(sys) = self.camp.as_mut() {
            sys.update(&mut self.context);
        }
        if let Some(sys) = self.stage.as_mut() {
            sys.update(&mut self.context);
        }
        if let Some(sys) = self.characters.as_mut() {
            sys.update(&mut self.context);
        }
        if let Some(sys) = self.ap.as_mut() {
            sys.update(&mut self.context);
        }
        if let Some(sys) = self.achievements.as_mut() {
            sys.update(&mut self.context);
        }

        if let Some(ui) = self.camp_info_ui.as_mut() {
            ui.update();
        }
        if let Some(ui) = self.soldier_info_ui.as_mut() {
            ui.update();
        }
        if let Some(ui) = self.status_ui.as_mut() {
            ui.update();
        }
        if let Some(ui) = self.pause_ui.as_mut() {
            ui.update();
        }

        self.drain_commands();
    }

    /// Tears the session down: release hooks on subsystems (so they can
    /// flush) and views, progress persisted as the final step, then
    /// ownership dropped so the facade returns to its pre-initialize
    /// no-op surface.
    pub fn release(&mut self) {
        if !self.is_initialized() {
            debug!("release without a live session; nothing to do");
            return;
        }
        info!("releasing game facade");

        if let Some(sys) = self.events.as_mut() {
            sys.release(&mut self.context);
        }
        if let Some(sys) = self.camp.as_mut() {
            sys.release(&mut self.context);
        }
        if let Some(sys) = self.stage.as_mut() {
            sys.release(&mut self.context);
        }
        if let Some(sys) = self.characters.as_mut() {
            sys.release(&mut self.context);
        }
        if let Some(sys) = self.ap.as_mut() {
            sys.release(&mut self.context);
        }
        if let Some(sys) = self.achievements.as_mut() {
            sys.release(&mut self.context);
        }

        if let Some(ui) = self.camp_info_ui.as_mut() {
            ui.release();
        }
        if let Some(ui) = self.soldier_info_ui.as_mut() {
            ui.release();
        }
        if let Some(ui) = self.status_ui.as_mut() {
            ui.release();
        }
        if let Some(ui) = self.pause_ui.as_mut() {
            ui.release();
        }

        self.save_data();

        self.events = None;
        self.camp = None;
        self.stage = None;
        self.characters = None;
        self.ap = None;
        self.achievements = None;
        self.camp_info_ui = None;
        self.soldier_info_ui = None;
        self.status_ui = None;
        self.pause_ui = None;
        self.factory = None;
        self.context.commands.clear();
    }

    //--- Input Routing ----------------------------------------------------

    /// One front-to-back scan over this tick's hit list, stopping at
    /// the first actionable hit. The camp capability outranks the
    /// character capability within a single hit.
    fn process_input(&mut self, host: &mut dyn GameHost) {
        let Some(hits) = host.take_click() else {
            return;
        };

        for hit in hits {
            if let Some(kind) = hit.camp {
                if let Some(camp) = self.camp.as_mut() {
                    camp.on_camp_clicked(kind, &mut self.context);
                }
                return;
            }
            if let Some(id) = hit.soldier {
                match self.characters.as_ref().and_then(|c| c.soldier_info(id)) {
                    Some(snapshot) => self.show_soldier_info(snapshot),
                    None => warn!("click on unknown soldier {:?}", id),
                }
                return;
            }
        }
    }

    //--- Game State -------------------------------------------------------

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The only way the game-over flag is raised; the battle scene
    /// polls it to decide when to leave.
    pub fn change_to_main_menu(&mut self) {
        self.game_over = true;
    }

    //--- Entity Creation --------------------------------------------------

    /// Facade -> pipeline -> roster. `None` means the pipeline produced
    /// no entity (unmapped kind, already logged) and the roster was not
    /// touched.
    pub fn spawn_soldier(
        &mut self,
        kind: SoldierKind,
        weapon: WeaponKind,
        level: i32,
        position: Vec3,
    ) -> Option<CharacterId> {
        let soldier = self
            .factory
            .as_mut()?
            .create_soldier(kind, weapon, level, position)?;
        let id = soldier.id();
        self.add_soldier(soldier);
        Some(id)
    }

    pub fn spawn_enemy(
        &mut self,
        kind: EnemyKind,
        weapon: WeaponKind,
        position: Vec3,
        attack_position: Vec3,
    ) -> Option<CharacterId> {
        let enemy = self
            .factory
            .as_mut()?
            .create_enemy(kind, weapon, position, attack_position)?;
        let id = enemy.id();
        self.add_enemy(enemy);
        Some(id)
    }

    //--- Character Pass-throughs ------------------------------------------

    pub fn add_soldier(&mut self, soldier: Soldier) {
        if let Some(characters) = self.characters.as_mut() {
            characters.add_soldier(soldier);
        }
    }

    pub fn remove_soldier(&mut self, id: CharacterId) -> bool {
        self.characters
            .as_mut()
            .map(|c| c.remove_soldier(id))
            .unwrap_or(false)
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        if let Some(characters) = self.characters.as_mut() {
            characters.add_enemy(enemy);
        }
    }

    pub fn remove_enemy(&mut self, id: CharacterId) -> bool {
        self.characters
            .as_mut()
            .map(|c| c.remove_enemy(id))
            .unwrap_or(false)
    }

    pub fn enemy_count(&self) -> usize {
        self.characters.as_ref().map(|c| c.enemy_count()).unwrap_or(0)
    }

    pub fn soldier_count(&self) -> usize {
        self.characters
            .as_ref()
            .map(|c| c.soldier_count())
            .unwrap_or(0)
    }

    pub fn run_character_visitor(&mut self, visitor: &mut dyn CharacterVisitor) {
        if let Some(characters) = self.characters.as_mut() {
            characters.run_visitor(visitor);
        }
    }

    //--- Stage Pass-throughs ----------------------------------------------

    /// Direct kill-count bump (not routed through the event system).
    pub fn add_enemy_killed_count(&mut self) {
        if let Some(stage) = self.stage.as_mut() {
            stage.add_enemy_killed_count(&mut self.context);
        }
        if let Some(achievements) = self.achievements.as_mut() {
            achievements.record_enemy_kill();
        }
    }

    //--- Event Pass-throughs ----------------------------------------------

    pub fn register_game_event(&mut self, kind: EventKind, observer: ObserverHandle) {
        if let Some(events) = self.events.as_mut() {
            events.register_observer(kind, observer);
        }
    }

    pub fn notify_game_event(&mut self, event: &GameEvent) {
        self.dispatch_event(event);
        self.drain_commands();
    }

    fn dispatch_event(&mut self, event: &GameEvent) {
        if let Some(events) = self.events.as_ref() {
            events.notify(event, &mut self.context);
        }
    }

    //--- Ability Points ---------------------------------------------------

    pub fn cost_ability_points(&mut self, value: i32) -> bool {
        match self.ap.as_mut() {
            Some(ap) => ap.cost_ap(value, &mut self.context),
            None => false,
        }
    }

    //--- UI Pass-throughs -------------------------------------------------

    /// The camp and soldier panels are mutually exclusive.
    pub fn show_camp_info(&mut self, info: CampInfo) {
        if let Some(ui) = self.camp_info_ui.as_mut() {
            ui.show_info(info);
        }
        if let Some(ui) = self.soldier_info_ui.as_mut() {
            ui.hide();
        }
    }

    pub fn show_soldier_info(&mut self, info: SoldierInfo) {
        if let Some(ui) = self.soldier_info_ui.as_mut() {
            ui.show_info(info);
        }
        if let Some(ui) = self.camp_info_ui.as_mut() {
            ui.hide();
        }
    }

    pub fn show_stage_level(&mut self, level: i32) {
        if let Some(ui) = self.status_ui.as_mut() {
            ui.show_stage_level(level);
        }
    }

    pub fn show_message(&mut self, message: &str) {
        if let Some(ui) = self.status_ui.as_mut() {
            ui.show_message(message);
        }
    }

    pub fn show_heart(&mut self, hearts: i32) {
        if let Some(ui) = self.status_ui.as_mut() {
            ui.show_heart(hearts);
        }
        self.show_message("The base is under attack!");
    }

    pub fn toggle_pause(&mut self) {
        let Some(snapshot) = self.achievements.as_ref().map(|a| a.create_save_data()) else {
            return;
        };
        if let Some(pause) = self.pause_ui.as_mut() {
            if pause.is_visible() {
                pause.hide();
            } else {
                pause.show(snapshot);
            }
        }
    }

    //--- Accessors (lent, never owned) ------------------------------------

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn stage(&self) -> Option<&StageSystem> {
        self.stage.as_ref()
    }

    pub fn ap(&self) -> Option<&ApSystem> {
        self.ap.as_ref()
    }

    pub fn achievements(&self) -> Option<&AchievementSystem> {
        self.achievements.as_ref()
    }

    pub fn status_ui(&self) -> Option<&GameStatusUi> {
        self.status_ui.as_ref()
    }

    pub fn camp_info_ui(&self) -> Option<&CampInfoUi> {
        self.camp_info_ui.as_ref()
    }

    pub fn soldier_info_ui(&self) -> Option<&SoldierInfoUi> {
        self.soldier_info_ui.as_ref()
    }

    pub fn pause_ui(&self) -> Option<&GamePauseUi> {
        self.pause_ui.as_ref()
    }

    //--- Command Routing --------------------------------------------------

    /// Routes every queued command to its pass-through. Commands pushed
    /// while routing are handled in a following pass, bounded so a
    /// self-feeding observer cannot wedge the tick.
    fn drain_commands(&mut self) {
        let mut passes = 0;
        while !self.context.commands.is_empty() {
            passes += 1;
            if passes > MAX_DRAIN_PASSES {
                warn!(
                    "command drain exceeded {} passes; {} commands deferred",
                    MAX_DRAIN_PASSES,
                    self.context.commands.len()
                );
                break;
            }
            for command in self.context.commands.take() {
                self.apply_command(command);
            }
        }
    }

    fn apply_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::TrainSoldier {
                kind,
                weapon,
                level,
                position,
                cost,
            } => {
                if self.cost_ability_points(cost) {
                    if self.spawn_soldier(kind, weapon, level, position).is_some() {
                        if let Some(achievements) = self.achievements.as_mut() {
                            achievements.record_soldier_trained();
                        }
                    }
                } else {
                    self.show_message("Not enough ability points");
                }
            }
            GameCommand::SpawnSoldier {
                kind,
                weapon,
                level,
                position,
            } => {
                self.spawn_soldier(kind, weapon, level, position);
            }
            GameCommand::SpawnEnemy {
                kind,
                weapon,
                position,
                attack_position,
            } => {
                self.spawn_enemy(kind, weapon, position, attack_position);
            }
            GameCommand::Notify(event) => self.dispatch_event(&event),
            GameCommand::AddEnemyKilledCount => self.add_enemy_killed_count(),
            GameCommand::GainAp(value) => {
                if let Some(ap) = self.ap.as_mut() {
                    ap.gain_ap(value, &mut self.context);
                }
            }
            GameCommand::EnemyReachedBase { kind } => {
                debug!("{:?} reached the base", kind);
                if let Some(stage) = self.stage.as_mut() {
                    stage.on_base_attacked(&mut self.context);
                }
            }
            GameCommand::StageAdvanced(level) => {
                if let Some(achievements) = self.achievements.as_mut() {
                    achievements.record_stage_cleared();
                }
                self.show_stage_level(level);
                self.show_message(&format!("Stage {}", level));
            }
            GameCommand::ChangeToMainMenu => self.change_to_main_menu(),
            GameCommand::ShowCampInfo(info) => self.show_camp_info(info),
            GameCommand::ShowSoldierInfo(info) => self.show_soldier_info(info),
            GameCommand::ShowMessage(message) => self.show_message(&message),
            GameCommand::ShowHeart(hearts) => self.show_heart(hearts),
            GameCommand::ShowAp(ap) => {
                if let Some(ui) = self.status_ui.as_mut() {
                    ui.show_ap(ap);
                }
            }
            GameCommand::ShowStageLevel(level) => self.show_stage_level(level),
        }
    }

    //--- Persistence ------------------------------------------------------

    fn save_data(&self) {
        let Some(achievements) = self.achievements.as_ref() else {
            return;
        };
        let data = achievements.create_save_data();
        match data.save(&self.save_path) {
            Ok(()) => info!("progress saved to {}", self.save_path.display()),
            Err(e) => warn!("progress not saved: {}", e),
        }
    }

    fn load_data(&mut self) {
        match AchievementSaveData::load(&self.save_path) {
            Ok(data) => {
                info!("progress loaded from {}", self.save_path.display());
                if let Some(achievements) = self.achievements.as_mut() {
                    achievements.set_save_data(&data);
                }
            }
            Err(e) => info!("starting fresh ({})", e),
        }
    }
}

impl Default for GameFacade {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
