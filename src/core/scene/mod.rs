//=========================================================================
// Scene State Machine
//=========================================================================
//
// Drives the top-level game flow through one active state at a time.
//
// Architecture:
//   tick() ─── host loading? ──yes──> return (full suspension)
//      │no
//      ├─ first tick since set_state ──> on_begin (exactly once)
//      ├─ on_update ──> SceneDirective
//      └─ Switch? ──> set_state: load request, on_end(old), swap
//
// Transitions are requested by the active state itself through its
// update return value; there is no central transition table, and the
// set of states is open for extension.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::facade::GameFacade;
use crate::host::GameHost;

//=== Module Declarations =================================================

pub mod flow;

//=== SceneDirective ======================================================

/// A state's answer to "what happens next".
pub enum SceneDirective {
    /// Remain in the current state.
    Stay,

    /// Hand off to `state`, first asking the host to load `scene`.
    /// An empty scene name performs the handoff without a load.
    Switch {
        state: Box<dyn SceneState>,
        scene: String,
    },
}

impl SceneDirective {
    pub fn switch(state: impl SceneState + 'static, scene: &str) -> Self {
        Self::Switch {
            state: Box::new(state),
            scene: scene.to_owned(),
        }
    }
}

//=== SceneState ==========================================================

/// A phase of the top-level game flow.
///
/// Lifecycle per activation: `on_begin` exactly once, `on_update` every
/// non-loading tick, `on_end` when the next state takes over. Only
/// `on_update` is required.
pub trait SceneState {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Called on the first tick after this state becomes active.
    fn on_begin(&mut self, _game: &mut GameFacade, _host: &mut dyn GameHost) {}

    /// Called every tick while active; the returned directive decides
    /// the transition.
    fn on_update(&mut self, game: &mut GameFacade, host: &mut dyn GameHost) -> SceneDirective;

    /// Called when this state is replaced. Runs to completion before
    /// the incoming state's `on_begin`.
    fn on_end(&mut self, _game: &mut GameFacade) {}
}

//=== SceneStateMachine ===================================================

/// Holds the single active scene state and runs its lifecycle.
pub struct SceneStateMachine {
    state: Option<Box<dyn SceneState>>,
    begun: bool,
}

impl SceneStateMachine {
    pub fn new() -> Self {
        Self {
            state: None,
            begun: false,
        }
    }

    /// Name of the active state, if one is set.
    pub fn state_name(&self) -> Option<&'static str> {
        self.state.as_ref().map(|s| s.name())
    }

    /// Installs a new active state.
    ///
    /// A non-empty `scene` issues the host load request first; the
    /// outgoing state's `on_end` then runs to completion, and the new
    /// state is marked not-yet-begun regardless of the load outcome.
    pub fn set_state(
        &mut self,
        state: Box<dyn SceneState>,
        scene: &str,
        game: &mut GameFacade,
        host: &mut dyn GameHost,
    ) {
        self.begun = false;

        if !scene.is_empty() {
            host.request_scene_load(scene);
        }

        if let Some(outgoing) = self.state.as_mut() {
            outgoing.on_end(game);
        }

        debug!("scene state -> {}", state.name());
        self.state = Some(state);
    }

    /// One frame of the flow. Fully suspended while the host reports a
    /// load in progress: no state callback fires.
    pub fn tick(&mut self, game: &mut GameFacade, host: &mut dyn GameHost) {
        if host.is_scene_loading() {
            return;
        }

        let directive = {
            let Some(state) = self.state.as_mut() else {
                return;
            };

            if !self.begun {
                self.begun = true;
                state.on_begin(game, host);
            }

            state.on_update(game, host)
        };

        if let SceneDirective::Switch { state, scene } = directive {
            self.set_state(state, &scene, game, host);
        }
    }
}

impl Default for SceneStateMachine {
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
    use crate::host::ChannelHost;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// State that journals every lifecycle call; optionally switches to
    /// a successor on its first update.
    struct Probe {
        tag: &'static str,
        journal: Rc<RefCell<Vec<String>>>,
        next: Option<&'static str>,
    }

    impl Probe {
        fn new(tag: &'static str, journal: Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                tag,
                journal,
                next: None,
            }
        }

        fn switching_to(tag: &'static str, next: &'static str, journal: Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                tag,
                journal,
                next: Some(next),
            }
        }

        fn log(&self, hook: &str) {
            self.journal.borrow_mut().push(format!("{}:{}", self.tag, hook));
        }
    }

    impl SceneState for Probe {
        fn name(&self) -> &'static str {
            self.tag
        }

        fn on_begin(&mut self, _: &mut GameFacade, _: &mut dyn GameHost) {
            self.log("begin");
        }

        fn on_update(&mut self, _: &mut GameFacade, _: &mut dyn GameHost) -> SceneDirective {
            self.log("update");
            if let Some(next) = self.next.take() {
                return SceneDirective::switch(Probe::new(next, self.journal.clone()), "");
            }
            SceneDirective::Stay
        }

        fn on_end(&mut self, _: &mut GameFacade) {
            self.log("end");
        }
    }

    fn rig() -> (GameFacade, ChannelHost, SceneStateMachine, Rc<RefCell<Vec<String>>>) {
        let (host, _tx) = ChannelHost::new(8);
        (
            GameFacade::new(),
            host,
            SceneStateMachine::new(),
            Rc::new(RefCell::new(Vec::new())),
        )
    }

    #[test]
    fn begin_runs_once_then_update_every_tick() {
        let (mut game, mut host, mut machine, journal) = rig();

        machine.set_state(
            Box::new(Probe::new("B", journal.clone())),
            "",
            &mut game,
            &mut host,
        );

        machine.tick(&mut game, &mut host);
        machine.tick(&mut game, &mut host);

        assert_eq!(
            *journal.borrow(),
            vec!["B:begin", "B:update", "B:update"],
            "first tick begins then updates; later ticks only update"
        );
    }

    #[test]
    fn outgoing_end_completes_before_incoming_begin() {
        let (mut game, mut host, mut machine, journal) = rig();

        machine.set_state(
            Box::new(Probe::switching_to("A", "B", journal.clone())),
            "",
            &mut game,
            &mut host,
        );

        machine.tick(&mut game, &mut host); // A begins, updates, requests switch
        machine.tick(&mut game, &mut host); // B begins

        let log = journal.borrow();
        let end_a = log.iter().position(|e| e == "A:end").unwrap();
        let begin_b = log.iter().position(|e| e == "B:begin").unwrap();
        assert!(end_a < begin_b);
        assert_eq!(machine.state_name(), Some("B"));
    }

    #[test]
    fn no_callback_fires_while_the_host_is_loading() {
        let (mut game, mut host, mut machine, journal) = rig();

        machine.set_state(
            Box::new(Probe::new("A", journal.clone())),
            "Battle",
            &mut game,
            &mut host,
        );
        assert!(host.is_scene_loading());

        machine.tick(&mut game, &mut host);
        machine.tick(&mut game, &mut host);
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn empty_scene_name_skips_the_load_request() {
        let (mut game, mut host, mut machine, journal) = rig();

        machine.set_state(
            Box::new(Probe::new("A", journal.clone())),
            "",
            &mut game,
            &mut host,
        );

        assert!(!host.is_scene_loading());
        machine.tick(&mut game, &mut host);
        assert_eq!(*journal.borrow(), vec!["A:begin", "A:update"]);
    }

    #[test]
    fn replacing_a_state_resets_the_begun_flag() {
        let (mut game, mut host, mut machine, journal) = rig();

        machine.set_state(
            Box::new(Probe::new("A", journal.clone())),
            "",
            &mut game,
            &mut host,
        );
        machine.tick(&mut game, &mut host);

        machine.set_state(
            Box::new(Probe::new("B", journal.clone())),
            "",
            &mut game,
            &mut host,
        );
        machine.tick(&mut game, &mut host);

        assert_eq!(
            *journal.borrow(),
            vec!["A:begin", "A:update", "A:end", "B:begin", "B:update"]
        );
    }

    #[test]
    fn tick_with_no_state_is_a_noop() {
        let (mut game, mut host, mut machine, _journal) = rig();
        machine.tick(&mut game, &mut host);
        assert_eq!(machine.state_name(), None);
    }
}
