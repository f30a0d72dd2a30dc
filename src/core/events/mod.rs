//=========================================================================
// Game Event System
//=========================================================================
//
// Publish/subscribe bus decoupling event producers from consumers.
//
// Architecture:
//   notify(event) ──> observers[event.kind()] ──> on_event() in
//                                                 registration order
//
// Dispatch is synchronous and fully ordered: `notify` returns only after
// every subscriber for the kind has been invoked. A faulting subscriber
// is logged and skipped; the rest of the dispatch still runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, error, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::systems::GameSystem;
use crate::core::units::{EnemyKind, SoldierKind, Vec3};

//=== Module Declarations =================================================

pub mod observers;

//=== GameEvent ===========================================================

/// A game occurrence. Closed set; the payload shape is fixed per kind
/// and interpreted only by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemyKilled { kind: EnemyKind, position: Vec3 },
    SoldierKilled { kind: SoldierKind, level: i32 },
}

/// Discriminant tag for event kinds, used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    EnemyKilled,
    SoldierKilled,
}

impl GameEvent {
    /// Get the discriminant kind for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::EnemyKilled { .. } => EventKind::EnemyKilled,
            GameEvent::SoldierKilled { .. } => EventKind::SoldierKilled,
        }
    }
}

//=== ObserverError =======================================================

/// Failure reported by a single observer during dispatch. Contained at
/// the bus: logged, never propagated to the caller of `notify`.
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("observer failed: {0}")]
    Failed(String),
}

//=== GameEventObserver ===================================================

/// Subscriber interface.
///
/// `on_event` runs synchronously inside `notify`. The lifecycle hooks
/// exist for observers that need periodic ticking or cleanup (e.g. a
/// combo counter with its own timeout); both default to no-ops.
pub trait GameEventObserver {
    fn on_event(&mut self, event: &GameEvent, ctx: &mut GameContext) -> Result<(), ObserverError>;

    fn update(&mut self, _ctx: &mut GameContext) {}

    fn release(&mut self) {}
}

/// Shared handle to an observer. One handle may be registered under
/// several kinds; the single-threaded core makes `Rc<RefCell>` the right
/// ownership shape.
pub type ObserverHandle = Rc<RefCell<dyn GameEventObserver>>;

//=== GameEventSystem =====================================================

/// Registry of (event kind → ordered subscriber list) plus the dispatch
/// loop. Insertion order is notification order within a kind.
pub struct GameEventSystem {
    observers: HashMap<EventKind, Vec<ObserverHandle>>,
}

impl GameEventSystem {
    pub fn new() -> Self {
        Self {
            observers: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Appends an observer to the kind's subscriber list.
    ///
    /// Registering the same handle twice for the same kind is permitted
    /// and causes duplicate notification; avoiding that is the caller's
    /// responsibility.
    pub fn register_observer(&mut self, kind: EventKind, observer: ObserverHandle) {
        self.observers.entry(kind).or_default().push(observer);
        debug!(
            "registered observer for {:?} ({} now subscribed)",
            kind,
            self.observer_count(kind)
        );
    }

    /// Number of subscribers for a kind.
    pub fn observer_count(&self, kind: EventKind) -> usize {
        self.observers.get(&kind).map(|list| list.len()).unwrap_or(0)
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes every subscriber registered for the event's kind, in
    /// registration order. A kind with zero subscribers is a no-op.
    ///
    /// Failure containment: an observer returning `Err` (or a handle
    /// whose cell is already borrowed, which counts as faulted for this
    /// dispatch) is logged and skipped; the remaining subscribers still
    /// run.
    pub fn notify(&self, event: &GameEvent, ctx: &mut GameContext) {
        let Some(list) = self.observers.get(&event.kind()) else {
            return;
        };

        for handle in list {
            match handle.try_borrow_mut() {
                Ok(mut observer) => {
                    if let Err(e) = observer.on_event(event, ctx) {
                        error!("observer fault during {:?} dispatch: {}", event.kind(), e);
                    }
                }
                Err(_) => {
                    warn!(
                        "observer busy during {:?} dispatch; skipped",
                        event.kind()
                    );
                }
            }
        }
    }
}

impl Default for GameEventSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=== Lifecycle ===========================================================
//
// The bus itself is a subsystem: its update/release forward to every
// registered handle. An observer registered under several kinds is
// ticked once per registration.
//
impl GameSystem for GameEventSystem {
    fn update(&mut self, ctx: &mut GameContext) {
        for list in self.observers.values() {
            for handle in list {
                if let Ok(mut observer) = handle.try_borrow_mut() {
                    observer.update(ctx);
                }
            }
        }
    }

    fn release(&mut self, _ctx: &mut GameContext) {
        for list in self.observers.values() {
            for handle in list {
                if let Ok(mut observer) = handle.try_borrow_mut() {
                    observer.release();
                }
            }
        }
        self.observers.clear();
    }
}

//=========================================================================
// Tests
//=========================================================================
