//=========================================================================
// Channel Host
//=========================================================================
//
// GameHost implementation fed by a crossbeam channel.
//
// Architecture:
//   Shell thread ──Sender<HostEvent>──> ChannelHost::pump() ──> core
//
// The shell (window loop, test driver) sends clicks, load completions,
// and the quit signal; the core consumes them at tick boundaries. The
// shell learns of outstanding load requests by polling `pending_load`.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{ClickHit, GameHost};

//=== HostEvent ===========================================================

/// Events the shell sends into the core.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// A click, already resolved to its front-to-back hit list.
    Click(Vec<ClickHit>),

    /// The outstanding scene load finished.
    SceneLoaded,

    /// The shell wants the process to exit.
    Quit,
}

//=== ChannelHost =========================================================

pub struct ChannelHost {
    receiver: Receiver<HostEvent>,
    pending_click: Option<Vec<ClickHit>>,
    pending_load: Option<String>,
    quit: bool,
}

impl ChannelHost {
    /// Creates the host and the sender half the shell keeps.
    pub fn new(capacity: usize) -> (Self, Sender<HostEvent>) {
        let (tx, rx) = bounded(capacity);
        (
            Self {
                receiver: rx,
                pending_click: None,
                pending_load: None,
                quit: false,
            },
            tx,
        )
    }

    /// Scene name the shell should be loading, if any.
    pub fn pending_load(&self) -> Option<&str> {
        self.pending_load.as_deref()
    }
}

impl GameHost for ChannelHost {
    fn pump(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(HostEvent::Click(hits)) => {
                    // One click per tick; extras are dropped, not queued.
                    if self.pending_click.is_none() {
                        self.pending_click = Some(hits);
                    } else {
                        debug!("extra click this tick dropped");
                    }
                }
                Ok(HostEvent::SceneLoaded) => {
                    if self.pending_load.take().is_none() {
                        warn!("scene-loaded signal with no outstanding load");
                    }
                }
                Ok(HostEvent::Quit) => {
                    self.quit = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // A vanished shell is a quit.
                    self.quit = true;
                    break;
                }
            }
        }
    }

    fn request_scene_load(&mut self, scene: &str) {
        info!("scene load requested: '{}'", scene);
        self.pending_load = Some(scene.to_owned());
    }

    fn is_scene_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    fn take_click(&mut self) -> Option<Vec<ClickHit>> {
        self.pending_click.take()
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::SoldierKind;

    #[test]
    fn clicks_flow_through_the_channel() {
        let (mut host, tx) = ChannelHost::new(16);

        tx.send(HostEvent::Click(vec![ClickHit::camp(SoldierKind::Rookie)]))
            .unwrap();
        host.pump();

        let hits = host.take_click().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].camp, Some(SoldierKind::Rookie));

        // Consumed: a second take yields nothing.
        assert!(host.take_click().is_none());
    }

    #[test]
    fn only_one_click_survives_per_tick() {
        let (mut host, tx) = ChannelHost::new(16);

        tx.send(HostEvent::Click(vec![ClickHit::scenery()])).unwrap();
        tx.send(HostEvent::Click(vec![ClickHit::camp(SoldierKind::Captain)]))
            .unwrap();
        host.pump();

        let hits = host.take_click().unwrap();
        assert_eq!(hits[0], ClickHit::scenery());
        assert!(host.take_click().is_none());
    }

    #[test]
    fn load_lifecycle() {
        let (mut host, tx) = ChannelHost::new(16);
        assert!(!host.is_scene_loading());

        host.request_scene_load("Battle");
        assert!(host.is_scene_loading());
        assert_eq!(host.pending_load(), Some("Battle"));

        tx.send(HostEvent::SceneLoaded).unwrap();
        host.pump();
        assert!(!host.is_scene_loading());
    }

    #[test]
    fn quit_via_event_or_disconnect() {
        let (mut host, tx) = ChannelHost::new(16);
        tx.send(HostEvent::Quit).unwrap();
        host.pump();
        assert!(host.quit_requested());

        let (mut host2, tx2) = ChannelHost::new(16);
        drop(tx2);
        host2.pump();
        assert!(host2.quit_requested());
    }
}
