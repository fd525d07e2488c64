//=========================================================================
// Registry Events
//=========================================================================
//
// Change notifications fanned out to observers over bounded channels.
//
// Architecture:
//   register()/unregister()/clear() → publish() → Sender (per subscriber)
//                                                     ↓
//                                   Receiver<RegistryEvent> (any thread)
//
// Publishing never blocks the registry thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::InstanceId;

//=== RegistryEvent =======================================================

/// Membership change in a [`super::ScoreRegistry`].
///
/// Only effective changes are published: idempotent registers and
/// unregisters of absent instances produce nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An instance joined the registry.
    Registered {
        id: InstanceId,
        group: Option<String>,
    },

    /// An instance left the registry.
    Unregistered {
        id: InstanceId,
        group: Option<String>,
    },

    /// The registry was torn down; `removed` instances were dropped.
    Cleared { removed: usize },
}

//=== EventFanout =========================================================

/// Set of live subscriber channels.
#[derive(Debug, Default)]
pub(super) struct EventFanout {
    subscribers: Vec<Sender<RegistryEvent>>,
}

impl EventFanout {
    pub(super) fn new() -> Self {
        Self { subscribers: Vec::new() }
    }

    /// Opens a new bounded subscription.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub(super) fn subscribe(&mut self, capacity: usize) -> Receiver<RegistryEvent> {
        assert!(capacity > 0, "Event capacity must be positive");
        let (tx, rx) = bounded(capacity);
        self.subscribers.push(tx);
        rx
    }

    pub(super) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sends `event` to every subscriber without blocking.
    ///
    /// Full channels lose the event; disconnected ones are dropped.
    pub(super) fn publish(&mut self, event: RegistryEvent) {
        if self.subscribers.is_empty() {
            return;
        }

        self.subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                warn!(target: "scores", "Subscriber channel full, dropping {:?}", dropped);
                true
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!(target: "scores", "Subscriber disconnected, removing");
                false
            }
        });
    }
}

//=========================================================================
// Tests
//=========================================================================
