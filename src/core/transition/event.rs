//=========================================================================
// Transition Events
//=========================================================================
//
// Observer events published by the orchestrator.
//
// Architecture:
//   Orchestrator → EventHub::emit() → Sender<TransitionEvent> (one per subscriber)
//                                          ↓
//   UI guards, menus ←──────────── Receiver<TransitionEvent>
//
// Per accepted transition the sequence is:
//   LoadStarted → Progress* → (LoadCompleted | LoadFailed)
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

//=== Internal Dependencies ===============================================

use super::{TransitionError, WorldId};

//=== TransitionEvent =====================================================

/// Event published while a transition runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionEvent {
    /// A request was accepted. Always the first event of a transition.
    LoadStarted { target: WorldId },

    /// The displayed progress changed. `fraction` is normalized to `[0, 1]`.
    Progress { target: WorldId, fraction: f32 },

    /// The new world is active and saved state (if any) applied.
    LoadCompleted { target: WorldId },

    /// The transition was aborted. Terminal, replaces `LoadCompleted`.
    LoadFailed { target: WorldId, error: TransitionError },
}

impl TransitionEvent {
    /// World the event belongs to.
    pub fn target(&self) -> &WorldId {
        match self {
            Self::LoadStarted { target }
            | Self::Progress { target, .. }
            | Self::LoadCompleted { target }
            | Self::LoadFailed { target, .. } => target,
        }
    }

    /// True for the event that ends a transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::LoadCompleted { .. } | Self::LoadFailed { .. })
    }
}

//=== EventHub ============================================================

/// Fan-out of transition events to any number of subscribers.
///
/// Each subscriber owns an unbounded channel. Dropped receivers are pruned
/// on the next emit.
#[derive(Debug, Default)]
pub(crate) struct EventHub {
    subscribers: Vec<Sender<TransitionEvent>>,
}

impl EventHub {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&mut self) -> Receiver<TransitionEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub(crate) fn emit(&mut self, event: TransitionEvent) {
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());

        let pruned = before - self.subscribers.len();
        if pruned > 0 {
            debug!("Pruned {} disconnected transition subscriber(s)", pruned);
        }
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
