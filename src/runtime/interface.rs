//=========================================================================
// Runtime Interface
//=========================================================================
//
// Handle-to-core interface types (commands and errors).
//
// Defines the contract between UI threads holding a TransitionHandle
// and the core thread that owns the orchestrator.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::transition::{TransitionError, TransitionEvent, TransitionRequest};

//=== RuntimeCommand ======================================================

/// Commands sent from handles to the core thread.
#[derive(Debug)]
pub(crate) enum RuntimeCommand {
    /// Submit a transition; the outcome goes back on `reply`.
    Request {
        request: TransitionRequest,
        reply: Sender<Result<(), TransitionError>>,
    },

    /// Register a new event subscriber.
    Subscribe {
        reply: Sender<Receiver<TransitionEvent>>,
    },

    /// Stop the core thread.
    Shutdown,
}

//=== RuntimeError ========================================================

/// Runtime start-up and shutdown errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The OS refused to create the core thread.
    #[error("failed to spawn transition core thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// The core thread panicked before shutdown.
    #[error("transition core thread panicked")]
    WorkerPanicked,
}
