//=========================================================================
// Transition Errors
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::WorldId;

//=== TransitionError =====================================================

/// Reasons a transition was rejected or aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// A transition is already running. The running one is unaffected.
    #[error("transition to {requested} rejected: transition to {active} still in progress")]
    TransitionInProgress { active: WorldId, requested: WorldId },

    /// The target is not registered in the world catalog.
    #[error("world {0} is not registered in the world catalog")]
    UnknownWorld(WorldId),

    /// The target is registered but disabled.
    #[error("world {0} is disabled in the world catalog")]
    WorldDisabled(WorldId),

    /// The load was still preparing when the configured timeout elapsed.
    #[error("loading world {target} timed out after {waited:?}")]
    LoadTimedOut { target: WorldId, waited: Duration },

    /// The load stopped and will never finish.
    #[error("loading world {target} stopped before finishing")]
    LoadAbandoned { target: WorldId },

    /// The runtime thread driving the orchestrator is gone.
    #[error("transition runtime is not running")]
    RuntimeUnavailable,
}

//=========================================================================
// Unit Tests
//=========================================================================
