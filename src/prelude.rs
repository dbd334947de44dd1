//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_transit::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::runtime::{Runtime, RuntimeBuilder, RuntimeError, RuntimeHandle, TransitionHandle};

// Clock
pub use crate::core::clock::{Clock, ManualClock, SystemClock};

// Collaborators
pub use crate::core::collaborators::{
    LifecycleController, LoadingPresentation, PersistenceService, ThreadedWorldLoader,
    WorldLoadHandle, WorldLoader,
};

// Transition system
pub use crate::core::transition::{
    transition_without_orchestrator, SlotIndex, TransitionConfig, TransitionError,
    TransitionEvent, TransitionOrchestrator, TransitionRequest, TransitionState, WorldCatalog,
    WorldId,
};
