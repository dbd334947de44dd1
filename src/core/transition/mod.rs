//=========================================================================
// Transition System
//=========================================================================
//
// Asynchronous world transitions behind a loading screen.
//
// Architecture:
//   TransitionOrchestrator
//     ├─ phase: Idle | AwaitingWorld | SettlingWorld
//     ├─ collaborators: loader, persistence?, lifecycle?, presentation?
//     ├─ catalog?: WorldCatalog
//     └─ events: EventHub → Receiver<TransitionEvent>
//
// Flow:
//   request_transition() → tick() … tick() → LoadCompleted
//
// Without an orchestrator, transition_without_orchestrator() performs a
// bare slot-and-world change.
//
//=========================================================================

//=== Module Declarations =================================================

mod catalog;
mod config;
mod direct;
mod error;
mod event;
mod orchestrator;
mod request;

//=== Public API ==========================================================

pub use catalog::WorldCatalog;
pub use config::{
    TransitionConfig, TransitionConfigBuilder, DEFAULT_LOADING_TEXT, DEFAULT_MINIMUM_DISPLAY,
    DEFAULT_TIMEOUT_TEXT,
};
pub use direct::transition_without_orchestrator;
pub use error::TransitionError;
pub use event::TransitionEvent;
pub use orchestrator::{normalized_progress, OrchestratorBuilder, TransitionOrchestrator};
pub use request::{SlotIndex, TransitionRequest, TransitionState, WorldId};
