//=========================================================================
// Transition Collaborators
//=========================================================================
//
// Contracts between the orchestrator and the services it sequences.
//
// The orchestrator owns none of these systems' logic; it only calls them
// in a fixed order. Implementations live with the game (save system,
// application lifecycle, HUD, engine world loader), which keeps them
// swappable without touching transition code.
//
// Components:
// - `persistence`: save slot activation, load/create, state application
// - `lifecycle`: loading vs playing phase declaration
// - `presentation`: loading screen, progress bar, status text
// - `world_load`: asynchronous world load primitive and its handle
// - `threaded_loader`: worker-thread backed world loader
//
//=========================================================================

//=== Module Declarations =================================================

mod lifecycle;
mod persistence;
mod presentation;
mod threaded_loader;
mod world_load;

//=== Public API ==========================================================

pub use lifecycle::LifecycleController;
pub use persistence::PersistenceService;
pub use presentation::LoadingPresentation;
pub use threaded_loader::{ThreadedLoadHandle, ThreadedWorldLoader};
pub use world_load::{WorldLoadHandle, WorldLoader, DEFAULT_READY_THRESHOLD};
