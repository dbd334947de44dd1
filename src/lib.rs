//=========================================================================
// Aetheric Transit — Library Root
//
// World transitions behind a loading screen, for games that must swap
// worlds without visible hitches.
//
// Responsibilities:
// - Sequence save slot activation, deferred world loading, and saved
//   state application in a fixed, observable order
// - Keep the loading screen up for a minimum time regardless of load
//   speed, without delaying slow loads further
// - Reject overlapping transitions instead of interleaving them
// - Run the state machine on a caller's game loop or on its own thread
//
// Typical usage:
// ```no_run
// use aetheric_transit::prelude::*;
//
// let orchestrator = TransitionOrchestrator::builder(ThreadedWorldLoader::new()).build();
// let runtime = RuntimeBuilder::new().build().spawn(orchestrator)?;
//
// runtime.transitions().request_transition("Gameplay", SlotIndex::new(0), true)?;
// # Ok::<(), Box<dyn std::error::Error>>(())
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the transition state machine, its collaborator
// contracts, and the clock abstraction.
//
pub mod core;

//--- Runtime -------------------------------------------------------------
//
// `runtime` drives an orchestrator on a dedicated fixed-rate thread and
// hands out thread-safe handles. Optional: games with their own loop can
// call `TransitionOrchestrator::tick` directly.
//
mod runtime;

pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use runtime::{Runtime, RuntimeBuilder, RuntimeError, RuntimeHandle, TransitionHandle};
