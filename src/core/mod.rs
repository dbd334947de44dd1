//=========================================================================
// Core Transition Systems
//=========================================================================
//
// Everything the orchestrator needs, independent of how it is ticked.
//
// Architecture:
//   clock          → unscaled time source (SystemClock, ManualClock)
//   collaborators  → contracts for save, lifecycle, loading screen, loader
//   transition     → request types, config, events, state machine
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod collaborators;
pub mod transition;
