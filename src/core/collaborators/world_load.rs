//=========================================================================
// World Load Primitive
//=========================================================================
//
// Opaque asynchronous world load.
//
// Lifecycle:
//   WorldLoader::begin_load() → WorldLoadHandle
//     poll()                    once per tick, before inspection
//     fraction_complete()       rises to ready_threshold() while preparing
//     set_commit_allowed(true)  lets the prepared world replace the old one
//     is_finished()             true once the new world is active
//     has_failed()              true if the load died on the way
//
// A handle begun with commit disallowed must stop at its ready threshold
// and never swap the world in on its own.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::transition::WorldId;

//=== Constants ===========================================================

/// Progress value at which a deferred load is fully prepared.
///
/// Engines conventionally reserve the last tenth of the progress range
/// for activation.
pub const DEFAULT_READY_THRESHOLD: f32 = 0.9;

//=== WorldLoadHandle =====================================================

/// In-flight world load.
pub trait WorldLoadHandle: Send {
    /// Raw progress in `[0, 1]`.
    fn fraction_complete(&self) -> f32;

    fn commit_allowed(&self) -> bool;

    fn set_commit_allowed(&mut self, allowed: bool);

    /// True once the new world has replaced the old one.
    fn is_finished(&self) -> bool;

    /// True when the load stopped and will never finish.
    fn has_failed(&self) -> bool {
        false
    }

    /// Progress value at which the load is prepared and waits for commit.
    fn ready_threshold(&self) -> f32 {
        DEFAULT_READY_THRESHOLD
    }

    /// Refreshes cached state. Called once per tick before any query.
    fn poll(&mut self) {}
}

//=== WorldLoader =========================================================

/// Starts world loads.
pub trait WorldLoader: Send {
    /// Begins loading `target`.
    ///
    /// With `commit_allowed` false the load prepares the world but waits
    /// for [`WorldLoadHandle::set_commit_allowed`] before activating it.
    fn begin_load(&mut self, target: &WorldId, commit_allowed: bool) -> Box<dyn WorldLoadHandle>;
}
