//=========================================================================
// Lifecycle Controller Contract
//=========================================================================

/// Application phase switch.
///
/// Gameplay systems typically pause input and simulation while the
/// loading phase is active.
pub trait LifecycleController: Send {
    fn begin_loading_phase(&mut self);
    fn end_loading_phase(&mut self);
}
