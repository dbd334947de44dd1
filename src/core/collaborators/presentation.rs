//=========================================================================
// Loading Presentation Contract
//=========================================================================

/// Loading screen widgets.
///
/// The screen is shown when a transition starts and hidden once the new
/// world is committed. `set_progress` receives values already normalized
/// to `[0, 1]`.
pub trait LoadingPresentation: Send {
    fn show(&mut self);
    fn hide(&mut self);
    fn set_progress(&mut self, progress: f32);
    fn set_status_text(&mut self, text: &str);

    /// Replaces the loading view with an error state.
    ///
    /// Only used when a load times out. The default keeps the screen up
    /// and swaps the status text; override to offer retry or
    /// return-to-menu actions.
    fn show_error(&mut self, message: &str) {
        self.set_status_text(message);
    }
}
