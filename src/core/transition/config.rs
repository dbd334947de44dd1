//=========================================================================
// Transition Configuration
//=========================================================================
//
// Timing and text policy for the orchestrator.
//
// Defaults:
//   minimum_display_duration  500 ms
//   load_timeout              none (a stalled load waits forever)
//   loading_status_text       "Loading..."
//   timeout_status_text       "Loading failed"
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Constants ===========================================================

pub const DEFAULT_MINIMUM_DISPLAY: Duration = Duration::from_millis(500);
pub const DEFAULT_LOADING_TEXT: &str = "Loading...";
pub const DEFAULT_TIMEOUT_TEXT: &str = "Loading failed";

//=== TransitionConfig ====================================================

/// Policy applied to every transition run by an orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionConfig {
    pub(crate) minimum_display_duration: Duration,
    pub(crate) load_timeout: Option<Duration>,
    pub(crate) loading_status_text: String,
    pub(crate) timeout_status_text: String,
}

impl TransitionConfig {
    pub fn builder() -> TransitionConfigBuilder {
        TransitionConfigBuilder::new()
    }

    /// Shortest time the loading screen stays up before a commit is allowed.
    pub fn minimum_display_duration(&self) -> Duration {
        self.minimum_display_duration
    }

    /// Watchdog for stalled loads, if enabled.
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout
    }

    pub fn loading_status_text(&self) -> &str {
        &self.loading_status_text
    }

    pub fn timeout_status_text(&self) -> &str {
        &self.timeout_status_text
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        TransitionConfigBuilder::new().build()
    }
}

//=== TransitionConfigBuilder =============================================

/// Fluent builder for [`TransitionConfig`].
///
/// ```
/// use std::time::Duration;
/// use aetheric_transit::prelude::*;
///
/// let config = TransitionConfig::builder()
///     .with_minimum_display(Duration::from_secs(1))
///     .with_load_timeout(Duration::from_secs(30))
///     .build();
///
/// assert_eq!(config.load_timeout(), Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone)]
pub struct TransitionConfigBuilder {
    minimum_display_duration: Duration,
    load_timeout: Option<Duration>,
    loading_status_text: String,
    timeout_status_text: String,
}

impl TransitionConfigBuilder {
    pub fn new() -> Self {
        Self {
            minimum_display_duration: DEFAULT_MINIMUM_DISPLAY,
            load_timeout: None,
            loading_status_text: DEFAULT_LOADING_TEXT.to_owned(),
            timeout_status_text: DEFAULT_TIMEOUT_TEXT.to_owned(),
        }
    }

    /// Sets the minimum loading-screen display time. Zero disables smoothing.
    pub fn with_minimum_display(mut self, duration: Duration) -> Self {
        self.minimum_display_duration = duration;
        self
    }

    /// Enables the stalled-load watchdog.
    ///
    /// Without it a load that never finishes keeps the loading screen up
    /// indefinitely.
    ///
    /// # Panics
    ///
    /// Panics if `timeout` is zero.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "Load timeout must be positive");
        self.load_timeout = Some(timeout);
        self
    }

    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_status_text = text.into();
        self
    }

    pub fn with_timeout_text(mut self, text: impl Into<String>) -> Self {
        self.timeout_status_text = text.into();
        self
    }

    pub fn build(self) -> TransitionConfig {
        TransitionConfig {
            minimum_display_duration: self.minimum_display_duration,
            load_timeout: self.load_timeout,
            loading_status_text: self.loading_status_text,
            timeout_status_text: self.timeout_status_text,
        }
    }
}

impl Default for TransitionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
