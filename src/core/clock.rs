//=========================================================================
// Clock
//=========================================================================
//
// Unscaled time source for transition timing.
//
// The loading screen must keep progressing while gameplay time is frozen,
// so transition timing never reads a game-speed-scaled clock.
//
//   SystemClock  → monotonic wall clock (Instant)
//   ManualClock  → externally advanced, shared between clones
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

//=== Clock Trait =========================================================

/// Monotonic, unscaled time source.
///
/// Returns time elapsed since the clock's own origin. Only differences
/// between two readings are meaningful.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

//=== SystemClock =========================================================

/// Wall-clock time backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

//=== ManualClock =========================================================

/// Clock advanced explicitly by the caller.
///
/// Clones share the same reading, so a test can keep one clone while the
/// orchestrator owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.nanos
            .fetch_add(saturating_nanos(delta), Ordering::SeqCst);
    }

    /// Sets the absolute reading.
    pub fn set(&self, now: Duration) {
        self.nanos.store(saturating_nanos(now), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_zero() {
        assert_eq!(ManualClock::new().now(), Duration::ZERO);
    }

    #[test]
    fn manual_clock_clones_share_reading() {
        let clock = ManualClock::new();
        let observer = clock.clone();

        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::from_millis(250));

        assert_eq!(observer.now(), Duration::from_millis(500));
    }

    #[test]
    fn manual_clock_set_overrides_reading() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(3));
        clock.set(Duration::from_millis(10));

        assert_eq!(clock.now(), Duration::from_millis(10));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
