//=========================================================================
// Threaded World Loader
//=========================================================================
//
// World loader that prepares each world on its own worker thread.
//
// Architecture:
// ```text
//  Orchestrator tick                     Worker thread
//  ┌──────────────────────┐             ┌──────────────────────────┐
//  │ ThreadedLoadHandle   │             │ prepare in `steps` steps │
//  │  poll(): try_recv ◄──┼─ Progress ──┤  → ready_threshold       │
//  │                      │             │ wait for commit signal   │
//  │  set_commit_allowed ─┼── () ──────►│ activate                 │
//  │                    ◄─┼─ Finished ──┤                          │
//  └──────────────────────┘             └──────────────────────────┘
// ```
//
// The handle never blocks: it only drains what the worker already sent.
// Dropping the handle disconnects both channels and the worker exits at
// its next send or while waiting for the commit signal.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::world_load::{WorldLoadHandle, WorldLoader, DEFAULT_READY_THRESHOLD};
use crate::core::transition::WorldId;

//=== LoadSignal ==========================================================

/// Messages from a worker to its handle.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LoadSignal {
    Progress(f32),
    Finished,
}

//=== ThreadedWorldLoader =================================================

/// [`WorldLoader`] that simulates preparation on a worker thread.
///
/// # Default Values
///
/// - **Steps**: 9 progress reports up to the ready threshold
/// - **Step delay**: 50 ms
/// - **Activation delay**: 20 ms
#[derive(Debug, Clone)]
pub struct ThreadedWorldLoader {
    steps: u32,
    step_delay: Duration,
    activation_delay: Duration,
}

impl ThreadedWorldLoader {
    pub fn new() -> Self {
        Self {
            steps: 9,
            step_delay: Duration::from_millis(50),
            activation_delay: Duration::from_millis(20),
        }
    }

    /// Sets how many progress reports the worker sends.
    ///
    /// # Panics
    ///
    /// Panics if `steps == 0`.
    pub fn with_steps(mut self, steps: u32) -> Self {
        assert!(steps > 0, "Loader steps must be positive");
        self.steps = steps;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn with_activation_delay(mut self, delay: Duration) -> Self {
        self.activation_delay = delay;
        self
    }
}

impl Default for ThreadedWorldLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldLoader for ThreadedWorldLoader {
    fn begin_load(&mut self, target: &WorldId, commit_allowed: bool) -> Box<dyn WorldLoadHandle> {
        let (signal_tx, signal_rx) = unbounded();
        let (commit_tx, commit_rx) = bounded(1);

        let worker = Worker {
            target: target.clone(),
            steps: self.steps,
            step_delay: self.step_delay,
            activation_delay: self.activation_delay,
        };

        debug!("Spawning load worker for world {}", target);
        thread::spawn(move || worker.run(signal_tx, commit_rx));

        let mut handle = ThreadedLoadHandle::new(signal_rx, commit_tx);
        if commit_allowed {
            handle.set_commit_allowed(true);
        }
        Box::new(handle)
    }
}

//=== Worker ==============================================================

struct Worker {
    target: WorldId,
    steps: u32,
    step_delay: Duration,
    activation_delay: Duration,
}

impl Worker {
    fn run(self, signals: Sender<LoadSignal>, commit: Receiver<()>) {
        for step in 1..=self.steps {
            thread::sleep(self.step_delay);

            let fraction = if step == self.steps {
                DEFAULT_READY_THRESHOLD
            } else {
                DEFAULT_READY_THRESHOLD * step as f32 / self.steps as f32
            };
            if signals.send(LoadSignal::Progress(fraction)).is_err() {
                debug!("Load of {} abandoned during preparation", self.target);
                return;
            }
        }

        // Prepared; hold until the handle allows the commit
        if commit.recv().is_err() {
            debug!("Load of {} abandoned before commit", self.target);
            return;
        }

        thread::sleep(self.activation_delay);
        let _ = signals.send(LoadSignal::Finished);
    }
}

//=== ThreadedLoadHandle ==================================================

/// Handle to a load running on a [`ThreadedWorldLoader`] worker.
#[derive(Debug)]
pub struct ThreadedLoadHandle {
    signals: Receiver<LoadSignal>,
    commit: Option<Sender<()>>,
    fraction: f32,
    commit_allowed: bool,
    finished: bool,
    worker_lost: bool,
}

impl ThreadedLoadHandle {
    fn new(signals: Receiver<LoadSignal>, commit: Sender<()>) -> Self {
        Self {
            signals,
            commit: Some(commit),
            fraction: 0.0,
            commit_allowed: false,
            finished: false,
            worker_lost: false,
        }
    }
}

impl WorldLoadHandle for ThreadedLoadHandle {
    fn fraction_complete(&self) -> f32 {
        self.fraction
    }

    fn commit_allowed(&self) -> bool {
        self.commit_allowed
    }

    fn set_commit_allowed(&mut self, allowed: bool) {
        if !allowed {
            if self.commit.is_none() {
                debug!("Commit already signalled; ignoring revoke");
            }
            return;
        }

        self.commit_allowed = true;
        if let Some(commit) = self.commit.take() {
            // The worker may already be gone; poll() reports that
            let _ = commit.send(());
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn has_failed(&self) -> bool {
        self.worker_lost
    }

    fn poll(&mut self) {
        loop {
            match self.signals.try_recv() {
                Ok(LoadSignal::Progress(fraction)) => {
                    self.fraction = self.fraction.max(fraction);
                }
                Ok(LoadSignal::Finished) => {
                    self.fraction = 1.0;
                    self.finished = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.finished && !self.worker_lost {
                        warn!("Load worker exited before finishing");
                        self.worker_lost = true;
                    }
                    break;
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn fast_loader() -> ThreadedWorldLoader {
        ThreadedWorldLoader::new()
            .with_steps(3)
            .with_step_delay(Duration::from_millis(1))
            .with_activation_delay(Duration::from_millis(1))
    }

    fn poll_until(
        handle: &mut Box<dyn WorldLoadHandle>,
        condition: impl Fn(&dyn WorldLoadHandle) -> bool,
    ) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            handle.poll();
            if condition(&**handle) {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        false
    }

    #[test]
    fn deferred_load_stops_at_ready_threshold() {
        let mut loader = fast_loader();
        let mut handle = loader.begin_load(&WorldId::from("Town"), false);

        assert!(poll_until(&mut handle, |h| h.fraction_complete() >= h.ready_threshold()));

        // Give the worker time to misbehave; it must still be waiting
        thread::sleep(Duration::from_millis(20));
        handle.poll();
        assert!(!handle.is_finished());
        assert!(!handle.commit_allowed());
    }

    #[test]
    fn deferred_load_finishes_after_commit() {
        let mut loader = fast_loader();
        let mut handle = loader.begin_load(&WorldId::from("Town"), false);
        assert!(poll_until(&mut handle, |h| h.fraction_complete() >= h.ready_threshold()));

        handle.set_commit_allowed(true);

        assert!(poll_until(&mut handle, |h| h.is_finished()));
        assert_eq!(handle.fraction_complete(), 1.0);
    }

    #[test]
    fn immediate_load_finishes_without_commit_call() {
        let mut loader = fast_loader();
        let mut handle = loader.begin_load(&WorldId::from("Town"), true);

        assert!(handle.commit_allowed());
        assert!(poll_until(&mut handle, |h| h.is_finished()));
    }

    #[test]
    fn progress_never_decreases() {
        let (tx, rx) = unbounded();
        let (commit_tx, _commit_rx) = bounded(1);
        let mut handle = ThreadedLoadHandle::new(rx, commit_tx);

        tx.send(LoadSignal::Progress(0.6)).unwrap();
        tx.send(LoadSignal::Progress(0.3)).unwrap();
        handle.poll();

        assert_eq!(handle.fraction_complete(), 0.6);
    }

    #[test]
    fn revoking_commit_after_signal_is_ignored() {
        let (_tx, rx) = unbounded();
        let (commit_tx, commit_rx) = bounded(1);
        let mut handle = ThreadedLoadHandle::new(rx, commit_tx);

        handle.set_commit_allowed(true);
        handle.set_commit_allowed(false);

        assert!(handle.commit_allowed());
        assert_eq!(commit_rx.try_recv(), Ok(()));
    }

    #[test]
    fn lost_worker_marks_load_failed() {
        let (tx, rx) = unbounded();
        let (commit_tx, _commit_rx) = bounded(1);
        let mut handle = ThreadedLoadHandle::new(rx, commit_tx);

        tx.send(LoadSignal::Progress(0.3)).unwrap();
        drop(tx);
        handle.poll();

        assert!(handle.has_failed());
        assert!(!handle.is_finished());
        assert_eq!(handle.fraction_complete(), 0.3);
    }

    #[test]
    fn finished_worker_is_not_failed() {
        let (tx, rx) = unbounded();
        let (commit_tx, _commit_rx) = bounded(1);
        let mut handle = ThreadedLoadHandle::new(rx, commit_tx);

        tx.send(LoadSignal::Finished).unwrap();
        drop(tx);
        handle.poll();

        assert!(handle.is_finished());
        assert!(!handle.has_failed());
    }

    #[test]
    #[should_panic(expected = "Loader steps must be positive")]
    fn zero_steps_panics() {
        ThreadedWorldLoader::new().with_steps(0);
    }
}
