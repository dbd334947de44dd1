//=========================================================================
// Transition Runtime
//
// Runs a TransitionOrchestrator on its own fixed-rate logic thread.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──spawn(orchestrator)──>  RuntimeHandle
//         │                                                              │
//         ├─ with_tps()                                                  ├─ transitions() → TransitionHandle (Clone)
//         └─ with_channel_capacity()                                     └─ shutdown()
//
//  UI threads                              Core thread (@ TPS)
//  ┌────────────────────────┐             ┌────────────────────────────┐
//  │ TransitionHandle       │  commands   │ CommandCollector           │
//  │  request_transition() ─┼────────────►│   ↓ dispatch               │
//  │  subscribe()           │◄── reply ───┤ TransitionOrchestrator     │
//  │  is_in_progress() ◄────┼─ AtomicBool ┤   ↓ tick()                 │
//  └────────────────────────┘             │ sleep to next frame        │
//                                         └────────────────────────────┘
// ```
//
// The orchestrator is owned by exactly one thread; handles only talk to
// it through the bounded command channel.
//
//=========================================================================

//=== Module Declarations =================================================

mod command_collector;
mod interface;

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::transition::{
    SlotIndex, TransitionError, TransitionEvent, TransitionOrchestrator, TransitionRequest, WorldId,
};
use command_collector::{CommandCollector, TickControl};
pub(crate) use interface::RuntimeCommand;

//=== Public API ==========================================================

pub use interface::RuntimeError;

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (orchestrator ticks per second)
/// - **Channel capacity**: 128 commands
///
/// # Examples
///
/// ```no_run
/// use aetheric_transit::prelude::*;
///
/// let orchestrator = TransitionOrchestrator::builder(ThreadedWorldLoader::new()).build();
///
/// let runtime = RuntimeBuilder::new()
///     .with_tps(120.0)
///     .with_channel_capacity(32)
///     .build()
///     .spawn(orchestrator)?;
///
/// let transitions = runtime.transitions();
/// transitions.request_transition("Gameplay", SlotIndex::new(0), true)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeBuilder {
    tps: f64,
    channel_capacity: usize,
}

impl RuntimeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }

    /// Sets how often the orchestrator is ticked.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the command channel capacity for handle → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn build(self) -> Runtime {
        info!(
            "Building transition runtime (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );

        Runtime {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

/// Configured, not yet running, transition runtime.
#[derive(Debug, Clone)]
pub struct Runtime {
    tps: f64,
    channel_capacity: usize,
}

impl Runtime {
    /// Moves `orchestrator` onto a new core thread and starts ticking it.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded command channel
    /// 2. Spawns the core thread running at the configured TPS
    /// 3. Returns a handle; dropping it or calling
    ///    [`RuntimeHandle::shutdown`] stops and joins the thread
    pub fn spawn(self, orchestrator: TransitionOrchestrator) -> Result<RuntimeHandle, RuntimeError> {
        let (tx, rx): (Sender<RuntimeCommand>, Receiver<RuntimeCommand>) =
            bounded(self.channel_capacity);
        let in_progress = orchestrator.progress_flag();
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);

        let thread = thread::Builder::new()
            .name("transition-core".into())
            .spawn(move || run_core_loop(orchestrator, rx, frame_duration))
            .map_err(RuntimeError::ThreadSpawn)?;

        info!("Transition core thread spawned (TPS: {})", self.tps);

        Ok(RuntimeHandle {
            transitions: TransitionHandle {
                commands: tx,
                in_progress,
            },
            thread: Some(thread),
        })
    }
}

//--- run_core_loop() -----------------------------------------------------
//
// Each frame:
//  1. Collects handle commands
//  2. Dispatches them to the orchestrator
//  3. Ticks the orchestrator
//  4. Sleeps to maintain fixed pacing
//
fn run_core_loop(
    mut orchestrator: TransitionOrchestrator,
    receiver: Receiver<RuntimeCommand>,
    frame_duration: Duration,
) {
    let mut collector = CommandCollector::new(receiver);

    loop {
        let frame_start = Instant::now();

        //--- Step 1: Gather commands ---------------------------------------
        let control = collector.collect_frame();

        //--- Step 2: Dispatch ----------------------------------------------
        for command in collector.take_commands() {
            dispatch(&mut orchestrator, command);
        }

        if control == TickControl::Exit {
            if let Some(target) = orchestrator.active_target() {
                warn!("Core thread exiting with transition to {} unfinished", target);
            }
            info!("Transition core thread exiting.");
            break;
        }

        //--- Step 3: Advance the transition --------------------------------
        orchestrator.tick();

        //--- Step 4: Maintain pacing ---------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }
}

fn dispatch(orchestrator: &mut TransitionOrchestrator, command: RuntimeCommand) {
    match command {
        RuntimeCommand::Request { request, reply } => {
            if reply.send(orchestrator.submit(request)).is_err() {
                debug!("Transition requester went away before the reply");
            }
        }
        RuntimeCommand::Subscribe { reply } => {
            let _ = reply.send(orchestrator.subscribe());
        }
        RuntimeCommand::Shutdown => {}
    }
}

//=== RuntimeHandle =======================================================

/// Owner of a running core thread.
#[derive(Debug)]
pub struct RuntimeHandle {
    transitions: TransitionHandle,
    thread: Option<JoinHandle<()>>,
}

impl RuntimeHandle {
    /// Cloneable handle for UI code that starts transitions.
    pub fn transitions(&self) -> TransitionHandle {
        self.transitions.clone()
    }

    /// Stops the core thread and waits for it.
    ///
    /// An unfinished transition is abandoned.
    pub fn shutdown(mut self) -> Result<(), RuntimeError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), RuntimeError> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        // Fails only if the core thread is already gone
        let _ = self.transitions.commands.send(RuntimeCommand::Shutdown);

        match thread.join() {
            Ok(()) => {
                info!("Transition core thread terminated cleanly");
                Ok(())
            }
            Err(e) => {
                error!("Transition core thread panicked: {:?}", e);
                Err(RuntimeError::WorkerPanicked)
            }
        }
    }
}

impl Drop for RuntimeHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

//=== TransitionHandle ====================================================

/// Thread-safe front end to an orchestrator running on a [`Runtime`].
///
/// Requests are answered synchronously: the call returns once the core
/// thread has accepted or rejected the transition.
#[derive(Debug, Clone)]
pub struct TransitionHandle {
    commands: Sender<RuntimeCommand>,
    in_progress: Arc<AtomicBool>,
}

impl TransitionHandle {
    pub fn request_transition(
        &self,
        target: impl Into<WorldId>,
        slot: impl Into<Option<SlotIndex>>,
        load_existing_save: bool,
    ) -> Result<(), TransitionError> {
        self.submit(TransitionRequest::new(target, slot, load_existing_save))
    }

    pub fn submit(&self, request: TransitionRequest) -> Result<(), TransitionError> {
        let (reply, response) = bounded(1);
        self.commands
            .send(RuntimeCommand::Request { request, reply })
            .map_err(|_| TransitionError::RuntimeUnavailable)?;

        response
            .recv()
            .map_err(|_| TransitionError::RuntimeUnavailable)?
    }

    /// Lock-free read of the orchestrator's state.
    pub fn is_transition_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> Result<Receiver<TransitionEvent>, TransitionError> {
        let (reply, response) = bounded(1);
        self.commands
            .send(RuntimeCommand::Subscribe { reply })
            .map_err(|_| TransitionError::RuntimeUnavailable)?;

        response
            .recv()
            .map_err(|_| TransitionError::RuntimeUnavailable)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
