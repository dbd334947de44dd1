//=========================================================================
// Transition Orchestrator
//=========================================================================
//
// Drives one world transition at a time through a fixed phase sequence.
//
// Phases:
// ```text
//   request_transition()                 tick()
//   ┌───────────────────────────┐       ┌─────────────────────────────────┐
//   │ 1. LoadStarted, begin     │       │ AwaitingWorld                   │
//   │    loading phase          │       │  6. progress = fraction/ready   │
//   │ 2. show screen, reset     │  ──►  │     ready && elapsed >= min     │
//   │ 3. start timestamp        │       │       → commit allowed          │
//   │ 4. slot activate/load     │       │  finished → 7. hide             │
//   │ 5. begin deferred load    │       │ SettlingWorld (load_existing)   │
//   └───────────────────────────┘       │  8. apply saved state           │
//                                       │  9. end loading phase           │
//                                       │ 10. Idle, LoadCompleted         │
//                                       └─────────────────────────────────┘
// ```
//
// The orchestrator never blocks. Every suspension point is a phase that
// the next tick() resumes, so callers decide the tick rate (the runtime
// thread, a game loop, or a test stepping a ManualClock).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::direct::prepare_slot;
use super::event::EventHub;
use super::{
    SlotIndex, TransitionConfig, TransitionError, TransitionEvent, TransitionRequest,
    TransitionState, WorldCatalog, WorldId,
};
use crate::core::clock::{Clock, SystemClock};
use crate::core::collaborators::{
    LifecycleController, LoadingPresentation, PersistenceService, WorldLoadHandle, WorldLoader,
};

//=== Phase ===============================================================

enum Phase {
    Idle,
    AwaitingWorld(ActiveLoad),
    SettlingWorld(TransitionRequest),
}

struct ActiveLoad {
    request: TransitionRequest,
    handle: Box<dyn WorldLoadHandle>,
    started_at: Duration,
    shown_progress: f32,
}

//=== Progress Normalization ==============================================

/// Maps raw load progress onto a full bar.
///
/// The ready threshold maps to 1.0. A non-positive threshold counts as
/// already ready. Non-finite progress reads as 0.0.
pub fn normalized_progress(fraction: f32, ready_threshold: f32) -> f32 {
    if !fraction.is_finite() {
        return 0.0;
    }
    if ready_threshold <= 0.0 {
        return 1.0;
    }
    let shown = fraction / ready_threshold;
    if shown.is_nan() {
        return 0.0;
    }
    shown.clamp(0.0, 1.0)
}

//=== TransitionOrchestrator ==============================================

/// Owner of the world transition state machine.
///
/// Create one per application in the composition root and hand out
/// references (or a [`crate::TransitionHandle`] via the runtime) to the UI
/// code that starts transitions.
///
/// # Examples
///
/// ```
/// use aetheric_transit::prelude::*;
///
/// let mut orchestrator = TransitionOrchestrator::builder(ThreadedWorldLoader::new())
///     .with_config(TransitionConfig::default())
///     .build();
///
/// let events = orchestrator.subscribe();
/// orchestrator.request_transition("Gameplay", SlotIndex::from_raw(-1), false)?;
///
/// assert!(orchestrator.is_transition_in_progress());
/// assert!(matches!(events.try_recv(), Ok(TransitionEvent::LoadStarted { .. })));
/// # Ok::<(), TransitionError>(())
/// ```
pub struct TransitionOrchestrator {
    config: TransitionConfig,
    clock: Box<dyn Clock>,
    loader: Box<dyn WorldLoader>,
    persistence: Option<Box<dyn PersistenceService>>,
    lifecycle: Option<Box<dyn LifecycleController>>,
    presentation: Option<Box<dyn LoadingPresentation>>,
    catalog: Option<WorldCatalog>,
    events: EventHub,
    phase: Phase,
    in_progress: Arc<AtomicBool>,
}

impl TransitionOrchestrator {
    //--- Construction -----------------------------------------------------

    /// Starts building an orchestrator around the world loading primitive.
    pub fn builder<L>(loader: L) -> OrchestratorBuilder
    where
        L: WorldLoader + 'static,
    {
        OrchestratorBuilder::new(Box::new(loader))
    }

    //--- Queries ----------------------------------------------------------

    /// Current coarse state. `Loading` from acceptance until the terminal
    /// event has been emitted.
    pub fn state(&self) -> TransitionState {
        match self.phase {
            Phase::Idle => TransitionState::Idle,
            Phase::AwaitingWorld(_) | Phase::SettlingWorld(_) => TransitionState::Loading,
        }
    }

    /// True while a transition runs; new requests are rejected meanwhile.
    pub fn is_transition_in_progress(&self) -> bool {
        self.state() == TransitionState::Loading
    }

    /// Target of the running transition, if any.
    pub fn active_target(&self) -> Option<&WorldId> {
        match &self.phase {
            Phase::Idle => None,
            Phase::AwaitingWorld(load) => Some(load.request.target()),
            Phase::SettlingWorld(request) => Some(request.target()),
        }
    }

    /// Timing and text settings this orchestrator was built with.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Shared in-progress flag. Written only by this orchestrator.
    pub(crate) fn progress_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.in_progress)
    }

    //--- Events -----------------------------------------------------------

    /// Subscribes to transition events.
    pub fn subscribe(&mut self) -> Receiver<TransitionEvent> {
        self.events.subscribe()
    }

    //--- Requests ---------------------------------------------------------

    /// Starts a transition to `target`.
    ///
    /// `slot` of `None` (or `SlotIndex::from_raw(-1)`) keeps the active
    /// save slot. Rejected with [`TransitionError::TransitionInProgress`]
    /// while another transition runs.
    pub fn request_transition(
        &mut self,
        target: impl Into<WorldId>,
        slot: impl Into<Option<SlotIndex>>,
        load_existing_save: bool,
    ) -> Result<(), TransitionError> {
        self.submit(TransitionRequest::new(target, slot, load_existing_save))
    }

    /// Starts the transition described by `request`.
    ///
    /// Runs phases 1 to 5 synchronously; the rest happens in [`Self::tick`].
    pub fn submit(&mut self, request: TransitionRequest) -> Result<(), TransitionError> {
        if let Some(active) = self.active_target() {
            warn!(
                "Rejected transition to {}: transition to {} in progress",
                request.target(),
                active
            );
            return Err(TransitionError::TransitionInProgress {
                active: active.clone(),
                requested: request.target().clone(),
            });
        }

        if let Some(catalog) = &self.catalog {
            if let Err(e) = catalog.validate(request.target()) {
                warn!("Rejected transition: {}", e);
                return Err(e);
            }
        }

        info!(
            "Transition to {} accepted (slot: {:?}, load existing: {})",
            request.target(),
            request.slot(),
            request.load_existing_save()
        );

        //--- 1. Announce and enter loading phase --------------------------
        self.in_progress.store(true, Ordering::SeqCst);
        self.events.emit(TransitionEvent::LoadStarted {
            target: request.target().clone(),
        });
        match self.lifecycle.as_mut() {
            Some(lifecycle) => lifecycle.begin_loading_phase(),
            None => warn!("No lifecycle controller; loading phase not declared"),
        }

        //--- 2. Loading screen ---------------------------------------------
        match self.presentation.as_mut() {
            Some(presentation) => {
                presentation.show();
                presentation.set_progress(0.0);
                presentation.set_status_text(&self.config.loading_status_text);
            }
            None => warn!("No loading presentation; transition runs without progress UI"),
        }

        //--- 3. Start timestamp --------------------------------------------
        let started_at = self.clock.now();

        //--- 4. Save slot, before the world load ---------------------------
        match self.persistence.as_mut() {
            Some(persistence) => prepare_slot(persistence.as_mut(), &request),
            None if request.slot().is_some() => {
                warn!("No persistence service; slot change for {} skipped", request.target());
            }
            None => {}
        }

        //--- 5. Deferred world load ----------------------------------------
        debug!("Beginning deferred load of {}", request.target());
        let handle = self.loader.begin_load(request.target(), false);

        self.phase = Phase::AwaitingWorld(ActiveLoad {
            request,
            handle,
            started_at,
            shown_progress: 0.0,
        });
        Ok(())
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the running transition by one scheduling tick.
    ///
    /// Does nothing while idle. Returns the state after the tick.
    pub fn tick(&mut self) -> TransitionState {
        self.phase = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => Phase::Idle,
            Phase::AwaitingWorld(load) => self.poll_world(load),
            Phase::SettlingWorld(request) => {
                //--- 8. Apply saved state, one tick after commit ------------
                match self.persistence.as_mut() {
                    Some(persistence) => {
                        debug!("Applying loaded state to {}", request.target());
                        persistence.apply_loaded_state();
                    }
                    None => warn!("No persistence service; saved state not applied"),
                }
                self.finish(request);
                Phase::Idle
            }
        };

        self.state()
    }

    //--- Internal Helpers -------------------------------------------------

    fn poll_world(&mut self, mut load: ActiveLoad) -> Phase {
        load.handle.poll();

        if load.handle.is_finished() {
            //--- 7. World committed; drop the loading screen --------------
            debug!("World {} committed", load.request.target());
            if let Some(presentation) = self.presentation.as_mut() {
                presentation.hide();
            }

            if load.request.load_existing_save() {
                // New world objects initialize during the next tick
                return Phase::SettlingWorld(load.request);
            }
            self.finish(load.request);
            return Phase::Idle;
        }

        let elapsed = self.clock.now().saturating_sub(load.started_at);

        if load.handle.has_failed() {
            let error = TransitionError::LoadAbandoned {
                target: load.request.target().clone(),
            };
            self.abort(load, error);
            return Phase::Idle;
        }

        let threshold = load.handle.ready_threshold();
        let fraction = load.handle.fraction_complete();
        let ready = threshold <= 0.0 || fraction >= threshold;

        // Only preparation is watched; a ready load waits on the display
        // minimum and a committed one is already swapping in
        if let Some(timeout) = self.config.load_timeout {
            if !ready && !load.handle.commit_allowed() && elapsed >= timeout {
                let error = TransitionError::LoadTimedOut {
                    target: load.request.target().clone(),
                    waited: elapsed,
                };
                self.abort(load, error);
                return Phase::Idle;
            }
        }

        //--- 6. Progress and commit gate ----------------------------------
        self.report_progress(&mut load, normalized_progress(fraction, threshold));

        if ready && !load.handle.commit_allowed() {
            if elapsed >= self.config.minimum_display_duration {
                info!(
                    "Committing {} after {:?} on the loading screen",
                    load.request.target(),
                    elapsed
                );
                load.handle.set_commit_allowed(true);
            } else {
                debug!(
                    "World {} ready; holding commit ({:?} of {:?})",
                    load.request.target(),
                    elapsed,
                    self.config.minimum_display_duration
                );
            }
        }

        Phase::AwaitingWorld(load)
    }

    fn report_progress(&mut self, load: &mut ActiveLoad, shown: f32) {
        if shown == load.shown_progress {
            return;
        }
        load.shown_progress = shown;

        if let Some(presentation) = self.presentation.as_mut() {
            presentation.set_progress(shown);
        }
        self.events.emit(TransitionEvent::Progress {
            target: load.request.target().clone(),
            fraction: shown,
        });
    }

    fn finish(&mut self, request: TransitionRequest) {
        //--- 9. Leave loading phase ----------------------------------------
        if let Some(lifecycle) = self.lifecycle.as_mut() {
            lifecycle.end_loading_phase();
        }

        //--- 10. Idle and announce -----------------------------------------
        self.in_progress.store(false, Ordering::SeqCst);
        info!("Transition to {} completed", request.target());
        self.events.emit(TransitionEvent::LoadCompleted {
            target: request.target().clone(),
        });
    }

    fn abort(&mut self, load: ActiveLoad, error: TransitionError) {
        let ActiveLoad { request, handle, .. } = load;
        error!("{}", error);

        // Dropping the handle abandons the load
        drop(handle);

        if let Some(presentation) = self.presentation.as_mut() {
            presentation.show_error(&self.config.timeout_status_text);
        }
        if let Some(lifecycle) = self.lifecycle.as_mut() {
            lifecycle.end_loading_phase();
        }

        self.in_progress.store(false, Ordering::SeqCst);
        self.events.emit(TransitionEvent::LoadFailed {
            target: request.target().clone(),
            error,
        });
    }
}

//=== OrchestratorBuilder =================================================

/// Builder for [`TransitionOrchestrator`].
///
/// Only the world loader is mandatory. Each missing collaborator turns its
/// steps into logged no-ops.
///
/// # Default Values
///
/// - **Config**: [`TransitionConfig::default`]
/// - **Clock**: [`SystemClock`]
/// - **Catalog**: none (any target accepted)
pub struct OrchestratorBuilder {
    config: TransitionConfig,
    clock: Box<dyn Clock>,
    loader: Box<dyn WorldLoader>,
    persistence: Option<Box<dyn PersistenceService>>,
    lifecycle: Option<Box<dyn LifecycleController>>,
    presentation: Option<Box<dyn LoadingPresentation>>,
    catalog: Option<WorldCatalog>,
}

impl OrchestratorBuilder {
    fn new(loader: Box<dyn WorldLoader>) -> Self {
        Self {
            config: TransitionConfig::default(),
            clock: Box::new(SystemClock::new()),
            loader,
            persistence: None,
            lifecycle: None,
            presentation: None,
            catalog: None,
        }
    }

    pub fn with_config(mut self, config: TransitionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the timing source. Must not be affected by game time scale.
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_persistence<P: PersistenceService + 'static>(mut self, persistence: P) -> Self {
        self.persistence = Some(Box::new(persistence));
        self
    }

    pub fn with_lifecycle<L: LifecycleController + 'static>(mut self, lifecycle: L) -> Self {
        self.lifecycle = Some(Box::new(lifecycle));
        self
    }

    pub fn with_presentation<V: LoadingPresentation + 'static>(mut self, presentation: V) -> Self {
        self.presentation = Some(Box::new(presentation));
        self
    }

    /// Restricts targets to the worlds enabled in `catalog`.
    pub fn with_catalog(mut self, catalog: WorldCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> TransitionOrchestrator {
        debug!(
            "Building transition orchestrator (min display: {:?}, timeout: {:?})",
            self.config.minimum_display_duration, self.config.load_timeout
        );

        TransitionOrchestrator {
            config: self.config,
            clock: self.clock,
            loader: self.loader,
            persistence: self.persistence,
            lifecycle: self.lifecycle,
            presentation: self.presentation,
            catalog: self.catalog,
            events: EventHub::new(),
            phase: Phase::Idle,
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
