//=========================================================================
// Direct Transition
//=========================================================================
//
// World change without an orchestrator.
//
// Used when no orchestrator has been composed yet (early boot, tools).
// Prepares the save slot, then starts a non-deferred load: no loading
// screen, no minimum display time, no lifecycle phases, no events.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::TransitionRequest;
use crate::core::collaborators::{PersistenceService, WorldLoadHandle, WorldLoader};

//=== Slot Preparation ====================================================

/// Activates the request's slot and loads or creates its save.
///
/// Does nothing for requests without a slot.
pub(crate) fn prepare_slot(persistence: &mut dyn PersistenceService, request: &TransitionRequest) {
    let Some(slot) = request.slot() else {
        return;
    };

    debug!("Activating save slot {}", slot);
    persistence.activate_slot(slot);

    if request.load_existing_save() {
        debug!("Loading existing save from slot {}", slot);
        persistence.load_active_slot();
    } else {
        debug!("Creating new game in slot {}", slot);
        persistence.create_new_game(slot);
    }
}

//=== transition_without_orchestrator() ===================================

/// Changes worlds immediately, bypassing the orchestrator.
///
/// The returned handle commits on its own; the caller decides whether to
/// keep polling it. Saved state is not applied by this path.
pub fn transition_without_orchestrator(
    request: TransitionRequest,
    persistence: Option<&mut dyn PersistenceService>,
    loader: &mut dyn WorldLoader,
) -> Box<dyn WorldLoadHandle> {
    info!("Direct transition to {} (no orchestrator)", request.target());

    match persistence {
        Some(persistence) => prepare_slot(persistence, &request),
        None if request.slot().is_some() => {
            warn!("No persistence service; slot change for {} skipped", request.target());
        }
        None => {}
    }

    loader.begin_load(request.target(), true)
}

//=========================================================================
// Unit Tests
//=========================================================================
