//=========================================================================
// Persistence Service Contract
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::transition::SlotIndex;

//=== PersistenceService ==================================================

/// Save system as seen by a world transition.
///
/// Slot activation and load/create happen before the world load begins.
/// `apply_loaded_state` runs once the new world's objects exist and have
/// had one tick to initialize; calling it earlier is outside the contract.
pub trait PersistenceService: Send {
    /// Makes `slot` the active save slot.
    fn activate_slot(&mut self, slot: SlotIndex);

    /// Reads the active slot's saved data into memory.
    fn load_active_slot(&mut self);

    /// Starts a fresh playthrough in `slot`.
    fn create_new_game(&mut self, slot: SlotIndex);

    /// Pushes the loaded data into the newly active world.
    fn apply_loaded_state(&mut self);
}
