//=========================================================================
// Transition Request
//=========================================================================
//
// Immutable description of one world transition.
//
// A request names the target world, the save slot to activate (if any),
// and whether that slot's existing save is loaded or a new game created.
// It is consumed by exactly one transition.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== WorldId =============================================================

/// Identifier of a loadable world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldId(String);

impl WorldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WorldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

//=== SlotIndex ===========================================================

/// Index of a persistence slot.
///
/// Menus traditionally pass `-1` for "keep the current slot"; use
/// [`SlotIndex::from_raw`] to convert such values into `Option<SlotIndex>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u32);

impl SlotIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Converts a raw signed index. Negative values mean no slot change.
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//=== TransitionRequest ===================================================

/// One requested world transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    target: WorldId,
    slot: Option<SlotIndex>,
    load_existing_save: bool,
}

impl TransitionRequest {
    /// Creates a request.
    ///
    /// `slot` accepts either a [`SlotIndex`] or an `Option<SlotIndex>`;
    /// `None` leaves the active slot untouched.
    pub fn new(
        target: impl Into<WorldId>,
        slot: impl Into<Option<SlotIndex>>,
        load_existing_save: bool,
    ) -> Self {
        Self {
            target: target.into(),
            slot: slot.into(),
            load_existing_save,
        }
    }

    pub fn target(&self) -> &WorldId {
        &self.target
    }

    pub fn slot(&self) -> Option<SlotIndex> {
        self.slot
    }

    pub fn load_existing_save(&self) -> bool {
        self.load_existing_save
    }
}

//=== TransitionState =====================================================

/// Externally visible orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Loading,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- SlotIndex --------------------------------------------------------

    #[test]
    fn negative_raw_slot_means_no_change() {
        assert_eq!(SlotIndex::from_raw(-1), None);
        assert_eq!(SlotIndex::from_raw(i32::MIN), None);
    }

    #[test]
    fn non_negative_raw_slot_is_kept() {
        assert_eq!(SlotIndex::from_raw(0), Some(SlotIndex::new(0)));
        assert_eq!(SlotIndex::from_raw(2).map(SlotIndex::get), Some(2));
    }

    //--- TransitionRequest ------------------------------------------------

    #[test]
    fn request_accepts_plain_slot() {
        let request = TransitionRequest::new("Gameplay", SlotIndex::new(2), true);

        assert_eq!(request.target().as_str(), "Gameplay");
        assert_eq!(request.slot(), Some(SlotIndex::new(2)));
        assert!(request.load_existing_save());
    }

    #[test]
    fn request_accepts_missing_slot() {
        let request = TransitionRequest::new("Town", SlotIndex::from_raw(-1), false);
        assert_eq!(request.slot(), None);
    }

    #[test]
    fn state_defaults_to_idle() {
        assert_eq!(TransitionState::default(), TransitionState::Idle);
    }
}
