//=========================================================================
// World Catalog
//=========================================================================
//
// Registry of worlds a transition may target.
//
// Mirrors the build-settings list of the content pipeline: a world is
// either absent, registered and enabled, or registered but disabled.
// Orchestrators without a catalog accept any target.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{TransitionError, WorldId};

//=== WorldCatalog ========================================================

/// Known worlds and whether each may be loaded.
#[derive(Debug, Clone, Default)]
pub struct WorldCatalog {
    worlds: HashMap<WorldId, bool>,
}

impl WorldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enabled world. Chainable.
    pub fn with_world(mut self, id: impl Into<WorldId>) -> Self {
        self.register(id, true);
        self
    }

    /// Registers a world with an explicit enabled flag.
    pub fn register(&mut self, id: impl Into<WorldId>, enabled: bool) {
        let id = id.into();
        if self.worlds.insert(id.clone(), enabled).is_some() {
            warn!("World {} was already registered and has been replaced", id);
        }
    }

    pub fn set_enabled(&mut self, id: &WorldId, enabled: bool) -> bool {
        match self.worlds.get_mut(id) {
            Some(flag) => {
                *flag = enabled;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &WorldId) -> bool {
        self.worlds.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Checks that `id` is registered and enabled.
    pub fn validate(&self, id: &WorldId) -> Result<(), TransitionError> {
        match self.worlds.get(id) {
            Some(true) => Ok(()),
            Some(false) => Err(TransitionError::WorldDisabled(id.clone())),
            None => Err(TransitionError::UnknownWorld(id.clone())),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
