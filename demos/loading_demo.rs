//=========================================================================
// Loading Demo
//=========================================================================
//
// Runs two transitions on the threaded runtime with console-backed
// collaborators. Run with:
//
//   RUST_LOG=debug cargo run --example loading_demo
//
//=========================================================================

use std::error::Error;
use std::time::Duration;

use aetheric_transit::prelude::*;
use env_logger::{Builder, Env};
use log::info;

//=== Console Collaborators ===============================================

struct ConsoleSaves;

impl PersistenceService for ConsoleSaves {
    fn activate_slot(&mut self, slot: SlotIndex) {
        info!("[save] slot {} active", slot);
    }
    fn load_active_slot(&mut self) {
        info!("[save] slot data read");
    }
    fn create_new_game(&mut self, slot: SlotIndex) {
        info!("[save] new game in slot {}", slot);
    }
    fn apply_loaded_state(&mut self) {
        info!("[save] state applied to world");
    }
}

struct ConsoleLifecycle;

impl LifecycleController for ConsoleLifecycle {
    fn begin_loading_phase(&mut self) {
        info!("[app] loading");
    }
    fn end_loading_phase(&mut self) {
        info!("[app] playing");
    }
}

struct ConsoleScreen;

impl LoadingPresentation for ConsoleScreen {
    fn show(&mut self) {
        info!("[hud] loading screen shown");
    }
    fn hide(&mut self) {
        info!("[hud] loading screen hidden");
    }
    fn set_progress(&mut self, progress: f32) {
        info!("[hud] {:>3.0}%", progress * 100.0);
    }
    fn set_status_text(&mut self, text: &str) {
        info!("[hud] {}", text);
    }
}

//=== Main ================================================================

fn main() -> Result<(), Box<dyn Error>> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let catalog = WorldCatalog::new().with_world("Menu").with_world("Gameplay");

    let orchestrator = TransitionOrchestrator::builder(ThreadedWorldLoader::new())
        .with_config(
            TransitionConfig::builder()
                .with_minimum_display(Duration::from_millis(750))
                .with_load_timeout(Duration::from_secs(10))
                .build(),
        )
        .with_catalog(catalog)
        .with_persistence(ConsoleSaves)
        .with_lifecycle(ConsoleLifecycle)
        .with_presentation(ConsoleScreen)
        .build();

    let runtime = RuntimeBuilder::new().with_tps(30.0).build().spawn(orchestrator)?;
    let transitions = runtime.transitions();
    let events = transitions.subscribe()?;

    for (target, slot, load_existing) in [("Gameplay", 2, true), ("Menu", -1, false)] {
        transitions.request_transition(target, SlotIndex::from_raw(slot), load_existing)?;

        if let Err(e) = transitions.request_transition("Gameplay", None, false) {
            info!("Button guard: {}", e);
        }

        for event in events.iter() {
            if event.is_terminal() {
                info!("Finished: {:?}", event);
                break;
            }
        }
    }

    if let Err(e) = transitions.request_transition("Sewers", None, false) {
        info!("Catalog guard: {}", e);
    }

    runtime.shutdown()?;
    Ok(())
}
