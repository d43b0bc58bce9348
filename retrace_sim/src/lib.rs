// retrace_sim/src/lib.rs

use bevy::gizmos::GizmoPlugin;
use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::debugging::DebuggingPlugin;
use crate::simulation::plugins::recorder::RecorderPlugin;
use crate::simulation::plugins::world::spawner::WorldSpawnerPlugin;

// This prelude is for convenience for other files WITHIN the retrace_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
///
/// Expects a validated `ScenarioConfig` resource, Bevy's `StatesPlugin` and
/// avian3d's `PhysicsPlugins` to be in the app already.
pub struct RetraceSimulationPlugin;

impl Plugin for RetraceSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Core setup (app state, fixed rate, RNG, schedule sets)
            SimulationSetupPlugin,
            // Ground, obstacles, lighting, camera and the recorded body.
            WorldSpawnerPlugin,
            // Keyboard latching, the fixed-step recorder driver and its log.
            RecorderPlugin,
        ));

        // The path overlay needs gizmos, which headless apps leave out.
        if app.is_plugin_added::<GizmoPlugin>() {
            app.add_plugins(DebuggingPlugin);
        } else {
            info!("GizmoPlugin not present; recorded paths will not be drawn.");
        }
    }
}
