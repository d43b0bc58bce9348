// retrace_sim/src/simulation/core/simulation_setup.rs

use avian3d::prelude::Gravity;

use crate::prelude::*;
use crate::simulation::core::events::RecorderNotice;
use crate::simulation::core::prng::SimulationRng;

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and add resources and the schedule graph.
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .cloned()
            .expect("ScenarioConfig must be inserted before RetraceSimulationPlugin");

        // --- 1. Add the Deterministic PRNG Resource ---
        if config.simulation.seed.is_none() {
            warn!("[SETUP] No seed configured; the scene layout will differ between runs.");
        }
        app.insert_resource(SimulationRng::from_seed(config.simulation.seed));

        // --- 2. Resources & Events ---
        let [gx, gy, gz] = config.world.gravity;
        app.insert_resource(config.bindings.clone())
            .insert_resource(Gravity(Vec3::new(gx, gy, gz)))
            // The recorder ticks at the physics rate.
            .insert_resource(Time::<Fixed>::from_hz(config.simulation.physics_hz))
            .add_event::<RecorderNotice>();

        app.init_state::<AppState>();

        // --- 3. Scene building pipeline ---
        app.configure_sets(
            OnEnter(AppState::SceneBuilding),
            (
                SceneBuildSet::Spawn,
                SceneBuildSet::Physics,
                SceneBuildSet::Validation,
            )
                .chain(),
        );

        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            transition_to_running.after(SceneBuildSet::Validation),
        );

        // --- 4. Runtime graph ---
        // Everything here runs before avian3d steps the world in `FixedPostUpdate`,
        // so velocities written by the recorder take effect on the same step.
        app.configure_sets(
            FixedUpdate,
            (RetraceSet::Input, RetraceSet::Recorder, RetraceSet::Movement)
                .chain()
                .run_if(in_state(AppState::Running)),
        );

        info!(
            "[SETUP] Fixed step at {} Hz, recorder: {:?}",
            config.simulation.physics_hz, config.recorder
        );
    }
}

/// Runs once at the end of the `OnEnter(SceneBuilding)` chain.
/// Its only job is to move the app into the main `Running` state.
fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("Scene building complete. Transitioning to Running state.");
    next_state.set(AppState::Running);
}
