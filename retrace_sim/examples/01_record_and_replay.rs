// retrace_sim/examples/01_record_and_replay.rs

//! Record a body's motion and replay it from wherever the body stands.
//!
//! This example demonstrates how to:
//! 1. Load a scenario from a TOML file given on the command line.
//! 2. Set up Bevy and avian3d, with or without a window.
//! 3. Add `RetraceSimulationPlugin`, which spawns the scene and drives the recorder.
//! 4. Steer the body with WASD through its `MovementControl`.
//!
//! Hold `C` to record, release it, walk somewhere else, then hold `V` to replay.
//! `P` toggles the path overlay.
//!
//! To run this example:
//! `cargo run --example 01_record_and_replay`
//! `cargo run --example 01_record_and_replay -- --headless`

use std::collections::VecDeque;
use std::time::Duration;

// --- Bevy Imports ---
use avian3d::prelude::*;
use bevy::{
    app::ScheduleRunnerPlugin, asset::AssetPlugin, input::InputPlugin, log::LogPlugin,
    prelude::*, scene::ScenePlugin, state::app::StatesPlugin, transform::TransformPlugin,
};
use clap::Parser;

// --- Project-Specific Imports ---
use retrace_sim::cli::Cli;
use retrace_sim::prelude::{KeyBindings, MovementControl, RetraceSet};
use retrace_sim::simulation::config::load_scenario;
use retrace_sim::RetraceSimulationPlugin;

const LOG_FILTER: &str = "info,wgpu_core=error,wgpu_hal=error,retrace_sim=info,retrace_core=info";

fn main() {
    let cli = Cli::parse();

    // --- 1. Load Simulation Configuration ---
    println!("Loading scenario from: {}", cli.scenario.display());
    let config = load_scenario(&cli.scenario).unwrap_or_else(|err| {
        panic!("Failed to load scenario: {}", err);
    });
    let physics_hz = config.simulation.physics_hz;

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    if cli.headless {
        app.add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / physics_hz,
            ))),
            LogPlugin {
                filter: LOG_FILTER.to_string(),
                ..default()
            },
            TransformPlugin,
            StatesPlugin,
            InputPlugin,
            AssetPlugin::default(),
            ScenePlugin,
        ))
        // avian3d builds colliders from meshes, so the asset type must exist.
        .init_asset::<Mesh>()
        .insert_resource(ScriptedSession::demo())
        .add_systems(FixedUpdate, run_scripted_session.in_set(RetraceSet::Input));
    } else {
        app.add_plugins(DefaultPlugins.set(LogPlugin {
            level: bevy::log::Level::INFO,
            filter: LOG_FILTER.to_string(),
            ..default()
        }))
        // An avian3d plugin to visualize colliders for debugging.
        .add_plugins(PhysicsDebugPlugin::default());
    }

    app
        // The avian3d physics plugins.
        .add_plugins(PhysicsPlugins::default())
        // Insert the loaded configuration as a Bevy resource so all systems can access it.
        .insert_resource(cli.clone())
        .insert_resource(config);

    // --- 3. Add the Main Simulation Plugin ---
    app.add_plugins(RetraceSimulationPlugin);

    // --- 4. Add Example-Specific Systems ---
    // The external movement controller. It only steers while the recorder lets it.
    app.add_systems(
        FixedUpdate,
        keyboard_controller.in_set(RetraceSet::Movement),
    );

    // --- 5. Run the App ---
    println!("Starting retrace simulation...");
    app.run();
}

/// Walks every enabled body on the ground plane with WASD.
fn keyboard_controller(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&MovementControl, &mut LinearVelocity, &mut AngularVelocity)>,
) {
    let mut direction = Vec3::ZERO;
    if keyboard_input.pressed(KeyCode::KeyW) {
        direction.z -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyS) {
        direction.z += 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    let direction = direction.normalize_or_zero();

    for (control, mut lin_vel, mut ang_vel) in &mut query {
        if !control.enabled {
            continue;
        }
        // Gravity keeps the vertical component.
        lin_vel.x = direction.x * control.speed;
        lin_vel.z = direction.z * control.speed;
        ang_vel.0 = Vec3::ZERO;
    }
}

// =========================================================================
// == Headless Script ==
// =========================================================================

#[derive(Debug, Clone, Copy)]
enum ScriptStep {
    Press(ScriptKey),
    Release(ScriptKey),
    Exit,
}

#[derive(Debug, Clone, Copy)]
enum ScriptKey {
    Record,
    Play,
    Walk(KeyCode),
}

/// Key presses at fixed-clock times, standing in for a player.
#[derive(Resource)]
struct ScriptedSession {
    steps: VecDeque<(f32, ScriptStep)>,
}

impl ScriptedSession {
    /// Record a 1.5 s walk east, walk north, then replay the eastward walk.
    fn demo() -> Self {
        use ScriptKey::*;
        use ScriptStep::*;
        Self {
            steps: VecDeque::from([
                (0.5, Press(Walk(KeyCode::KeyD))),
                (0.5, Press(Record)),
                (2.0, Release(Record)),
                (2.0, Release(Walk(KeyCode::KeyD))),
                (2.2, Press(Walk(KeyCode::KeyW))),
                (3.2, Release(Walk(KeyCode::KeyW))),
                (3.5, Press(Play)),
                (5.5, Release(Play)),
                (6.0, Exit),
            ]),
        }
    }
}

fn run_scripted_session(
    time: Res<Time>,
    bindings: Res<KeyBindings>,
    mut script: ResMut<ScriptedSession>,
    mut keyboard: ResMut<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    let now = time.elapsed_secs();
    while let Some(&(at, step)) = script.steps.front() {
        if at > now {
            break;
        }
        script.steps.pop_front();

        let key_code = |key: ScriptKey| match key {
            ScriptKey::Record => bindings.record,
            ScriptKey::Play => bindings.play,
            ScriptKey::Walk(code) => code,
        };
        match step {
            ScriptStep::Press(key) => keyboard.press(key_code(key)),
            ScriptStep::Release(key) => keyboard.release(key_code(key)),
            ScriptStep::Exit => {
                info!("Scripted session finished.");
                exit.write(AppExit::Success);
            }
        }
    }
}
