// retrace_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. The scene is spawned from the config and checked.
    #[default]
    SceneBuilding,

    /// The scene is built. Recorders are driven every fixed step.
    Running,
}

/// System sets to control the order of execution during the SceneBuilding state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneBuildSet {
    /// Pass 1: Spawn the world and the recorded body.
    Spawn,

    /// Pass 2: Attach physical bodies (RigidBody, Collider).
    Physics,

    /// Pass 3: Check every recorder has the collaborators it needs.
    Validation,
}

/// Per-step order of the recorder pipeline inside `FixedUpdate`.
/// All three run before avian3d integrates velocities in `FixedPostUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RetraceSet {
    /// Move latched trigger edges into the fixed step.
    Input,
    /// Tick every `PathRecorder`.
    Recorder,
    /// External movement controllers write their velocities.
    Movement,
}
