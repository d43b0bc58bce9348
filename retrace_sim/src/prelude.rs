// retrace_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the retrace_core prelude so plugins can reach `PathRecorder`,
// `TriggerSignals`, `Pose` and friends directly.
pub use retrace_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::{AppState, RetraceSet, SceneBuildSet};
pub use crate::simulation::core::components::{
    HaltAfterStep, MovementControl, RecorderSignals, TrajectoryRecorder,
};
pub use crate::simulation::core::events::RecorderNotice;
pub use crate::simulation::plugins::debugging::ShowPathGizmos;
