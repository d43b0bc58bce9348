// retrace_sim/src/simulation/plugins/recorder/mod.rs

use bevy::prelude::*;

mod systems;

pub use systems::{collaborator_error, edges_from_input};

use crate::prelude::{AppState, RetraceSet, SceneBuildSet};

/// Drives every `TrajectoryRecorder` from the keyboard and the fixed physics step.
pub struct RecorderPlugin;

impl Plugin for RecorderPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fail fast if a recorder was spawned without its collaborators.
            .add_systems(
                OnEnter(AppState::SceneBuilding),
                systems::check_collaborators.in_set(SceneBuildSet::Validation),
            )
            // Edges are latched every frame so none fall between fixed steps.
            .add_systems(
                Update,
                (
                    systems::latch_recorder_signals.run_if(in_state(AppState::Running)),
                    systems::log_recorder_notices,
                ),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::settle_finished_replays.in_set(RetraceSet::Input),
                    systems::drive_trajectory_recorders.in_set(RetraceSet::Recorder),
                ),
            );
    }
}
