use bevy::prelude::*;

use super::components::ShowPathGizmos;
use crate::prelude::*;
use crate::simulation::core::transforms::{bevy_transform_to_pose, vector3_to_bevy_vec3};

const PATH_COLOR: Color = Color::srgb(1.0, 0.9, 0.1);

// =========================================================================
// == Toggle Systems (Hotkeys) ==
// =========================================================================

/// Toggles `ShowPathGizmos` on every recorded body with the configured key.
pub fn toggle_path_gizmos(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    query: Query<(Entity, Has<ShowPathGizmos>), With<TrajectoryRecorder>>,
) {
    if keyboard.just_pressed(bindings.toggle_path) {
        // If any were on, turn them all off.
        let are_any_on = query.iter().any(|(_, shown)| shown);
        for (entity, shown) in &query {
            if are_any_on && shown {
                commands.entity(entity).remove::<ShowPathGizmos>();
            } else if !are_any_on {
                commands.entity(entity).insert(ShowPathGizmos);
            }
        }
        info!(
            "[Debug] Toggled recorded path visuals {}",
            if are_any_on { "OFF" } else { "ON" }
        );
    }
}

// =========================================================================
// == Drawing Systems ==
// =========================================================================

/// Draws the stored trajectory of every body with `ShowPathGizmos`.
/// While a replay runs, a gimbal marks the body as well.
pub fn draw_recorded_paths(
    mut gizmos: Gizmos,
    query: Query<(&TrajectoryRecorder, &GlobalTransform), With<ShowPathGizmos>>,
) {
    for (recorder, transform) in &query {
        let live = bevy_transform_to_pose(&transform.compute_transform());
        for (start, end) in recorder.0.path_segments(live.position) {
            gizmos.line(
                vector3_to_bevy_vec3(&start),
                vector3_to_bevy_vec3(&end),
                PATH_COLOR,
            );
        }

        if recorder.0.state() == RecorderState::Playing {
            gizmos.axes(*transform, 0.8);
        }
    }
}
