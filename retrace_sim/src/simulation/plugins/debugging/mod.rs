use bevy::prelude::*;

// --- Sub-modules for organization ---
mod components;
mod systems;

// Re-export the public component for use in other plugins (like the world spawner).
pub use components::ShowPathGizmos;

use crate::prelude::AppState;

/// Draws recorded paths as gizmo lines. Needs Bevy's `GizmoPlugin`.
pub struct DebuggingPlugin;

impl Plugin for DebuggingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                // Global hotkey toggle
                systems::toggle_path_gizmos,
                // The actual drawing system
                systems::draw_recorded_paths,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}
