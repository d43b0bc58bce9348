// retrace_sim/src/simulation/config/structs.rs

use bevy::prelude::{KeyCode, Resource, Transform};
use nalgebra::{UnitQuaternion, Vector3};
use retrace_core::prelude::{Pose, RecorderConfig};
use serde::Deserialize;

use super::serde_helpers;
use crate::simulation::core::transforms::pose_to_bevy_transform;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The primary Bevy resource holding all configuration for a run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
#[derive(Resource, Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    #[serde(default)]
    pub recorder: RecorderConfig,

    #[serde(default)]
    pub bindings: KeyBindings,

    #[serde(default)]
    pub body: BodyConfig,

    #[serde(default)]
    pub world: WorldConfig,
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in the scenario.toml file.
// =========================================================================

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Rate of the fixed physics step, which is also the recorder's tick rate.
    #[serde(default = "default_physics_hz")]
    pub physics_hz: f64,
}

fn default_physics_hz() -> f64 {
    60.0
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            physics_hz: default_physics_hz(),
        }
    }
}

/// Which keys drive the recorder. Values use Bevy's `KeyCode` names, e.g. `"KeyC"`.
#[derive(Resource, Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    /// Held to record.
    pub record: KeyCode,
    /// Held to play back.
    pub play: KeyCode,
    /// Toggles the recorded-path overlay.
    pub toggle_path: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            record: KeyCode::KeyC,
            play: KeyCode::KeyV,
            toggle_path: KeyCode::KeyP,
        }
    }
}

/// The recorded capsule body.
#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct BodyConfig {
    pub name: String,
    pub starting_pose: PoseConfig,
    pub radius: f32,
    /// Length of the capsule's cylindrical section.
    pub height: f32,
    pub mass: f32,
    /// Ground speed of the demo movement controller, in m/s.
    pub walk_speed: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            starting_pose: PoseConfig {
                translation: Vector3::new(0.0, 1.5, 0.0),
                rotation: UnitQuaternion::identity(),
            },
            radius: 0.4,
            height: 1.0,
            mass: 70.0,
            walk_speed: 5.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Number of static boxes scattered around the arena.
    pub obstacle_count: usize,
    /// Half the side length of the square ground plane, in meters.
    pub arena_half_extent: f32,
    /// Global gravity vector in m/s^2.
    pub gravity: [f32; 3],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            obstacle_count: 12,
            arena_half_extent: 20.0,
            gravity: [0.0, -9.81, 0.0],
        }
    }
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct PoseConfig {
    #[serde(
        with = "serde_helpers::vec3_f64_from_f32_array",
        default = "Vector3::zeros"
    )]
    pub translation: Vector3<f64>,

    #[serde(
        with = "serde_helpers::quat_f64_from_euler_deg_f32",
        default = "UnitQuaternion::identity"
    )]
    pub rotation: UnitQuaternion<f64>,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }
}

impl PoseConfig {
    pub fn to_pose(&self) -> Pose {
        Pose::new(self.translation, self.rotation)
    }

    pub fn to_bevy_transform(&self) -> Transform {
        pose_to_bevy_transform(&self.to_pose())
    }
}
