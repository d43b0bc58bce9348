// retrace_core/src/types.rs

use nalgebra::{UnitQuaternion, Vector3};

// --- Core Identifier ---
/// An engine-agnostic identifier for the body that owns a recorder.
/// In the Bevy sim, we use the bits of the Entity ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BodyHandle(pub u64);

impl BodyHandle {
    // A convenience method for use in the Bevy adapter crate.
    #[cfg(feature = "bevy")] // This will only compile if the "bevy" feature is enabled
    pub fn from_entity(entity: bevy_ecs::prelude::Entity) -> Self {
        Self(entity.to_bits())
    }
}

impl std::fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// A world-frame position and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), UnitQuaternion::identity())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// One recorded point of a trajectory.
///
/// `displacement` is relative to the position the body had when the recording
/// session began; `orientation` is absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub displacement: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Sample {
    pub fn new(displacement: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            displacement,
            orientation,
        }
    }

    /// Captures `current` relative to `anchor`.
    pub fn relative_to(anchor: &Pose, current: &Pose) -> Self {
        Self::new(current.position - anchor.position, current.orientation)
    }

    /// The world position this sample maps to when replayed from `anchor`.
    pub fn world_position(&self, anchor: &Vector3<f64>) -> Vector3<f64> {
        anchor + self.displacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sample_is_relative_to_anchor_and_replays_from_any_anchor() {
        let anchor = Pose::new(Vector3::new(10.0, 0.0, 0.0), UnitQuaternion::identity());
        let current = Pose::new(Vector3::new(12.0, 1.0, -1.0), UnitQuaternion::identity());
        let sample = Sample::relative_to(&anchor, &current);
        assert_abs_diff_eq!(sample.displacement, Vector3::new(2.0, 1.0, -1.0));

        let replayed = sample.world_position(&Vector3::new(-5.0, 0.0, 0.0));
        assert_abs_diff_eq!(replayed, Vector3::new(-3.0, 1.0, -1.0));
    }
}
