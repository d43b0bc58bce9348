// retrace_core/src/abstractions.rs

use nalgebra::{UnitQuaternion, Vector3};

use crate::{
    error::{CollaboratorRole, RecorderError},
    types::Pose,
};

// --- MOTION SOURCE TRAIT ---
/// The physically simulated body a recorder samples and replays.
/// The Bevy sim implements this over an avian3d rigid body; tests use a mock.
pub trait MotionSource {
    /// The body's current world pose.
    fn pose(&self) -> Pose;

    /// Moves the body toward an absolute pose through the physics step, so
    /// contacts are still resolved. Implementations must not teleport.
    fn move_to(&mut self, position: Vector3<f64>, orientation: UnitQuaternion<f64>);

    /// Clears both linear and angular velocity.
    ///
    /// The recorder calls this when playback starts and again when it stops, so
    /// the velocity of the last `move_to` does not outlive the replay. When the
    /// stop follows a `move_to` in the same tick, a source that moves by velocity
    /// should let that move land before coming to rest.
    fn zero_velocity(&mut self);
}

// --- MOVEMENT CONTROLLER TRAIT ---
/// The input-driven controller that is suspended while a path is replayed.
pub trait MovementController {
    fn set_enabled(&mut self, enabled: bool);
}

/// The pair of collaborators a recorder acts upon during one tick.
pub struct RecorderRig<'a> {
    pub source: &'a mut dyn MotionSource,
    pub controller: &'a mut dyn MovementController,
}

impl<'a> RecorderRig<'a> {
    pub fn new(
        source: &'a mut dyn MotionSource,
        controller: &'a mut dyn MovementController,
    ) -> Self {
        Self { source, controller }
    }

    /// Binds optional collaborators, failing on the first one that is absent.
    pub fn try_new(
        source: Option<&'a mut dyn MotionSource>,
        controller: Option<&'a mut dyn MovementController>,
    ) -> Result<Self, RecorderError> {
        let source = source.ok_or(RecorderError::missing(CollaboratorRole::MotionSource))?;
        let controller =
            controller.ok_or(RecorderError::missing(CollaboratorRole::MovementController))?;
        Ok(Self::new(source, controller))
    }
}
