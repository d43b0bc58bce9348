// retrace_sim/src/simulation/core/motion.rs

use avian3d::prelude::{AngularVelocity, LinearVelocity, Position, Rotation};
use bevy::prelude::Vec3;
use nalgebra::{UnitQuaternion, Vector3};
use retrace_core::prelude::{MotionSource, Pose};

use super::transforms::{bevy_parts_to_pose, vector3_to_bevy_vec3};

/// Steps shorter than this cannot carry a body anywhere.
const MIN_STEP: f64 = 1e-6;

/// Velocities that carry `current` onto the target pose over one step of `dt`.
///
/// The angular part takes the shortest rotation between the two orientations.
pub fn velocities_toward(
    current: &Pose,
    target_position: &Vector3<f64>,
    target_orientation: &UnitQuaternion<f64>,
    dt: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    if !dt.is_finite() || dt < MIN_STEP {
        return (Vector3::zeros(), Vector3::zeros());
    }
    let linear = (target_position - current.position) / dt;
    let delta = target_orientation * current.orientation.inverse();
    let angular = delta.scaled_axis() / dt;
    (linear, angular)
}

/// A `MotionSource` over an avian3d rigid body for the duration of one fixed step.
///
/// `move_to` never writes `Position`; it sets the velocities the solver needs to
/// reach the target by the end of the step, so contacts still stop the body.
/// A `zero_velocity` after a `move_to` in the same step keeps the move and
/// reports `halt_requested` instead; the caller clears the velocity once the
/// step has been integrated.
pub struct PhysicsBodyMotion<'a> {
    position: &'a Position,
    rotation: &'a Rotation,
    linear_velocity: &'a mut LinearVelocity,
    angular_velocity: &'a mut AngularVelocity,
    dt: f64,
    moved: bool,
    halt_requested: bool,
}

impl<'a> PhysicsBodyMotion<'a> {
    pub fn new(
        position: &'a Position,
        rotation: &'a Rotation,
        linear_velocity: &'a mut LinearVelocity,
        angular_velocity: &'a mut AngularVelocity,
        dt: f64,
    ) -> Self {
        Self {
            position,
            rotation,
            linear_velocity,
            angular_velocity,
            dt,
            moved: false,
            halt_requested: false,
        }
    }

    /// Whether the body must be stopped after this step's move has landed.
    pub fn halt_requested(&self) -> bool {
        self.halt_requested
    }
}

impl MotionSource for PhysicsBodyMotion<'_> {
    fn pose(&self) -> Pose {
        bevy_parts_to_pose(&self.position.0, &self.rotation.0)
    }

    fn move_to(&mut self, position: Vector3<f64>, orientation: UnitQuaternion<f64>) {
        let (linear, angular) = velocities_toward(&self.pose(), &position, &orientation, self.dt);
        self.linear_velocity.0 = vector3_to_bevy_vec3(&linear);
        self.angular_velocity.0 = vector3_to_bevy_vec3(&angular);
        self.moved = true;
        self.halt_requested = false;
    }

    fn zero_velocity(&mut self) {
        if self.moved {
            self.halt_requested = true;
            return;
        }
        self.linear_velocity.0 = Vec3::ZERO;
        self.angular_velocity.0 = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::prelude::Quat;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn linear_velocity_covers_the_gap_in_one_step() {
        let current = Pose::new(Vector3::new(1.0, 0.0, 0.0), UnitQuaternion::identity());
        let (linear, angular) = velocities_toward(
            &current,
            &Vector3::new(1.5, 0.0, -0.25),
            &UnitQuaternion::identity(),
            0.5,
        );
        assert_relative_eq!(linear, Vector3::new(1.0, 0.0, -0.5), epsilon = 1e-12);
        assert_relative_eq!(angular, Vector3::<f64>::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn angular_velocity_takes_the_short_way_round() {
        let current = Pose::new(
            Vector3::zeros(),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.9 * std::f64::consts::PI),
        );
        let target = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -0.9 * std::f64::consts::PI);
        let (_, angular) = velocities_toward(&current, &Vector3::zeros(), &target, 1.0);
        // 0.9π to -0.9π is 0.2π forward through ±π, not 1.8π back.
        assert_relative_eq!(angular, Vector3::new(0.0, 0.2 * std::f64::consts::PI, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn degenerate_steps_produce_no_motion() {
        let current = Pose::identity();
        for dt in [0.0, -1.0, f64::NAN] {
            let (linear, angular) =
                velocities_toward(&current, &Vector3::x(), &UnitQuaternion::identity(), dt);
            assert_eq!(linear, Vector3::zeros());
            assert_eq!(angular, Vector3::zeros());
        }
    }

    #[test]
    fn physics_body_motion_writes_velocities_only() {
        let position = Position(Vec3::new(0.0, 1.0, 0.0));
        let rotation = Rotation(Quat::IDENTITY);
        let mut linear = LinearVelocity(Vec3::new(3.0, 0.0, 0.0));
        let mut angular = AngularVelocity(Vec3::ZERO);

        let mut motion =
            PhysicsBodyMotion::new(&position, &rotation, &mut linear, &mut angular, 0.1);
        motion.move_to(
            Vector3::new(0.5, 1.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2 * 0.1),
        );
        assert_relative_eq!(motion.pose().position.y, 1.0, epsilon = 1e-6);

        assert_relative_eq!(linear.0.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(angular.0.y, (FRAC_PI_2) as f32, epsilon = 1e-4);
        assert_eq!(position.0, Vec3::new(0.0, 1.0, 0.0));

        let mut motion =
            PhysicsBodyMotion::new(&position, &rotation, &mut linear, &mut angular, 0.1);
        motion.zero_velocity();
        assert!(!motion.halt_requested());
        assert_eq!(linear.0, Vec3::ZERO);
        assert_eq!(angular.0, Vec3::ZERO);
    }

    #[test]
    fn stopping_right_after_a_move_defers_the_halt() {
        let position = Position(Vec3::ZERO);
        let rotation = Rotation(Quat::IDENTITY);
        let mut linear = LinearVelocity(Vec3::ZERO);
        let mut angular = AngularVelocity(Vec3::ZERO);

        let mut motion =
            PhysicsBodyMotion::new(&position, &rotation, &mut linear, &mut angular, 0.1);
        motion.move_to(Vector3::new(0.2, 0.0, 0.0), UnitQuaternion::identity());
        motion.zero_velocity();
        assert!(motion.halt_requested());

        // The final move still lands this step.
        assert_relative_eq!(linear.0.x, 2.0, epsilon = 1e-5);
    }
}
