// retrace_sim/src/simulation/core/transforms.rs

//! Conversions between Bevy's f32 types and the f64 nalgebra types used by
//! `retrace_core`. Both sides share Bevy's Y-up, right-handed world frame, so
//! no axis swaps happen here.

use bevy::prelude::{Quat as BevyQuat, Transform as BevyTransform, Vec3 as BevyVec3};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use retrace_core::prelude::Pose;

pub fn bevy_vec3_to_vector3(v: &BevyVec3) -> Vector3<f64> {
    Vector3::new(v.x as f64, v.y as f64, v.z as f64)
}

pub fn vector3_to_bevy_vec3(v: &Vector3<f64>) -> BevyVec3 {
    BevyVec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Renormalizes on the way in; f32 quaternions drift off the unit sphere.
pub fn bevy_quat_to_unit_quaternion(q: &BevyQuat) -> UnitQuaternion<f64> {
    UnitQuaternion::from_quaternion(Quaternion::new(
        q.w as f64, q.x as f64, q.y as f64, q.z as f64,
    ))
}

pub fn unit_quaternion_to_bevy_quat(q: &UnitQuaternion<f64>) -> BevyQuat {
    let q = q.quaternion();
    BevyQuat::from_xyzw(q.i as f32, q.j as f32, q.k as f32, q.w as f32).normalize()
}

pub fn bevy_parts_to_pose(translation: &BevyVec3, rotation: &BevyQuat) -> Pose {
    Pose::new(
        bevy_vec3_to_vector3(translation),
        bevy_quat_to_unit_quaternion(rotation),
    )
}

/// Converts a Bevy `Transform` into a core `Pose`. Scale is dropped.
pub fn bevy_transform_to_pose(transform: &BevyTransform) -> Pose {
    bevy_parts_to_pose(&transform.translation, &transform.rotation)
}

pub fn pose_to_bevy_transform(pose: &Pose) -> BevyTransform {
    BevyTransform {
        translation: vector3_to_bevy_vec3(&pose.position),
        rotation: unit_quaternion_to_bevy_quat(&pose.orientation),
        ..Default::default()
    }
}

// =========================================================================
// == Unit Tests ==
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    fn assert_bevy_quat_approx_eq(q1: &BevyQuat, q2: &BevyQuat, epsilon: f32) {
        // q and -q encode the same rotation
        let dot = q1.dot(*q2).abs();
        assert!(
            (dot - 1.0).abs() < epsilon,
            "Quaternions differ: q1={:?}, q2={:?} (|dot|={})",
            q1,
            q2,
            dot
        );
    }

    #[test]
    fn test_identity_transform_is_identity_pose() {
        let pose = bevy_transform_to_pose(&BevyTransform::IDENTITY);
        assert_relative_eq!(pose.position, Vector3::<f64>::zeros());
        assert_relative_eq!(pose.orientation.angle(), 0.0);
    }

    #[test]
    fn test_vectors_round_trip() {
        let v = BevyVec3::new(1.5, -2.0, 3.25);
        let back = vector3_to_bevy_vec3(&bevy_vec3_to_vector3(&v));
        assert!((v - back).length() < EPSILON);
    }

    #[test]
    fn test_yaw_about_y_is_preserved() {
        let bevy_q = BevyQuat::from_rotation_y(FRAC_PI_2);
        let na_q = bevy_quat_to_unit_quaternion(&bevy_q);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(na_q.angle_to(&expected), 0.0, epsilon = 1e-6);

        let back = unit_quaternion_to_bevy_quat(&na_q);
        assert_bevy_quat_approx_eq(&bevy_q, &back, EPSILON);
    }

    #[test]
    fn test_pose_to_transform_and_back() {
        let pose = Pose::new(
            Vector3::new(4.0, 1.0, -2.0),
            UnitQuaternion::from_euler_angles(0.1, 0.7, -0.3),
        );
        let transform = pose_to_bevy_transform(&pose);
        assert_eq!(transform.scale, BevyVec3::ONE);

        let back = bevy_transform_to_pose(&transform);
        assert_relative_eq!(back.position, pose.position, epsilon = 1e-5);
        assert_relative_eq!(back.orientation.angle_to(&pose.orientation), 0.0, epsilon = 1e-5);
    }
}
