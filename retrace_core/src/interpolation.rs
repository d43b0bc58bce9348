// retrace_core/src/interpolation.rs

//! Interpolation helpers shared by the trajectory and the player.

use nalgebra::{UnitQuaternion, Vector3};

/// Below this angle between two rotations the slerp weights become unstable,
/// so we fall back to a normalized linear blend.
const SLERP_EPSILON: f64 = 1e-6;

/// Clamps `t` into `[0, 1]`. NaN maps to 0.
pub fn clamp01(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Linear interpolation between two vectors. `t` is clamped.
pub fn lerp_vec3(a: &Vector3<f64>, b: &Vector3<f64>, t: f64) -> Vector3<f64> {
    a.lerp(b, clamp01(t))
}

/// Spherical interpolation along the shortest arc. `t` is clamped.
///
/// `try_slerp` gives up when the half-angle between the inputs is too small to
/// divide by; those pairs are blended with `nlerp` on the same hemisphere.
pub fn slerp(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>, t: f64) -> UnitQuaternion<f64> {
    let t = clamp01(t);
    match a.try_slerp(b, t, SLERP_EPSILON) {
        Some(q) => q,
        None => {
            // Put `b` on the same hemisphere as `a` so the blend takes the short way.
            let b_same_side = if a.coords.dot(&b.coords) < 0.0 {
                UnitQuaternion::new_unchecked(-b.into_inner())
            } else {
                *b
            };
            a.nlerp(&b_same_side, t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(3.0), 1.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
    }

    #[test]
    fn lerp_vec3_midpoint_and_clamping() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(2.0, -4.0, 6.0);
        assert_abs_diff_eq!(lerp_vec3(&a, &b, 0.5), Vector3::new(1.0, -2.0, 3.0));
        assert_abs_diff_eq!(lerp_vec3(&a, &b, 1.5), b);
        assert_abs_diff_eq!(lerp_vec3(&a, &b, -1.0), a);
    }

    #[test]
    fn slerp_halfway_between_yaws() {
        let a = UnitQuaternion::identity();
        let b = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let mid = slerp(&a, &b, 0.5);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2 / 2.0);
        assert!(mid.angle_to(&expected) < 1e-9);
    }

    #[test]
    fn slerp_of_identical_rotations_is_that_rotation() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.3);
        let out = slerp(&q, &q, 0.7);
        assert!(out.angle_to(&q) < 1e-9);
        assert!(out.coords.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn slerp_of_half_turn_stays_finite() {
        let a = UnitQuaternion::identity();
        let b = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI);
        let out = slerp(&a, &b, 0.5);
        assert!(out.coords.iter().all(|c| c.is_finite()));
        assert_abs_diff_eq!(out.into_inner().norm(), 1.0, epsilon = 1e-9);
    }
}
