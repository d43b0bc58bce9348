// retrace_core/src/trajectory.rs

use nalgebra::Vector3;

use crate::{
    interpolation::{lerp_vec3, slerp},
    types::Sample,
};

/// An ordered, append-only run of samples from one recording session.
///
/// Samples live in a single contiguous arena so a displacement can never get
/// out of step with its orientation.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of segments between consecutive samples.
    pub fn segment_count(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }

    /// A trajectory needs at least one segment to be replayed.
    pub fn is_playable(&self) -> bool {
        self.samples.len() >= 2
    }

    /// Blends segment `segment` (sample `segment` to `segment + 1`) at factor `t`.
    ///
    /// Returns `None` if the segment does not exist.
    pub fn interpolate(&self, segment: usize, t: f64) -> Option<Sample> {
        let start = self.samples.get(segment)?;
        let end = self.samples.get(segment + 1)?;
        Some(Sample::new(
            lerp_vec3(&start.displacement, &end.displacement, t),
            slerp(&start.orientation, &end.orientation, t),
        ))
    }

    /// Lazily yields the world-space line segments of the path replayed from `anchor`.
    pub fn world_segments(
        &self,
        anchor: Vector3<f64>,
    ) -> impl Iterator<Item = (Vector3<f64>, Vector3<f64>)> + '_ {
        self.samples
            .windows(2)
            .map(move |pair| (pair[0].world_position(&anchor), pair[1].world_position(&anchor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::UnitQuaternion;
    use std::f64::consts::FRAC_PI_2;

    fn straight_line(count: usize) -> Trajectory {
        let mut trajectory = Trajectory::new();
        for i in 0..count {
            trajectory.push(Sample::new(
                Vector3::new(i as f64, 0.0, 0.0),
                UnitQuaternion::from_axis_angle(&Vector3::y_axis(), i as f64 * 0.1),
            ));
        }
        trajectory
    }

    #[test]
    fn playability_needs_two_samples() {
        assert!(!straight_line(0).is_playable());
        assert!(!straight_line(1).is_playable());
        assert!(straight_line(2).is_playable());
        assert_eq!(straight_line(0).segment_count(), 0);
        assert_eq!(straight_line(5).segment_count(), 4);
    }

    #[test]
    fn interpolate_blends_displacement_and_orientation() {
        let trajectory = straight_line(3);
        let sample = trajectory.interpolate(1, 0.5).unwrap();
        assert_abs_diff_eq!(sample.displacement, Vector3::new(1.5, 0.0, 0.0), epsilon = 1e-12);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.15);
        assert!(sample.orientation.angle_to(&expected) < 1e-9);
    }

    #[test]
    fn interpolate_past_the_last_segment_is_none() {
        let trajectory = straight_line(3);
        assert!(trajectory.interpolate(2, 0.0).is_none());
        assert!(Trajectory::new().interpolate(0, 0.0).is_none());
    }

    #[test]
    fn interpolate_handles_quarter_turns() {
        let mut trajectory = Trajectory::new();
        trajectory.push(Sample::new(Vector3::zeros(), UnitQuaternion::identity()));
        trajectory.push(Sample::new(
            Vector3::zeros(),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        ));
        let end = trajectory.interpolate(0, 1.0).unwrap();
        assert_abs_diff_eq!(end.orientation.angle(), FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn world_segments_are_anchored() {
        let trajectory = straight_line(3);
        let anchor = Vector3::new(0.0, 2.0, 0.0);
        let segments: Vec<_> = trajectory.world_segments(anchor).collect();
        assert_eq!(segments.len(), 2);
        assert_abs_diff_eq!(segments[0].0, Vector3::new(0.0, 2.0, 0.0));
        assert_abs_diff_eq!(segments[1].1, Vector3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn world_segments_of_short_trajectories_are_empty() {
        assert_eq!(straight_line(0).world_segments(Vector3::zeros()).count(), 0);
        assert_eq!(straight_line(1).world_segments(Vector3::zeros()).count(), 0);
    }
}
