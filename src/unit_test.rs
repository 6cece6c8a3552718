use nalgebra::{UnitQuaternion, Vector3};

use crate::{trajectory::Trajectory, transform::Transform};

/// Poses along the positive x axis, `step` length units apart, all with
/// identity rotation.
pub(crate) fn straight_line_trajectory(num_poses: usize, step: f32) -> Trajectory {
    (0..num_poses)
        .map(|i| {
            (
                Transform::from_parts(
                    Vector3::new(step * i as f32, 0.0, 0.0),
                    UnitQuaternion::identity(),
                ),
                i as f32,
            )
        })
        .collect()
}

/// Poses on a circle of the given radius in the xy plane, headings tangent
/// to the circle.
pub(crate) fn circle_trajectory(num_poses: usize, radius: f32) -> Trajectory {
    (0..num_poses)
        .map(|i| {
            let theta = 2.0 * std::f32::consts::PI * i as f32 / num_poses as f32;
            (
                Transform::from_parts(
                    Vector3::new(radius * theta.cos(), radius * theta.sin(), 0.0),
                    UnitQuaternion::from_scaled_axis(
                        Vector3::z() * (theta + std::f32::consts::FRAC_PI_2),
                    ),
                ),
                i as f32,
            )
        })
        .collect()
}

/// Uniformly scales every position of the trajectory, leaving rotations and
/// timestamps untouched.
pub(crate) fn scale_positions(trajectory: &Trajectory, factor: f32) -> Trajectory {
    trajectory
        .iter()
        .map(|(pose, time)| {
            (
                Transform::from_parts(pose.translation() * factor, pose.rotation()),
                time,
            )
        })
        .collect()
}
