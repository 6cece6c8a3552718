use crate::{error::D3dError, trajectory::Trajectory, transform::Transform};

/// Metrics for comparing two transforms.
#[derive(Clone, Debug, Default)]
pub struct TransformMetrics {
    /// Angle between the two transforms in radians.
    pub angle: f32,
    /// Translation vector size between the two transforms.
    pub translation: f32,
}

impl TransformMetrics {
    /// Creates a new `TransformMetrics` from two transforms.
    pub fn new(lfs: &Transform, rhs: &Transform) -> Self {
        let diff = &lfs.inverse() * rhs;

        Self {
            angle: diff.angle(),
            translation: diff.translation().norm(),
        }
    }

    /// Mean absolute pose error over two index-corresponding trajectories.
    ///
    /// Register the trajectories first (for example with
    /// `Trajectory::first_frame_at_origin`) when they live in different
    /// world frames.
    pub fn mean_trajectory_error(
        est_trajectory: &Trajectory,
        gt_trajectory: &Trajectory,
    ) -> Result<Self, D3dError> {
        if est_trajectory.len() != gt_trajectory.len() {
            return Err(D3dError::invalid_parameter(
                "Estimate and GT trajectories have different lengths.",
            ));
        }
        if est_trajectory.is_empty() {
            return Err(D3dError::invalid_parameter("Trajectories are empty."));
        }

        let mut accum_metrics = TransformMetrics::default();
        for (est, gt) in est_trajectory.iter().zip(gt_trajectory.iter()) {
            let metrics = Self::new(&est.0, &gt.0);
            accum_metrics.angle += metrics.angle;
            accum_metrics.translation += metrics.translation;
        }

        let count = est_trajectory.len() as f32;
        accum_metrics.angle /= count;
        accum_metrics.translation /= count;
        Ok(accum_metrics)
    }

    /// Returns the total error of the two transforms.
    pub fn total(&self) -> f32 {
        self.angle + self.translation
    }
}

impl std::fmt::Display for TransformMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "angle: {:.2} deg, translation: {:.5}",
            self.angle.to_degrees(),
            self.translation
        )
    }
}
