use itertools::izip;
use num::Float;

use crate::{optim::GaussNewton, transform::Transform};

/// Least-squares pose alignment capability.
///
/// Given index-aligned windows of a ground-truth and an estimated trajectory
/// and an initial guess of the relative transform between their first frames,
/// an implementation returns a refined relative transform. The evaluation
/// core only depends on this contract, so external solvers can be plugged in.
pub trait PoseAligner {
    /// Refines `initial`, the relative transform `T_A0_B0` between the first
    /// ground-truth and estimate pose of the window.
    ///
    /// # Arguments
    ///
    /// * `initial` - Initial relative transform guess.
    /// * `world_from_gt` - Ground-truth pose window.
    /// * `world_from_es` - Estimate pose window, same length.
    fn refine(
        &self,
        initial: &Transform,
        world_from_gt: &[Transform],
        world_from_es: &[Transform],
    ) -> Transform;
}

/// Gauss Newton refinement of the relative transform over a pose window.
///
/// Minimizes the sigma-weighted position and rotation discrepancy between
/// `T_W_gt[i] · T` and `T_W_es[i]` over the window.
pub struct GaussNewtonPoseAligner {
    /// Position measurement sigma, in trajectory length units.
    pub sigma_position: f32,
    /// Rotation measurement sigma, in radians.
    pub sigma_rotation: f32,
    /// Maximum number of Gauss Newton iterations.
    pub max_iterations: usize,
}

impl Default for GaussNewtonPoseAligner {
    fn default() -> Self {
        Self {
            sigma_position: 0.05,
            sigma_rotation: 5.0_f32.to_radians(),
            max_iterations: 10,
        }
    }
}

impl PoseAligner for GaussNewtonPoseAligner {
    fn refine(
        &self,
        initial: &Transform,
        world_from_gt: &[Transform],
        world_from_es: &[Transform],
    ) -> Transform {
        debug_assert_eq!(world_from_gt.len(), world_from_es.len());

        let weight_position = 1.0 / self.sigma_position;
        let weight_rotation = 1.0 / self.sigma_rotation;

        let mut aligned = initial.clone();
        let mut optimizer = GaussNewton::<6>::new();

        let mut best_residual = Float::infinity();
        let mut best_transform = aligned.clone();
        for _ in 0..self.max_iterations {
            let aligned_inv = aligned.inverse();
            for (t_w_gt, t_w_es) in izip!(world_from_gt.iter(), world_from_es.iter()) {
                // Discrepancy of this pose pair, expressed relative to the
                // current relative-transform iterate.
                let discrepancy = &(&aligned_inv * &t_w_gt.inverse()) * t_w_es;
                let translation_residual = discrepancy.translation();
                let rotation_residual = discrepancy.rotation_log();

                for axis in 0..3 {
                    let mut jacobian = [0.0_f32; 6];
                    jacobian[axis] = weight_position;
                    optimizer.step(translation_residual[axis] * weight_position, &jacobian);

                    let mut jacobian = [0.0_f32; 6];
                    jacobian[axis + 3] = weight_rotation;
                    optimizer.step(rotation_residual[axis] * weight_rotation, &jacobian);
                }
            }

            let residual = optimizer.mean_squared_residual();
            let update = match optimizer.solve() {
                Some(update) => update,
                None => break,
            };
            aligned = &aligned * &Transform::from_se3_exp(&update);
            optimizer.reset();

            if residual < best_residual {
                best_residual = residual;
                best_transform = aligned.clone();
            }

            if update.norm() < 1e-6 {
                break;
            }
        }

        best_transform
    }
}
