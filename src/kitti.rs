//! KITTI-style relative pose error evaluation.
//!
//! Compares an estimated trajectory against a ground-truth trajectory by
//! matching segments of nominal arc length at many start positions and
//! decomposing the end-of-segment discrepancy into translation, rotation and
//! scale drift. Repeating the evaluation over a set of segment lengths gives
//! the usual error-vs-distance curves.

use nalgebra::Vector3;
use rayon::prelude::*;
use serde_derive::Serialize;

use crate::{
    align::{GaussNewtonPoseAligner, PoseAligner},
    error::D3dError,
    trajectory::Trajectory,
};

/// Relative pose error of a single matched trajectory segment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RelativeError {
    /// Start index of the segment.
    pub first_frame: usize,
    /// Translation error at the segment end, rotated into the world frame.
    pub translation_error: Vector3<f32>,
    /// Rotation error at the segment end as an axis-angle vector, rotated
    /// into the world frame.
    pub rotation_error: Vector3<f32>,
    /// Nominal segment length the segment was matched against.
    pub segment_length: f32,
    /// Ratio of estimated to ground-truth arc length over the segment.
    /// 1.0 means no scale drift.
    pub scale_error: f32,
    /// Number of frames the segment spans, both ends inclusive.
    pub num_frames: usize,
}

/// All relative errors evaluated for one nominal segment length.
#[derive(Clone, Debug, Serialize)]
pub struct SegmentErrors {
    pub segment_length: f32,
    pub errors: Vec<RelativeError>,
}

/// Parameters of the sequence evaluation.
#[derive(Clone, Copy, Debug)]
pub struct EvalParams {
    /// Number of frames between evaluated segment start positions.
    pub skip_frames: usize,
    /// Refine each segment's initial relative transform with a least-squares
    /// pose alignment over the beginning of the segment.
    pub use_least_squares_alignment: bool,
    /// Fraction in (0, 1] of each segment used as the alignment window.
    pub least_squares_align_range: f32,
    /// Align positions only, ignoring rotations. Not implemented; selecting
    /// it fails the run instead of silently computing a wrong result.
    pub least_squares_align_translation_only: bool,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            skip_frames: 10,
            use_least_squares_alignment: false,
            least_squares_align_range: 1.0,
            least_squares_align_translation_only: false,
        }
    }
}

/// Returns the first index after `first_frame` whose cumulative distance
/// exceeds the distance at `first_frame` plus `segment_length`, or `None`
/// when the remaining trajectory is shorter than the segment.
///
/// The comparison is strict, so a point exactly at the target length is not
/// selected; the next farther one is.
pub fn last_frame_from_segment_length(
    dist: &[f32],
    first_frame: usize,
    segment_length: f32,
) -> Option<usize> {
    let target = dist[first_frame] + segment_length;
    (first_frame..dist.len()).find(|&i| dist[i] > target)
}

/// Evaluates relative pose errors of an estimated trajectory against a
/// ground-truth trajectory.
pub struct KittiEvaluator<A: PoseAligner = GaussNewtonPoseAligner> {
    pub params: EvalParams,
    aligner: A,
}

impl KittiEvaluator {
    /// Creates an evaluator with the built-in Gauss Newton pose aligner.
    pub fn new(params: EvalParams) -> Self {
        Self {
            params,
            aligner: GaussNewtonPoseAligner::default(),
        }
    }
}

impl Default for KittiEvaluator {
    fn default() -> Self {
        Self::new(EvalParams::default())
    }
}

impl<A: PoseAligner + Sync> KittiEvaluator<A> {
    /// Creates an evaluator that delegates alignment to an external solver.
    pub fn with_aligner(params: EvalParams, aligner: A) -> Self {
        Self { params, aligner }
    }

    /// Computes relative errors for every segment start position.
    ///
    /// Start frames advance by `skip_frames`. Start positions whose remaining
    /// ground-truth arc length is shorter than `segment_length` are skipped;
    /// the returned records keep ascending `first_frame` order.
    ///
    /// # Arguments
    ///
    /// * `t_w_a` - Ground-truth trajectory.
    /// * `t_w_b` - Estimated trajectory, same length, index-corresponding.
    /// * `segment_length` - Nominal segment arc length, greater than zero.
    pub fn calc_sequence_errors(
        &self,
        t_w_a: &Trajectory,
        t_w_b: &Trajectory,
        segment_length: f32,
    ) -> Result<Vec<RelativeError>, D3dError> {
        self.validate(t_w_a, t_w_b, segment_length)?;

        // Cumulative distances, with ground truth as the reference for
        // segment matching.
        let dist_gt = t_w_a.distances();
        let dist_es = t_w_b.distances();

        // Each start frame only reads shared immutable data, so the map is
        // evaluated in parallel and collected in order.
        let errors = (0..t_w_a.len())
            .into_par_iter()
            .step_by(self.params.skip_frames)
            .filter_map(|first_frame| {
                self.calc_segment_error(
                    t_w_a,
                    t_w_b,
                    &dist_gt,
                    &dist_es,
                    first_frame,
                    segment_length,
                )
            })
            .collect();
        Ok(errors)
    }

    /// Runs `calc_sequence_errors` for every nominal segment length.
    pub fn evaluate(
        &self,
        t_w_a: &Trajectory,
        t_w_b: &Trajectory,
        segment_lengths: &[f32],
    ) -> Result<Vec<SegmentErrors>, D3dError> {
        segment_lengths
            .iter()
            .map(|&segment_length| {
                Ok(SegmentErrors {
                    segment_length,
                    errors: self.calc_sequence_errors(t_w_a, t_w_b, segment_length)?,
                })
            })
            .collect()
    }

    fn validate(
        &self,
        t_w_a: &Trajectory,
        t_w_b: &Trajectory,
        segment_length: f32,
    ) -> Result<(), D3dError> {
        if t_w_a.len() != t_w_b.len() {
            return Err(D3dError::invalid_parameter(
                "Ground-truth and estimate trajectories have different lengths.",
            ));
        }
        if self.params.skip_frames == 0 {
            return Err(D3dError::invalid_parameter("skip_frames must be >= 1."));
        }
        if segment_length <= 0.0 {
            return Err(D3dError::invalid_parameter(
                "segment_length must be greater than zero.",
            ));
        }
        if self.params.use_least_squares_alignment {
            if self.params.least_squares_align_translation_only {
                return Err(D3dError::unsupported(
                    "Translation-only least-squares alignment is not implemented.",
                ));
            }
            let range = self.params.least_squares_align_range;
            if !(range > 0.0 && range <= 1.0) {
                return Err(D3dError::invalid_parameter(
                    "least_squares_align_range must be in (0, 1].",
                ));
            }
        }
        Ok(())
    }

    /// Evaluates one segment starting at `first_frame`, or `None` when the
    /// remaining trajectory is shorter than the segment. Pure per-start
    /// function; iterations share no mutable state.
    fn calc_segment_error(
        &self,
        t_w_a: &Trajectory,
        t_w_b: &Trajectory,
        dist_gt: &[f32],
        dist_es: &[f32],
        first_frame: usize,
        segment_length: f32,
    ) -> Option<RelativeError> {
        let last_frame = last_frame_from_segment_length(dist_gt, first_frame, segment_length)?;

        // Initial relative transform between the segment's first frames,
        // optionally refined over the first part of the segment.
        let mut t_a0_b0 = &t_w_a[first_frame].inverse() * &t_w_b[first_frame];
        let n_align_poses = (self.params.least_squares_align_range
            * (last_frame - first_frame) as f32) as usize;
        if self.params.use_least_squares_alignment && n_align_poses > 1 {
            let gt_window = &t_w_a.world_from_body[first_frame..first_frame + n_align_poses];
            let es_window = &t_w_b.world_from_body[first_frame..first_frame + n_align_poses];
            t_a0_b0 = self.aligner.refine(&t_a0_b0, gt_window, es_window);
        }

        // End-of-segment discrepancy between estimate and ground truth,
        // expressed in the ground-truth end frame.
        let t_w_ai = &t_w_a[last_frame];
        let t_a0_ai = t_w_a.relative_transform(first_frame, last_frame);
        let t_bi_a0 = &t_w_b[last_frame].inverse() * &t_w_a[first_frame];
        let t_bi_ai = &(&t_bi_a0 * &t_a0_b0) * &t_a0_ai;
        let t_ai_bi = t_bi_ai.inverse();

        // Rotate the error into the world frame so yaw drift (unobservable
        // in visual-inertial setups) separates from roll and pitch
        // (gravity-observable).
        let translation_error = t_w_ai.rotate_vector(&t_ai_bi.translation());
        let rotation_error = t_w_ai.rotate_vector(&t_ai_bi.rotation_log());

        // The matcher guarantees the denominator exceeds segment_length.
        let scale_error = (dist_es[last_frame] - dist_es[first_frame])
            / (dist_gt[last_frame] - dist_gt[first_frame]);

        Some(RelativeError {
            first_frame,
            translation_error,
            rotation_error,
            segment_length,
            scale_error,
            num_frames: last_frame - first_frame + 1,
        })
    }
}
