use approx::assert_relative_eq;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use drift3d::{
    kitti::{EvalParams, KittiEvaluator},
    trajectory::Trajectory,
    transform::Transform,
};

fn line_trajectory(positions: &[f32]) -> Trajectory {
    positions
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            (
                Transform::from_parts(Vector3::new(x, 0.0, 0.0), UnitQuaternion::identity()),
                i as f32,
            )
        })
        .collect()
}

#[test]
fn test_identical_straight_line() {
    let gt = line_trajectory(&[0.0, 1.0, 2.0]);
    let es = gt.clone();

    let evaluator = KittiEvaluator::new(EvalParams {
        skip_frames: 1,
        ..Default::default()
    });
    let errors = evaluator.calc_sequence_errors(&gt, &es, 1.0).unwrap();

    // The frame exactly one unit ahead is not selected by the strict
    // matcher, so the only matched segment spans the whole trajectory;
    // later start frames run out of arc length and are skipped.
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].first_frame, 0);
    assert_eq!(errors[0].num_frames, 3);
    assert_relative_eq!(errors[0].translation_error, Vector3::zeros(), epsilon = 1e-6);
    assert_relative_eq!(errors[0].rotation_error, Vector3::zeros(), epsilon = 1e-6);
    assert_relative_eq!(errors[0].scale_error, 1.0, epsilon = 1e-6);
}

#[test]
fn test_doubled_estimate_scale_error() {
    let gt = line_trajectory(&[0.0, 1.0, 2.0, 3.0, 4.0]);
    let es = line_trajectory(&[0.0, 2.0, 4.0, 6.0, 8.0]);

    let evaluator = KittiEvaluator::new(EvalParams {
        skip_frames: 1,
        ..Default::default()
    });
    let errors = evaluator.calc_sequence_errors(&gt, &es, 2.0).unwrap();

    assert!(!errors.is_empty());
    for error in &errors {
        assert_relative_eq!(error.scale_error, 2.0, epsilon = 1e-6);
        assert_relative_eq!(error.rotation_error, Vector3::zeros(), epsilon = 1e-6);
    }
}

#[test]
fn test_rotated_estimate_reports_rotation_drift() {
    // Ground truth goes straight; the estimate picks up a constant yaw-rate
    // error, poses rotating about z while positions stay on the line.
    let gt = line_trajectory(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let yaw_rate = 0.02_f32;
    let es: Trajectory = (0..6)
        .map(|i| {
            (
                Transform::from_parts(
                    Vector3::new(i as f32, 0.0, 0.0),
                    UnitQuaternion::from_scaled_axis(Vector3::z() * yaw_rate * i as f32),
                ),
                i as f32,
            )
        })
        .collect();

    let evaluator = KittiEvaluator::new(EvalParams {
        skip_frames: 1,
        ..Default::default()
    });
    let errors = evaluator.calc_sequence_errors(&gt, &es, 2.0).unwrap();

    assert!(!errors.is_empty());
    for error in &errors {
        // The strict matcher spans 3 frame steps per 2-unit segment,
        // accumulating three steps of yaw error.
        assert_eq!(error.num_frames, 4);
        assert_relative_eq!(error.rotation_error.norm(), 3.0 * yaw_rate, epsilon = 1e-4);
        assert_relative_eq!(error.scale_error, 1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_quaternion_construction_matches_tum_convention() {
    // Identity quaternion in (qx, qy, qz, qw) file order.
    let pose = Transform::new(
        &Vector3::new(1.0, 2.0, 3.0),
        &Quaternion::new(1.0, 0.0, 0.0, 0.0),
    );
    assert_relative_eq!(pose.angle(), 0.0, epsilon = 1e-6);
}
