use clap::Parser;

use drift3d::{
    io::read_tum_trajectory,
    kitti::{EvalParams, KittiEvaluator},
    metrics::TransformMetrics,
};

#[derive(Parser)]
/// Evaluates an estimated trajectory against ground truth with the
/// KITTI-style relative pose error metric.
struct Args {
    /// Path to the ground-truth trajectory (TUM format)
    groundtruth: String,
    /// Path to the estimated trajectory (TUM format), same frame count
    estimate: String,
    /// Nominal segment lengths to evaluate, in trajectory length units
    #[clap(
        long,
        value_delimiter = ',',
        default_value = "10,20,30,40,50,60,70,80,90,100"
    )]
    segment_lengths: Vec<f32>,
    /// Number of frames between evaluated segment start positions
    #[clap(long, default_value_t = 10)]
    skip_frames: usize,
    /// Refine each segment's initial relative transform with least-squares
    /// pose alignment
    #[clap(long, action)]
    align: bool,
    /// Fraction of each segment used as the alignment window
    #[clap(long, default_value_t = 1.0)]
    align_range: f32,
    /// Write all relative-error records to this JSON file
    #[clap(long)]
    json: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let gt_trajectory = read_tum_trajectory(&args.groundtruth)?;
    let es_trajectory = read_tum_trajectory(&args.estimate)?;

    let absolute = TransformMetrics::mean_trajectory_error(
        &es_trajectory.first_frame_at_origin(),
        &gt_trajectory.first_frame_at_origin(),
    )?;
    println!("Mean absolute trajectory error: {absolute}");

    let evaluator = KittiEvaluator::new(EvalParams {
        skip_frames: args.skip_frames,
        use_least_squares_alignment: args.align,
        least_squares_align_range: args.align_range,
        ..Default::default()
    });
    let results = evaluator.evaluate(&gt_trajectory, &es_trajectory, &args.segment_lengths)?;

    println!("Relative errors per segment length:");
    for segment in &results {
        if segment.errors.is_empty() {
            println!(
                "{:>8.1}: no segment of this length fits the trajectory",
                segment.segment_length
            );
            continue;
        }

        let count = segment.errors.len() as f32;
        let translation = segment
            .errors
            .iter()
            .map(|error| error.translation_error.norm())
            .sum::<f32>()
            / count;
        let rotation = segment
            .errors
            .iter()
            .map(|error| error.rotation_error.norm())
            .sum::<f32>()
            / count;
        let scale = segment.errors.iter().map(|error| error.scale_error).sum::<f32>() / count;

        println!(
            "{:>8.1}: translation {:.3} ({:.2}%), rotation {:.4} deg, scale {:.4} ({} segments)",
            segment.segment_length,
            translation,
            100.0 * translation / segment.segment_length,
            rotation.to_degrees(),
            scale,
            segment.errors.len()
        );
    }

    if let Some(path) = args.json {
        std::fs::write(&path, serde_json::to_string_pretty(&results)?)?;
        println!("Wrote relative-error records to {path}");
    }

    Ok(())
}
