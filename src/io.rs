use std::{io::BufRead, path::Path};

use nalgebra::{Quaternion, Vector3};

use crate::{error::D3dError, trajectory::Trajectory, transform::Transform};

/// Reads a trajectory in the TUM text format.
///
/// One pose per line, `timestamp tx ty tz qx qy qz qw`, separated by
/// whitespace. Lines starting with `#` and empty lines are skipped.
pub fn read_tum_trajectory<P: AsRef<Path>>(filepath: P) -> Result<Trajectory, D3dError> {
    let file = std::fs::File::open(filepath)?;
    let reader = std::io::BufReader::new(file);

    let mut trajectory = Trajectory::default();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens = line
            .split_whitespace()
            .map(|token| token.parse::<f32>())
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|err| {
                D3dError::Parser(format!("line {}: {}", line_number + 1, err))
            })?;
        if tokens.len() != 8 {
            return Err(D3dError::Parser(format!(
                "line {}: expected 8 fields, got {}",
                line_number + 1,
                tokens.len()
            )));
        }

        trajectory.push(
            Transform::new(
                &Vector3::new(tokens[1], tokens[2], tokens[3]),
                &Quaternion::new(tokens[7], tokens[4], tokens[5], tokens[6]),
            ),
            tokens[0],
        );
    }

    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_read_tum_trajectory() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# timestamp tx ty tz qx qy qz qw").unwrap();
        writeln!(file, "0.0 0.0 0.0 0.0 0.0 0.0 0.0 1.0").unwrap();
        writeln!(file, "0.1 1.0 0.0 0.0 0.0 0.0 0.0 1.0").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "0.2 2.0 0.5 0.0 0.0 0.0 0.0 1.0").unwrap();

        let trajectory = read_tum_trajectory(file.path()).unwrap();

        assert_eq!(trajectory.len(), 3);
        assert_relative_eq!(trajectory.times[1], 0.1);
        assert_relative_eq!(
            trajectory[2].translation(),
            Vector3::new(2.0, 0.5, 0.0),
            epsilon = 1e-6
        );
        assert_relative_eq!(trajectory[1].angle(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_malformed_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.0 0.0 0.0 0.0 0.0 0.0 1.0").unwrap();

        let result = read_tum_trajectory(file.path());
        assert!(matches!(result, Err(D3dError::Parser(_))));
    }

    #[test]
    fn test_rejects_non_numeric_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.0 a 0.0 0.0 0.0 0.0 0.0 1.0").unwrap();

        let result = read_tum_trajectory(file.path());
        assert!(matches!(result, Err(D3dError::Parser(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = read_tum_trajectory("does/not/exist.txt");
        assert!(matches!(result, Err(D3dError::Io(_))));
    }
}
