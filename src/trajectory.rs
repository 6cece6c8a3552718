use std::ops::Index;

use crate::transform::Transform;

/// Time-ordered sequence of rigid-body poses expressed in a common world
/// frame. Index `i` of two trajectories being compared is assumed to be
/// temporally corresponding; time synchronization happens upstream.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    /// Body poses, transforms points from body to world.
    pub world_from_body: Vec<Transform>,
    /// Timestamps of each pose.
    pub times: Vec<f32>,
}

impl Trajectory {
    /// Adds a new pose to the trajectory.
    ///
    /// # Arguments
    ///
    /// * `world_from_body` - Transform from body to world.
    /// * `time` - Timestamp of the pose.
    pub fn push(&mut self, world_from_body: Transform, time: f32) {
        self.world_from_body.push(world_from_body);
        self.times.push(time);
    }

    /// Returns the number of poses in the trajectory.
    pub fn len(&self) -> usize {
        self.world_from_body.len()
    }

    /// Returns true if the trajectory is empty.
    pub fn is_empty(&self) -> bool {
        self.world_from_body.is_empty()
    }

    /// Returns the iterator over poses and timestamps.
    pub fn iter(&self) -> impl Iterator<Item = (Transform, f32)> + '_ {
        self.world_from_body
            .iter()
            .zip(self.times.iter())
            .map(|(world_from_body, time)| (world_from_body.clone(), *time))
    }

    /// Returns the transform of pose `to` expressed in the frame of pose
    /// `from`, i.e. `T_from_to = T_W_from⁻¹ · T_W_to`.
    pub fn relative_transform(&self, from: usize, to: usize) -> Transform {
        &self.world_from_body[from].inverse() * &self.world_from_body[to]
    }

    /// Cumulative arc length of the trajectory per index.
    ///
    /// Entry 0 is zero; entry `i` adds the Euclidean distance between the
    /// positions of poses `i - 1` and `i`. The table is non-decreasing and
    /// has the same length as the trajectory. An empty trajectory yields an
    /// empty table.
    pub fn distances(&self) -> Vec<f32> {
        let mut dist = Vec::with_capacity(self.len());
        if self.is_empty() {
            return dist;
        }
        dist.push(0.0);
        for i in 1..self.len() {
            let step = (self.world_from_body[i].translation()
                - self.world_from_body[i - 1].translation())
            .norm();
            dist.push(dist[i - 1] + step);
        }
        dist
    }

    /// Creates a new trajectory with the poses transformed in such a way
    /// that the first pose is at the origin.
    pub fn first_frame_at_origin(&self) -> Self {
        if self.world_from_body.is_empty() {
            return self.clone();
        }

        let first_inv = self.world_from_body[0].inverse();
        Self {
            world_from_body: self
                .world_from_body
                .iter()
                .map(|transform| &first_inv * transform)
                .collect::<Vec<Transform>>(),
            times: self.times.clone(),
        }
    }
}

impl FromIterator<(Transform, f32)> for Trajectory {
    /// Creates a new trajectory from a `(Transform, f32)` iterator.
    /// Use with the `collect::<Trajectory>` method.
    fn from_iter<T: IntoIterator<Item = (Transform, f32)>>(iter: T) -> Self {
        let mut trajectory = Trajectory::default();
        for (transform, time) in iter {
            trajectory.push(transform, time);
        }
        trajectory
    }
}

impl Index<usize> for Trajectory {
    type Output = Transform;
    /// Returns the pose at the given index.
    fn index(&self, index: usize) -> &Self::Output {
        &self.world_from_body[index]
    }
}
