use nalgebra::{
    Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3, Vector6,
};

use std::ops;

/// Rigid 3D transform (rotation + translation).
///
/// Composition is associative but not commutative; `&a * &b` applies `b`
/// first, then `a`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform(Isometry3<f32>);

impl Transform {
    /// Identity transform.
    pub fn eye() -> Self {
        Self(Isometry3::<f32>::from_parts(
            Translation3::new(0.0, 0.0, 0.0),
            UnitQuaternion::new(Vector3::<f32>::zeros()),
        ))
    }

    /// Creates a transform from a translation vector and a quaternion
    /// `(w, i, j, k)`. The quaternion is normalized.
    pub fn new(translation: &Vector3<f32>, rotation: &Quaternion<f32>) -> Self {
        Self(Isometry3::<f32>::from_parts(
            Translation3::from(*translation),
            UnitQuaternion::from_quaternion(*rotation),
        ))
    }

    /// Creates a transform from a translation vector and a unit quaternion.
    pub fn from_parts(translation: Vector3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self(Isometry3::<f32>::from_parts(
            Translation3::from(translation),
            rotation,
        ))
    }

    /// Creates a transform from a stacked `[translation, so3]` 6-vector.
    /// The last three components are an axis-angle rotation.
    pub fn from_se3_exp(translation_so3: &Vector6<f32>) -> Self {
        let translation =
            Translation3::new(translation_so3[0], translation_so3[1], translation_so3[2]);
        let so3 = Vector3::new(translation_so3[3], translation_so3[4], translation_so3[5]);

        Self(Isometry3::<f32>::from_parts(
            translation,
            UnitQuaternion::from_scaled_axis(so3),
        ))
    }

    /// Returns the inverse transform.
    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// Translation part.
    pub fn translation(&self) -> Vector3<f32> {
        self.0.translation.vector
    }

    /// Rotation part.
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.0.rotation
    }

    /// Rotation angle in radians.
    pub fn angle(&self) -> f32 {
        self.0.rotation.angle()
    }

    /// Log map of the rotation part: axis scaled by the rotation angle.
    pub fn rotation_log(&self) -> Vector3<f32> {
        self.0.rotation.scaled_axis()
    }

    /// Applies only the rotation part to a vector.
    pub fn rotate_vector(&self, rhs: &Vector3<f32>) -> Vector3<f32> {
        self.0.rotation * rhs
    }
}

impl ops::Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Self::Output {
        Transform(self.0 * rhs.0)
    }
}

impl ops::Mul<&Vector3<f32>> for &Transform {
    type Output = Vector3<f32>;

    fn mul(self, rhs: &Vector3<f32>) -> Self::Output {
        self.0 * rhs
    }
}
