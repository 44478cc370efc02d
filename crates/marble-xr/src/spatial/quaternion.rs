//! Unit quaternions for orientations

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::{Vector3D, EPSILON};

/// A quaternion representing a 3D rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle_radians` about `axis`
    pub fn from_axis_angle(axis: Vector3D, angle_radians: f32) -> Self {
        let half = angle_radians / 2.0;
        let axis = axis.normalize();
        let sin_half = half.sin();

        Self {
            x: axis.x * sin_half,
            y: axis.y * sin_half,
            z: axis.z * sin_half,
            w: half.cos(),
        }
    }

    /// Rotation of `degrees` about `axis`
    pub fn angle_axis(degrees: f32, axis: Vector3D) -> Self {
        Self::from_axis_angle(axis, degrees.to_radians())
    }

    /// Rotation about the world vertical
    pub fn yaw(degrees: f32) -> Self {
        Self::angle_axis(degrees, Vector3D::UP)
    }

    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    fn dot(&self, other: &Quaternion) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > EPSILON {
            Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag)
        } else {
            Self::IDENTITY
        }
    }

    /// Inverse rotation (conjugate of a unit quaternion)
    pub fn inverse(&self) -> Self {
        let mag_sq = self.dot(self);
        if mag_sq > EPSILON {
            Self::new(
                -self.x / mag_sq,
                -self.y / mag_sq,
                -self.z / mag_sq,
                self.w / mag_sq,
            )
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vector(&self, v: Vector3D) -> Vector3D {
        let q_vec = Vector3D::new(self.x, self.y, self.z);
        let uv = q_vec.cross(&v);
        let uuv = q_vec.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// Smallest angle in degrees between two orientations
    pub fn angle_to(&self, other: &Quaternion) -> f32 {
        let relative = (self.normalize().inverse() * other.normalize()).normalize();
        let vector_part = Vector3D::new(relative.x, relative.y, relative.z).magnitude();
        (2.0 * vector_part.atan2(relative.w.abs())).to_degrees()
    }

    pub fn forward(&self) -> Vector3D {
        self.rotate_vector(Vector3D::FORWARD)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product; `a * b` applies `b` first, then `a`
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}
