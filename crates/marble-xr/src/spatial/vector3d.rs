//! 3D vectors for directions, offsets and forces

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::EPSILON;

/// A vector in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3D {
    /// Zero vector
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit scale on every axis
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector pointing up (+Y), the fixed world vertical
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Unit vector pointing forward (+Z)
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Create a new 3D vector
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Squared length (avoids sqrt)
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Unit-length copy, or `ZERO` for a degenerate vector
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > EPSILON {
            *self * (1.0 / mag)
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Vector3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3D) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Component-wise linear interpolation
    pub fn lerp(&self, other: &Vector3D, t: f32) -> Self {
        *self + (*other - *self) * t
    }

    /// Unsigned angle to another vector in degrees, `[0, 180]`
    ///
    /// Returns 0 when either vector is degenerate.
    pub fn angle_deg(&self, other: &Vector3D) -> f32 {
        let denominator = (self.magnitude_squared() * other.magnitude_squared()).sqrt();
        if denominator < EPSILON {
            return 0.0;
        }
        (self.dot(other) / denominator)
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
    }

    /// Point at this offset from the origin
    pub fn to_point(&self) -> super::Point3D {
        super::Point3D::new(self.x, self.y, self.z)
    }

    /// Signed angle in degrees, `[-180, 180]`, that rotates `from` onto `to` about `axis`
    ///
    /// The magnitude is the full 3D angle between the vectors; the sign is
    /// that of `axis · (from × to)`, with zero counted as positive.
    pub fn signed_angle(from: &Vector3D, to: &Vector3D, axis: &Vector3D) -> f32 {
        let unsigned = from.angle_deg(to);
        if axis.dot(&from.cross(to)) < 0.0 {
            -unsigned
        } else {
            unsigned
        }
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3D {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f32) -> Self::Output {
        Vector3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Self::Output {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degenerate() {
        assert_eq!(Vector3D::ZERO.normalize(), Vector3D::ZERO);
        let n = Vector3D::new(0.0, 3.0, 4.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_signed_angle_sign_convention() {
        let quarter = Vector3D::signed_angle(&Vector3D::FORWARD, &Vector3D::RIGHT, &Vector3D::UP);
        assert!((quarter - 90.0).abs() < 0.0001);

        let back = Vector3D::signed_angle(&Vector3D::RIGHT, &Vector3D::FORWARD, &Vector3D::UP);
        assert!((back + 90.0).abs() < 0.0001);
    }

    #[test]
    fn test_signed_angle_degenerate_is_zero() {
        assert_eq!(
            Vector3D::signed_angle(&Vector3D::ZERO, &Vector3D::RIGHT, &Vector3D::UP),
            0.0
        );
    }

    #[test]
    fn test_opposite_vectors() {
        let a = Vector3D::RIGHT;
        let b = -Vector3D::RIGHT;
        assert!((a.angle_deg(&b) - 180.0).abs() < 0.001);
    }
}
