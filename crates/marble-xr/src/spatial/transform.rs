//! Position, rotation and scale of a scene object

use serde::{Deserialize, Serialize};

use super::{Point3D, Quaternion, Vector3D};

/// A complete 3D transform (position + rotation + scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point3D,
    pub rotation: Quaternion,
    pub scale: Vector3D,
}

impl Transform {
    /// Identity transform (origin, no rotation, unit scale)
    pub fn identity() -> Self {
        Self {
            position: Point3D::ORIGIN,
            rotation: Quaternion::IDENTITY,
            scale: Vector3D::ONE,
        }
    }

    pub fn from_position(position: Point3D) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn from_position_rotation(position: Point3D, rotation: Quaternion) -> Self {
        Self {
            position,
            rotation,
            scale: Vector3D::ONE,
        }
    }

    /// Builder-style uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3D::ONE * scale;
        self
    }

    pub fn forward(&self) -> Vector3D {
        self.rotation.forward()
    }

    /// Local point to world space (scale, then rotate, then translate)
    pub fn transform_point(&self, local: Point3D) -> Point3D {
        let scaled = Vector3D::new(
            local.x * self.scale.x,
            local.y * self.scale.y,
            local.z * self.scale.z,
        );
        self.position + self.rotation.rotate_vector(scaled)
    }

    /// Local direction to world space (ignores position and scale)
    pub fn transform_direction(&self, direction: Vector3D) -> Vector3D {
        self.rotation.rotate_vector(direction)
    }

    /// Translate in world space
    pub fn translate(&mut self, offset: Vector3D) {
        self.position = self.position + offset;
    }

    /// Rotate about a local axis (applied after the current rotation)
    pub fn rotate_local(&mut self, rotation: Quaternion) {
        self.rotation = (self.rotation * rotation).normalize();
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
