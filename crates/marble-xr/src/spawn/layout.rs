//! Table placement helpers

use crate::spatial::{Point3D, Quaternion, Transform, Vector3D};

/// Pedestal positions evenly spaced on a ring, relative to the table centre.
///
/// Pedestal `i` of `count` sits at `360 / count * i` degrees about the
/// vertical, starting on the +X axis.
pub fn pedestal_positions(count: usize, radius: f32) -> Vec<Point3D> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| {
            Quaternion::yaw(step * i as f32)
                .rotate_vector(Vector3D::RIGHT * radius)
                .to_point()
        })
        .collect()
}

/// Where to put the table so it floats `distance` in front of the viewer
pub fn recenter_position(viewer: &Transform, distance: f32) -> Point3D {
    viewer.position + viewer.forward() * distance
}
