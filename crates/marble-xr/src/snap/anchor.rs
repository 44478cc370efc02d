//! Named connection points on a snappable piece

use serde::{Deserialize, Serialize};

use crate::spatial::{Point3D, Transform};

/// A named connection site, positioned in the piece's proxy frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub name: String,
    pub local: Point3D,
}

impl Anchor {
    pub fn new(name: impl Into<String>, local: Point3D) -> Self {
        Self {
            name: name.into(),
            local,
        }
    }
}

/// Ordered anchors of one piece; the count is fixed at construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
}

impl AnchorSet {
    pub fn new(anchors: impl IntoIterator<Item = Anchor>) -> Self {
        Self {
            anchors: anchors.into_iter().collect(),
        }
    }

    /// Anchors named `anchor-0`, `anchor-1`, ... at the given local points
    pub fn from_points(points: impl IntoIterator<Item = Point3D>) -> Self {
        Self::new(
            points
                .into_iter()
                .enumerate()
                .map(|(index, local)| Anchor::new(format!("anchor-{index}"), local)),
        )
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Anchor> {
        self.anchors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }

    /// World positions of every anchor, in index order, for the given frame
    pub fn world_positions(&self, frame: &Transform) -> Vec<Point3D> {
        self.anchors
            .iter()
            .map(|anchor| frame.transform_point(anchor.local))
            .collect()
    }
}
