//! Hand pose sources

use crate::spatial::Point3D;

/// Which hand a pose belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

/// A source of tracked palm positions, injected into gesture detectors
pub trait HandPoseSource {
    /// Palm position in world space, `None` when the hand is not tracked
    fn palm_position(&self, hand: Hand) -> Option<Point3D>;
}

/// Latest palm poses reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackedHands {
    pub left: Option<Point3D>,
    pub right: Option<Point3D>,
}

impl TrackedHands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record new poses; a missing pose keeps the previous one
    pub fn update(&mut self, left: Option<Point3D>, right: Option<Point3D>) {
        if left.is_some() {
            self.left = left;
        }
        if right.is_some() {
            self.right = right;
        }
    }
}

impl HandPoseSource for TrackedHands {
    fn palm_position(&self, hand: Hand) -> Option<Point3D> {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }
}
