//! Closest anchor pair search

use serde::{Deserialize, Serialize};

use crate::spatial::{Point3D, Vector3D};

/// The closest pair found between two anchor sets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPair {
    /// Index into the local (moving) set
    pub local_index: usize,
    /// Index into the other (stationary) set
    pub other_index: usize,
    pub distance: f32,
}

/// Find the globally closest pair between `local` and `other`.
///
/// Pairs are visited local-major; a later pair only replaces the current
/// best when strictly closer, so ties resolve to the lowest local index and
/// then the lowest other index. Returns `None` when either side is empty.
pub fn closest_pair(local: &[Point3D], other: &[Point3D]) -> Option<AnchorPair> {
    let mut best: Option<AnchorPair> = None;

    for (local_index, a) in local.iter().enumerate() {
        for (other_index, b) in other.iter().enumerate() {
            let distance = a.distance(b);
            let closer = match best {
                Some(current) => distance < current.distance,
                None => distance < f32::INFINITY,
            };
            if closer {
                best = Some(AnchorPair {
                    local_index,
                    other_index,
                    distance,
                });
            }
        }
    }

    best
}

/// Result of one matching pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapOutcome {
    /// Closest pair, whether or not it was within range
    pub pair: Option<AnchorPair>,
    /// Correction to apply to the local proxy; zero when nothing snapped
    pub offset: Vector3D,
    /// Whether the closest pair was within the snap distance
    pub snapped: bool,
}

impl SnapOutcome {
    pub fn did_snap(&self) -> bool {
        self.snapped
    }
}

/// Threshold test on top of [`closest_pair`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapMatcher {
    pub snap_distance: f32,
}

impl SnapMatcher {
    pub fn new(snap_distance: f32) -> Self {
        Self { snap_distance }
    }

    /// Offset that carries the closest local anchor onto its partner, if in range
    pub fn evaluate(&self, local: &[Point3D], other: &[Point3D]) -> SnapOutcome {
        let pair = closest_pair(local, other);

        match pair {
            Some(p) if p.distance < self.snap_distance => SnapOutcome {
                pair,
                offset: other[p.other_index] - local[p.local_index],
                snapped: true,
            },
            _ => SnapOutcome {
                pair,
                offset: Vector3D::ZERO,
                snapped: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_anchor_snaps() {
        let matcher = SnapMatcher::new(0.05);
        let outcome = matcher.evaluate(&[Point3D::ORIGIN], &[Point3D::new(0.01, 0.0, 0.0)]);

        assert!(outcome.did_snap());
        assert!((outcome.offset.x - 0.01).abs() < 1e-6);
        assert_eq!(outcome.offset.y, 0.0);
        assert_eq!(outcome.offset.z, 0.0);
    }

    #[test]
    fn test_far_anchor_does_not_snap() {
        let matcher = SnapMatcher::new(0.05);
        let outcome = matcher.evaluate(&[Point3D::ORIGIN], &[Point3D::new(1.0, 0.0, 0.0)]);

        assert!(!outcome.did_snap());
        assert_eq!(outcome.offset, Vector3D::ZERO);
        assert_eq!(outcome.pair.map(|p| p.other_index), Some(0));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let matcher = SnapMatcher::new(0.5);
        let outcome = matcher.evaluate(&[Point3D::ORIGIN], &[Point3D::new(0.5, 0.0, 0.0)]);
        assert_eq!(outcome.offset, Vector3D::ZERO);
    }

    #[test]
    fn test_empty_sets_yield_no_pair() {
        let matcher = SnapMatcher::new(1.0);
        assert_eq!(closest_pair(&[], &[Point3D::ORIGIN]), None);
        assert_eq!(closest_pair(&[Point3D::ORIGIN], &[]), None);

        let outcome = matcher.evaluate(&[], &[]);
        assert!(!outcome.did_snap());
        assert_eq!(outcome.offset, Vector3D::ZERO);
    }

    #[test]
    fn test_selects_global_minimum() {
        let local = [
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
        ];
        let other = [Point3D::new(5.0, 0.0, 0.0), Point3D::new(1.02, 0.0, 0.0)];

        let pair = closest_pair(&local, &other).unwrap();
        assert_eq!((pair.local_index, pair.other_index), (1, 1));

        for a in &local {
            for b in &other {
                assert!(pair.distance <= a.distance(b));
            }
        }
    }

    #[test]
    fn test_ties_keep_first_found() {
        let local = [Point3D::new(-1.0, 0.0, 0.0), Point3D::new(1.0, 0.0, 0.0)];
        let other = [Point3D::ORIGIN, Point3D::ORIGIN];

        let pair = closest_pair(&local, &other).unwrap();
        assert_eq!((pair.local_index, pair.other_index), (0, 0));
    }

    #[test]
    fn test_repeated_pass_is_idempotent() {
        let matcher = SnapMatcher::new(0.1);
        let local = [Point3D::new(0.0, 0.2, 0.0), Point3D::new(0.3, 0.0, 0.0)];
        let other = [Point3D::new(0.33, 0.01, 0.0)];

        let first = matcher.evaluate(&local, &other);
        let second = matcher.evaluate(&local, &other);
        assert_eq!(first, second);
    }
}
