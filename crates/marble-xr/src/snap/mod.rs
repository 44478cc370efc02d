//! Nearest-anchor snapping between movable pieces
//!
//! Each snappable piece carries an [`AnchorSet`]. While a held piece
//! overlaps another, [`SnapBehaviour::fixed_tick`] finds the closest pair of
//! anchors and, when they are within the snap distance, shifts the piece's
//! preview proxy so the pair coincides. Releasing the piece lands it at the
//! snapped position.

mod anchor;
mod behaviour;
mod matcher;

pub use anchor::{Anchor, AnchorSet};
pub use behaviour::{SnapBehaviour, SnapSession, SnapTick};
pub use matcher::{closest_pair, AnchorPair, SnapMatcher, SnapOutcome};
