//! Per-piece snapping session driven by grab and proximity events

use serde::{Deserialize, Serialize};

use super::{AnchorSet, SnapMatcher, SnapOutcome};
use crate::input::Grabbable;
use crate::spatial::{Point3D, Transform, Vector3D};

/// State of a running snap session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapSession {
    /// Correction applied on the most recent tick (zero if that tick did not snap).
    ///
    /// Deliberately not the last snapped correction: a release lands where the
    /// preview proxy was last shown, even if the final tick did not snap.
    pub offset: Vector3D,
    /// Ticks evaluated so far
    pub ticks: u64,
}

/// What a fixed tick did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapTick {
    /// No session running
    Idle,
    /// Session evaluated one matching pass
    Matching(SnapOutcome),
    /// Session ended by release; the piece moved by `offset`
    Landed { offset: Vector3D },
    /// Session ended by leaving proximity while still held
    Cancelled,
}

/// Snapping logic for one movable piece.
///
/// The piece has its own transform (`body`) and a child preview proxy that
/// carries the anchors. Matching only ever moves the proxy; the body moves
/// once, when the piece is released while snapped.
#[derive(Debug, Clone)]
pub struct SnapBehaviour {
    anchors: AnchorSet,
    body: Transform,
    /// Proxy rest position in the body's local frame
    proxy_rest: Point3D,
    /// World-space shift of the proxy away from rest
    correction: Vector3D,
    matcher: SnapMatcher,
    other_anchors: Vec<Point3D>,
    held: bool,
    in_proximity: bool,
    session: Option<SnapSession>,
}

impl SnapBehaviour {
    pub fn new(anchors: AnchorSet, body: Transform, snap_distance: f32) -> Self {
        Self {
            anchors,
            body,
            proxy_rest: Point3D::ORIGIN,
            correction: Vector3D::ZERO,
            matcher: SnapMatcher::new(snap_distance),
            other_anchors: Vec::new(),
            held: false,
            in_proximity: false,
            session: None,
        }
    }

    /// Builder-style proxy rest position (body-local)
    pub fn with_proxy_rest(mut self, rest: Point3D) -> Self {
        self.proxy_rest = rest;
        self
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn body(&self) -> &Transform {
        &self.body
    }

    /// Host-driven body motion (e.g. following the holding hand)
    pub fn set_body(&mut self, body: Transform) {
        self.body = body;
    }

    pub fn session(&self) -> Option<&SnapSession> {
        self.session.as_ref()
    }

    pub fn is_snapping(&self) -> bool {
        self.session.is_some()
    }

    pub fn in_proximity(&self) -> bool {
        self.in_proximity
    }

    /// World frame of the preview proxy, including the current correction
    pub fn proxy_frame(&self) -> Transform {
        Transform {
            position: self.body.transform_point(self.proxy_rest) + self.correction,
            ..self.body
        }
    }

    /// World positions of this piece's anchors on the proxy as it is now
    pub fn world_anchors(&self) -> Vec<Point3D> {
        self.anchors.world_positions(&self.proxy_frame())
    }

    /// Another piece's proximity volume started overlapping ours
    pub fn on_proximity_enter(&mut self, other_anchors: Vec<Point3D>) {
        self.other_anchors = other_anchors;
        self.in_proximity = true;
        if self.held {
            self.start_session();
        }
    }

    /// The other piece moved; refresh its anchor positions
    pub fn update_other_anchors(&mut self, other_anchors: Vec<Point3D>) {
        self.other_anchors = other_anchors;
    }

    pub fn on_proximity_exit(&mut self) {
        self.in_proximity = false;
    }

    fn start_session(&mut self) {
        if self.session.is_some() {
            return;
        }
        tracing::debug!(
            "Snap session started against {} anchors",
            self.other_anchors.len()
        );
        self.session = Some(SnapSession::default());
    }

    /// Advance the session by one physics tick
    pub fn fixed_tick(&mut self) -> SnapTick {
        let Some(mut session) = self.session else {
            return SnapTick::Idle;
        };

        if self.held && self.in_proximity {
            // Evaluate from an unperturbed proxy so corrections never compound.
            self.correction = Vector3D::ZERO;
            let outcome = self
                .matcher
                .evaluate(&self.world_anchors(), &self.other_anchors);
            if outcome.did_snap() {
                self.correction = outcome.offset;
            }
            session.offset = outcome.offset;
            session.ticks += 1;
            self.session = Some(session);
            return SnapTick::Matching(outcome);
        }

        self.session = None;
        self.correction = Vector3D::ZERO;

        if self.held {
            tracing::debug!("Snap session cancelled after {} ticks", session.ticks);
            SnapTick::Cancelled
        } else {
            self.body.translate(session.offset);
            tracing::debug!(
                "Piece landed with offset ({:.4}, {:.4}, {:.4})",
                session.offset.x,
                session.offset.y,
                session.offset.z
            );
            SnapTick::Landed {
                offset: session.offset,
            }
        }
    }
}

impl Grabbable for SnapBehaviour {
    fn on_grab_start(&mut self, _interactor: Point3D) {
        self.held = true;
        if self.in_proximity {
            self.start_session();
        }
    }

    fn on_grab_end(&mut self) {
        self.held = false;
    }

    fn is_held(&self) -> bool {
        self.held
    }
}
