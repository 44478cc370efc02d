//! Clap counting from palm distance
//!
//! A sequence starts when the palms first come within the threshold. Every
//! change of closeness restarts a quiet-time window; when the window runs
//! out the number of taps decides between a single, double or triple clap.

use serde::{Deserialize, Serialize};

use crate::config::ClapConfig;
use crate::input::{Hand, HandPoseSource};
use crate::spatial::Point3D;

/// Recognised clap sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClapKind {
    Single,
    Double,
    Triple,
}

impl ClapKind {
    fn from_taps(taps: u32) -> Option<Self> {
        match taps {
            1 => Some(ClapKind::Single),
            2 => Some(ClapKind::Double),
            3 => Some(ClapKind::Triple),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ClapSession {
    /// Seconds since closeness last changed
    quiet: f32,
    taps: u32,
    was_close: bool,
}

#[derive(Debug, Clone)]
pub struct ClapDetector {
    threshold: f32,
    window: f32,
    left_palm: Point3D,
    right_palm: Point3D,
    hands_close: bool,
    session: Option<ClapSession>,
}

impl ClapDetector {
    pub fn new(threshold: f32, window: f32) -> Self {
        Self {
            threshold,
            window,
            // Untracked hands start infinitely far apart.
            left_palm: Point3D::splat(f32::NEG_INFINITY),
            right_palm: Point3D::splat(f32::INFINITY),
            hands_close: false,
            session: None,
        }
    }

    pub fn from_config(config: &ClapConfig) -> Self {
        Self::new(config.threshold, config.window)
    }

    pub fn hands_close(&self) -> bool {
        self.hands_close
    }

    pub fn is_detecting(&self) -> bool {
        self.session.is_some()
    }

    /// Sample palms from `hands`, then advance any running sequence by `dt`
    pub fn tick(&mut self, hands: &dyn HandPoseSource, dt: f32) -> Option<ClapKind> {
        if let Some(left) = hands.palm_position(Hand::Left) {
            self.left_palm = left;
        }
        if let Some(right) = hands.palm_position(Hand::Right) {
            self.right_palm = right;
        }

        self.hands_close = self.left_palm.distance(&self.right_palm) < self.threshold;

        if self.session.is_none() && self.hands_close {
            tracing::trace!("Palms touching, counting claps");
            self.session = Some(ClapSession {
                quiet: 0.0,
                taps: 0,
                was_close: self.hands_close,
            });
        }

        self.advance(dt)
    }

    fn advance(&mut self, dt: f32) -> Option<ClapKind> {
        let mut session = self.session?;

        if session.quiet >= self.window {
            self.session = None;
            let kind = ClapKind::from_taps(session.taps);
            tracing::debug!("Clap sequence closed with {} taps", session.taps);
            return kind;
        }

        if self.hands_close != session.was_close {
            session.quiet = 0.0;
            if self.hands_close || session.taps == 0 {
                session.taps += 1;
            }
        }
        session.was_close = self.hands_close;
        session.quiet += dt;
        self.session = Some(session);
        None
    }
}

impl Default for ClapDetector {
    fn default() -> Self {
        Self::from_config(&ClapConfig::default())
    }
}
