//! Tweening between scalar values over a fixed duration

use super::Easing;

/// A progress-driven animation from `start` to `end`
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub start: f32,
    pub end: f32,
    /// Seconds from start to end
    pub duration: f32,
    /// Normalised progress (0-1)
    pub progress: f32,
    pub easing: Easing,
    pub complete: bool,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration: f32) -> Self {
        Self {
            start,
            end,
            duration,
            progress: 0.0,
            easing: Easing::Linear,
            complete: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt` seconds; a non-positive duration completes at once
    pub fn update(&mut self, dt: f32) {
        if self.complete {
            return;
        }

        if self.duration <= 0.0 {
            self.progress = 1.0;
        } else {
            self.progress += dt / self.duration;
        }

        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.complete = true;
        }
    }

    /// Eased progress, `[0, 1]`
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.progress)
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        self.start + (self.end - self.start) * self.eased()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_progress() {
        let mut tween = Tween::new(0.0, 10.0, 2.0);
        tween.update(0.5);
        assert!((tween.value() - 2.5).abs() < 0.0001);
        assert!(!tween.complete);

        tween.update(1.5);
        assert!(tween.complete);
        assert_eq!(tween.value(), 10.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut tween = Tween::new(1.0, 3.0, 0.0);
        tween.update(0.0);
        assert!(tween.complete);
        assert_eq!(tween.value(), 3.0);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let mut tween = Tween::new(0.0, 1.0, 0.1).with_easing(Easing::EaseOutCubic);
        tween.update(5.0);
        assert_eq!(tween.progress, 1.0);
        assert_eq!(tween.value(), 1.0);
    }
}
