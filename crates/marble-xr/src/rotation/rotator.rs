//! Inertial rotation about the world vertical
//!
//! An operator drags a control point around the pivot; the pivot follows
//! the swept angle. On release the last angular velocity decays to zero over
//! `|velocity| / drag` seconds.
//!
//! ```text
//! Idle --drag start--> Dragging --drag end--> Decaying --progress > 1--> Idle
//!                         ^                       |
//!                         +------drag start-------+
//! ```

use serde::Serialize;

use crate::config::RotationConfig;
use crate::input::Grabbable;
use crate::spatial::{lerp, Point3D, Quaternion, Transform, Vector3D, EPSILON};

/// Seconds needed to bring `velocity` (deg/s) to rest under `drag`.
///
/// A drag of (nearly) zero means an instantaneous stop rather than a
/// division by zero.
pub fn decay_duration(velocity: f32, drag: f32) -> f32 {
    if drag <= EPSILON {
        0.0
    } else {
        velocity.abs() / drag
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    base_rotation: Quaternion,
    base_direction: Vector3D,
    controller: Point3D,
    /// Accumulated table angle for this drag, degrees
    angle: f32,
    /// Degrees per second
    velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DecaySession {
    base_rotation: Quaternion,
    velocity: f32,
    angle: f32,
    duration: f32,
    /// Normalised progress toward rest
    progress: f32,
}

/// Observable phase of the rotator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPhase {
    #[default]
    Idle,
    Dragging,
    Decaying,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging(DragSession),
    Decaying(DecaySession),
}

/// Drives the orientation of a pivot from drag input
#[derive(Debug, Clone)]
pub struct InertialRotator {
    pivot: Transform,
    sensitivity: f32,
    drag: f32,
    phase: Phase,
}

impl InertialRotator {
    pub fn new(pivot: Transform, sensitivity: f32, drag: f32) -> Self {
        Self {
            pivot,
            sensitivity,
            drag,
            phase: Phase::Idle,
        }
    }

    pub fn from_config(pivot: Transform, config: &RotationConfig) -> Self {
        Self::new(pivot, config.sensitivity, config.drag)
    }

    pub fn pivot(&self) -> &Transform {
        &self.pivot
    }

    /// Host-driven pivot move (e.g. recentering the table)
    pub fn set_pivot_position(&mut self, position: Point3D) {
        self.pivot.position = position;
    }

    pub fn rotation(&self) -> Quaternion {
        self.pivot.rotation
    }

    pub fn phase(&self) -> RotationPhase {
        match self.phase {
            Phase::Idle => RotationPhase::Idle,
            Phase::Dragging(_) => RotationPhase::Dragging,
            Phase::Decaying(_) => RotationPhase::Decaying,
        }
    }

    /// Current angular velocity in degrees per second; zero when idle
    pub fn angular_velocity(&self) -> f32 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Dragging(drag) => drag.velocity,
            Phase::Decaying(decay) => decay.velocity,
        }
    }

    /// Angle accumulated by the current drag or decay, degrees
    pub fn session_angle(&self) -> f32 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Dragging(drag) => drag.angle,
            Phase::Decaying(decay) => decay.angle,
        }
    }

    /// Length of the running decay, if any
    pub fn decay_duration(&self) -> Option<f32> {
        match self.phase {
            Phase::Decaying(decay) => Some(decay.duration),
            _ => None,
        }
    }

    /// Start a drag with the controller at `controller`.
    ///
    /// Ignored while already dragging; interrupts a running decay.
    pub fn begin_drag(&mut self, controller: Point3D) -> bool {
        if matches!(self.phase, Phase::Dragging(_)) {
            return false;
        }
        if matches!(self.phase, Phase::Decaying(_)) {
            tracing::debug!("Decay interrupted by a new drag");
        }

        self.phase = Phase::Dragging(DragSession {
            base_rotation: self.pivot.rotation,
            base_direction: controller - self.pivot.position,
            controller,
            angle: 0.0,
            velocity: 0.0,
        });
        true
    }

    /// Latest controller position; only meaningful while dragging
    pub fn move_controller(&mut self, controller: Point3D) {
        if let Phase::Dragging(drag) = &mut self.phase {
            drag.controller = controller;
        }
    }

    /// Release the drag and hand the last velocity to the decay phase
    pub fn end_drag(&mut self) {
        let Phase::Dragging(drag) = self.phase else {
            return;
        };

        let duration = decay_duration(drag.velocity, self.drag);
        tracing::debug!(
            "Drag released at {:.1} deg/s, decaying over {:.2}s",
            drag.velocity,
            duration
        );
        self.phase = Phase::Decaying(DecaySession {
            base_rotation: self.pivot.rotation,
            velocity: drag.velocity,
            angle: 0.0,
            duration,
            progress: 0.0,
        });
    }

    /// Advance by `dt` seconds and return the phase after the tick
    pub fn tick(&mut self, dt: f32) -> RotationPhase {
        match self.phase {
            Phase::Idle => {}
            Phase::Dragging(mut drag) => {
                let direction = drag.controller - self.pivot.position;
                let angle = Vector3D::signed_angle(&drag.base_direction, &direction, &Vector3D::UP)
                    * self.sensitivity;
                if dt > 0.0 {
                    drag.velocity = (angle - drag.angle) / dt;
                }
                drag.angle = angle;
                self.pivot.rotation = drag.base_rotation * Quaternion::yaw(angle);
                self.phase = Phase::Dragging(drag);
            }
            Phase::Decaying(mut decay) => {
                if decay.duration <= EPSILON {
                    self.finish_decay();
                    return self.phase();
                }

                decay.angle += decay.velocity * dt;
                decay.velocity = lerp(decay.velocity, 0.0, decay.progress);
                decay.progress += dt / decay.duration;
                self.pivot.rotation = decay.base_rotation * Quaternion::yaw(decay.angle);

                if decay.progress > 1.0 {
                    self.finish_decay();
                } else {
                    self.phase = Phase::Decaying(decay);
                }
            }
        }

        self.phase()
    }

    fn finish_decay(&mut self) {
        tracing::debug!("Rotation came to rest");
        self.phase = Phase::Idle;
    }
}

impl Grabbable for InertialRotator {
    fn on_grab_start(&mut self, interactor: Point3D) {
        self.begin_drag(interactor);
    }

    fn on_grab_end(&mut self) {
        self.end_drag();
    }

    fn is_held(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.02;

    fn rotator(sensitivity: f32, drag: f32) -> InertialRotator {
        InertialRotator::new(Transform::identity(), sensitivity, drag)
    }

    fn yaw_of(rotator: &InertialRotator) -> f32 {
        let f = rotator.rotation().forward();
        f.x.atan2(f.z).to_degrees()
    }

    #[test]
    fn test_quarter_sweep_accumulates_ninety_degrees() {
        let mut r = rotator(1.0, 0.33);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        r.move_controller(Point3D::new(1.0, 0.0, 0.0));
        r.tick(DT);

        assert!((r.session_angle() - 90.0).abs() < 0.001);
        assert!((yaw_of(&r) - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_sweep_from_right_to_forward_is_negative() {
        let mut r = rotator(1.0, 0.33);
        r.begin_drag(Point3D::new(1.0, 0.0, 0.0));
        r.move_controller(Point3D::new(0.0, 0.0, 1.0));
        r.tick(DT);

        assert!((r.session_angle() + 90.0).abs() < 0.001);
    }

    #[test]
    fn test_sensitivity_scales_angle_and_velocity() {
        let mut r = rotator(3.0, 0.33);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        let ten_degrees = Quaternion::yaw(10.0).rotate_vector(Vector3D::FORWARD);
        r.move_controller(ten_degrees.to_point());
        r.tick(0.1);

        assert!((r.session_angle() - 30.0).abs() < 0.01);
        assert!((r.angular_velocity() - 300.0).abs() < 0.1);
    }

    #[test]
    fn test_drag_is_relative_to_pivot_position() {
        let pivot = Transform::from_position(Point3D::new(5.0, 0.0, 5.0));
        let mut r = InertialRotator::new(pivot, 1.0, 1.0);
        r.begin_drag(Point3D::new(5.0, 0.0, 6.0));
        r.move_controller(Point3D::new(6.0, 0.0, 5.0));
        r.tick(DT);

        assert!((r.session_angle() - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_offset_composes_in_local_frame() {
        let tilted = Quaternion::angle_axis(30.0, Vector3D::RIGHT);
        let pivot = Transform::from_position_rotation(Point3D::ORIGIN, tilted);
        let mut r = InertialRotator::new(pivot, 1.0, 1.0);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        r.move_controller(Point3D::new(1.0, 0.0, 0.0));
        r.tick(DT);

        let expected = tilted * Quaternion::yaw(90.0);
        assert!(r.rotation().angle_to(&expected) < 0.01);
    }

    #[test]
    fn test_second_drag_start_is_ignored() {
        let mut r = rotator(1.0, 1.0);
        assert!(r.begin_drag(Point3D::new(0.0, 0.0, 1.0)));
        r.move_controller(Point3D::new(1.0, 0.0, 0.0));
        r.tick(DT);

        assert!(!r.begin_drag(Point3D::new(1.0, 0.0, 0.0)));
        r.tick(DT);
        assert!((r.session_angle() - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_decay_duration_matches_velocity_over_drag() {
        assert!((decay_duration(90.0, 0.33) - 272.727_27).abs() < 0.01);
        assert!((decay_duration(-45.0, 3.0) - 15.0).abs() < 0.0001);
        assert_eq!(decay_duration(120.0, 0.0), 0.0);
    }

    #[test]
    fn test_release_enters_decay_with_last_velocity() {
        let mut r = rotator(1.0, 50.0);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        let step = Quaternion::yaw(2.0).rotate_vector(Vector3D::FORWARD);
        r.move_controller(step.to_point());
        r.tick(DT);
        r.end_drag();

        assert_eq!(r.phase(), RotationPhase::Decaying);
        assert!((r.angular_velocity() - 100.0).abs() < 0.1);
        assert!((r.decay_duration().unwrap() - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_decay_comes_to_rest() {
        let mut r = rotator(1.0, 50.0);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        let step = Quaternion::yaw(2.0).rotate_vector(Vector3D::FORWARD);
        r.move_controller(step.to_point());
        r.tick(DT);
        r.end_drag();

        let duration = r.decay_duration().unwrap();
        let mut ticks = 0;
        let mut last_velocity = r.angular_velocity();
        while r.phase() == RotationPhase::Decaying {
            last_velocity = r.angular_velocity();
            r.tick(DT);
            ticks += 1;
            assert!(ticks < 10_000, "decay never finished");
        }

        let elapsed = ticks as f32 * DT;
        assert!(elapsed <= duration + 2.0 * DT);
        assert!(last_velocity.abs() < 1.0);
        assert_eq!(r.angular_velocity(), 0.0);
        // Decay keeps turning the table in the drag direction.
        assert!(yaw_of(&r) > 2.0);
    }

    #[test]
    fn test_zero_drag_stops_on_first_tick() {
        let mut r = rotator(1.0, 0.0);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        r.move_controller(Point3D::new(1.0, 0.0, 0.0));
        r.tick(DT);
        r.end_drag();

        let before = r.rotation();
        assert_eq!(r.tick(DT), RotationPhase::Idle);
        assert_eq!(r.rotation(), before);
    }

    #[test]
    fn test_zero_length_drag_has_no_motion() {
        let mut r = rotator(1.0, 0.33);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        r.end_drag();

        assert_eq!(r.decay_duration(), Some(0.0));
        assert_eq!(r.tick(DT), RotationPhase::Idle);
        assert!(r.rotation().angle_to(&Quaternion::IDENTITY) < 0.001);
    }

    #[test]
    fn test_drag_during_decay_takes_over() {
        let mut r = rotator(1.0, 1.0);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        r.move_controller(Point3D::new(1.0, 0.0, 0.0));
        r.tick(DT);
        r.end_drag();
        r.tick(DT);

        let held_at = r.rotation();
        assert!(r.begin_drag(Point3D::new(0.0, 0.0, 1.0)));
        assert_eq!(r.phase(), RotationPhase::Dragging);
        r.tick(DT);
        assert!(r.rotation().angle_to(&held_at) < 0.01);
    }

    #[test]
    fn test_zero_dt_keeps_velocity() {
        let mut r = rotator(1.0, 1.0);
        r.begin_drag(Point3D::new(0.0, 0.0, 1.0));
        let step = Quaternion::yaw(1.0).rotate_vector(Vector3D::FORWARD);
        r.move_controller(step.to_point());
        r.tick(0.1);
        r.tick(0.0);
        assert!((r.angular_velocity() - 10.0).abs() < 0.01);
    }
}
