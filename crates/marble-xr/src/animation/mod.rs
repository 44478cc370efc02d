//! Easing curves and progress tweens for spawn animations

mod easing;
mod tween;

pub use easing::Easing;
pub use tween::Tween;
