//! Item pedestals, ball emitters and table layout

mod ball;
mod item;
mod layout;

pub use ball::BallSpawner;
pub use item::{ItemId, ItemPhase, ItemSpawner, PedestalItem, ReleasedItem};
pub use layout::{pedestal_positions, recenter_position};
