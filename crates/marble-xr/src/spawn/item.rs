//! Pedestal that presents one item at a time
//!
//! A fresh item grows out of the pedestal, idles with a slow spin, and is
//! replaced as soon as someone picks it up. The picked item keeps animating
//! up to full size on its own.

use crate::animation::Tween;
use crate::config::ItemSpawnerConfig;
use crate::spatial::{Point3D, Quaternion, Transform, Vector3D};

pub type ItemId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum ItemPhase {
    /// Growing out of the pedestal
    Appearing(Tween),
    /// At rest scale and height, spinning
    Resting,
}

/// The item currently offered by the pedestal
#[derive(Debug, Clone, PartialEq)]
pub struct PedestalItem {
    pub id: ItemId,
    /// Transform relative to the pedestal
    pub transform: Transform,
    pub phase: ItemPhase,
}

/// An item that was picked up and is growing to full size
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasedItem {
    pub id: ItemId,
    pub transform: Transform,
    start_scale: f32,
    grow: Tween,
}

impl ReleasedItem {
    pub fn is_full_size(&self) -> bool {
        self.grow.complete
    }
}

#[derive(Debug, Clone)]
pub struct ItemSpawner {
    config: ItemSpawnerConfig,
    next_id: ItemId,
    current: PedestalItem,
    released: Vec<ReleasedItem>,
}

impl ItemSpawner {
    pub fn new(config: ItemSpawnerConfig) -> Self {
        let current = Self::fresh_item(&config, 0);
        Self {
            config,
            next_id: 1,
            current,
            released: Vec::new(),
        }
    }

    fn fresh_item(config: &ItemSpawnerConfig, id: ItemId) -> PedestalItem {
        PedestalItem {
            id,
            transform: Transform::identity().with_uniform_scale(0.0),
            phase: ItemPhase::Appearing(
                Tween::new(0.0, 1.0, config.spawn_duration).with_easing(config.easing),
            ),
        }
    }

    pub fn current(&self) -> &PedestalItem {
        &self.current
    }

    pub fn released(&self) -> &[ReleasedItem] {
        &self.released
    }

    /// The current item was grabbed: hand it off and start a new one.
    ///
    /// Returns the id of the replacement, or `None` if `id` is not the
    /// item on the pedestal.
    pub fn on_item_grabbed(&mut self, id: ItemId) -> Option<ItemId> {
        if id != self.current.id {
            return None;
        }

        let replacement = Self::fresh_item(&self.config, self.next_id);
        self.next_id += 1;
        let taken = std::mem::replace(&mut self.current, replacement);

        tracing::debug!("Item {} taken, presenting item {}", taken.id, self.current.id);
        self.released.push(ReleasedItem {
            id: taken.id,
            start_scale: taken.transform.scale.x,
            transform: taken.transform,
            grow: Tween::new(0.0, 1.0, self.config.spawn_duration).with_easing(self.config.easing),
        });

        Some(self.current.id)
    }

    /// Advance animations; returns released items that reached full size
    pub fn tick(&mut self, dt: f32) -> Vec<ItemId> {
        self.animate_current(dt);

        let spin = Quaternion::yaw(self.config.spin_speed * dt);
        self.current.transform.rotation = (self.current.transform.rotation * spin).normalize();

        let mut finished = Vec::new();
        for item in &mut self.released {
            if item.grow.complete {
                continue;
            }
            item.grow.update(dt);
            let scale = if item.grow.complete {
                1.0
            } else {
                item.start_scale + (1.0 - item.start_scale) * item.grow.eased()
            };
            item.transform.scale = Vector3D::ONE * scale;
            if item.grow.complete {
                finished.push(item.id);
            }
        }
        self.released.retain(|item| !item.grow.complete);

        finished
    }

    fn animate_current(&mut self, dt: f32) {
        let ItemPhase::Appearing(tween) = &mut self.current.phase else {
            return;
        };
        tween.update(dt);

        let (scale, height) = if tween.complete {
            (self.config.rest_scale, self.config.item_height)
        } else {
            let f = tween.eased();
            (self.config.rest_scale * f, self.config.item_height * f)
        };
        let done = tween.complete;

        self.current.transform.scale = Vector3D::ONE * scale;
        self.current.transform.position = Point3D::new(0.0, height, 0.0);
        if done {
            self.current.phase = ItemPhase::Resting;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.02;

    fn spawner() -> ItemSpawner {
        ItemSpawner::new(ItemSpawnerConfig::default())
    }

    #[test]
    fn test_new_item_starts_invisible() {
        let s = spawner();
        assert_eq!(s.current().transform.scale, Vector3D::ZERO);
        assert!(matches!(s.current().phase, ItemPhase::Appearing(_)));
    }

    #[test]
    fn test_item_reaches_exact_rest_pose() {
        let mut s = spawner();
        for _ in 0..30 {
            s.tick(DT);
        }

        let item = s.current();
        assert_eq!(item.phase, ItemPhase::Resting);
        assert_eq!(item.transform.scale, Vector3D::ONE * 0.25);
        assert_eq!(item.transform.position, Point3D::new(0.0, 0.1, 0.0));
    }

    #[test]
    fn test_appearing_is_monotonic() {
        let mut s = spawner();
        let mut last = 0.0;
        for _ in 0..25 {
            s.tick(DT);
            let scale = s.current().transform.scale.x;
            assert!(scale >= last);
            last = scale;
        }
    }

    #[test]
    fn test_resting_item_spins() {
        let mut s = spawner();
        for _ in 0..50 {
            s.tick(DT);
        }
        // 20 deg/s for one second
        let angle = s.current().transform.rotation.angle_to(&Quaternion::IDENTITY);
        assert!((angle - 20.0).abs() < 0.1);
    }

    #[test]
    fn test_grab_hands_off_and_replaces() {
        let mut s = spawner();
        for _ in 0..30 {
            s.tick(DT);
        }

        assert_eq!(s.on_item_grabbed(7), None);
        assert_eq!(s.on_item_grabbed(0), Some(1));
        assert_eq!(s.current().id, 1);
        assert_eq!(s.released().len(), 1);

        let mut finished = Vec::new();
        for _ in 0..30 {
            finished.extend(s.tick(DT));
        }
        assert_eq!(finished, vec![0]);
        assert!(s.released().is_empty());
    }

    #[test]
    fn test_released_item_grows_from_its_size() {
        let mut s = spawner();
        for _ in 0..30 {
            s.tick(DT);
        }
        s.on_item_grabbed(0);
        s.tick(DT);

        let growing = &s.released()[0];
        assert!(growing.transform.scale.x >= 0.25);
        assert!(growing.transform.scale.x < 1.0);
        assert!(!growing.is_full_size());
    }
}
