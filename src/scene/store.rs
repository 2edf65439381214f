//! The authoritative list of placed items.
//!
//! Every mutation is synchronous and total: an unknown id is a no-op, never an error, since an
//! item may be deleted while a gesture targeting it is still in flight.

use std::collections::BTreeMap;

use crate::foundation::core::Pose;
use crate::foundation::math::clamp_pct;
use crate::scene::item::{Item, StylePatch};

/// Map from item id to pose; the snapshot format used by steps.
pub type PoseMap = BTreeMap<String, Pose>;

/// First z handed out to a freshly created store.
const FIRST_Z: i64 = 10;

/// Paint-order change for one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZOrder {
    /// Move up (positive) or down (negative) by a relative amount.
    By(i64),
    /// Above every other item.
    ToFront,
    /// Below every other item.
    ToBack,
}

/// Ordered item collection, kept in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemStore {
    items: Vec<Item>,
    next_z: i64,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_z: FIRST_Z,
        }
    }

    /// Build a store from loaded items, sanitising coordinates.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut store = Self::new();
        store.restore(items);
        store
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up one item.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    /// Whether `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|it| it.id == id)
    }

    /// Next z value for a new item.
    pub fn next_z(&mut self) -> i64 {
        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z
    }

    /// Append an item. An item with an existing id replaces the old one in place.
    pub fn add(&mut self, mut item: Item) {
        item.sanitize();
        self.next_z = self.next_z.max(item.z.saturating_add(1));
        match self.get_mut(&item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Move an item to a clamped percent position. Returns whether the item exists.
    pub fn move_to(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(it) = self.get_mut(id) else {
            return false;
        };
        it.x = clamp_pct(x);
        it.y = clamp_pct(y);
        true
    }

    /// Shift an item by a percent delta.
    pub fn nudge(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        let Some((x, y)) = self.get(id).map(|it| (it.x, it.y)) else {
            return false;
        };
        self.move_to(id, x + dx, y + dy)
    }

    /// Apply a partial style update.
    pub fn patch(&mut self, id: &str, patch: &StylePatch) -> bool {
        let Some(it) = self.get_mut(id) else {
            return false;
        };
        it.apply_patch(patch);
        true
    }

    /// Remove an item, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Item> {
        let idx = self.items.iter().position(|it| it.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Change an item's paint order.
    pub fn reorder(&mut self, id: &str, order: ZOrder) -> bool {
        let max = self.items.iter().map(|it| it.z).max().unwrap_or(0);
        let min = self.items.iter().map(|it| it.z).min().unwrap_or(0);
        let Some(it) = self.get_mut(id) else {
            return false;
        };
        it.z = match order {
            ZOrder::By(delta) => it.z.saturating_add(delta),
            ZOrder::ToFront => max.saturating_add(1),
            ZOrder::ToBack => min.saturating_sub(1),
        };
        let z = it.z;
        self.next_z = self.next_z.max(z.saturating_add(1));
        true
    }

    /// Copy an item under a new id, offset by +2%/+2% and one layer up.
    pub fn duplicate(&mut self, id: &str, new_id: impl Into<String>) -> Option<&Item> {
        let mut copy = self.get(id)?.clone();
        copy.id = new_id.into();
        copy.x = clamp_pct(copy.x + 2.0);
        copy.y = clamp_pct(copy.y + 2.0);
        copy.z = copy.z.saturating_add(1);
        let new_id = copy.id.clone();
        self.add(copy);
        self.get(&new_id)
    }

    /// Items sorted for painting: ascending z, ties by insertion order.
    pub fn paint_order(&self) -> Vec<&Item> {
        let mut out: Vec<&Item> = self.items.iter().collect();
        // `sort_by_key` is stable, which gives the insertion-order tie break.
        out.sort_by_key(|it| it.z);
        out
    }

    /// Current pose of every item.
    pub fn poses(&self) -> PoseMap {
        self.items
            .iter()
            .map(|it| (it.id.clone(), it.pose()))
            .collect()
    }

    /// Write poses for the ids present in `poses`; other items are untouched.
    pub fn apply_poses(&mut self, poses: &PoseMap) {
        for it in &mut self.items {
            if let Some(p) = poses.get(&it.id) {
                it.set_pose(*p);
            }
        }
    }

    /// Overwrite one item's pose.
    pub fn set_pose(&mut self, id: &str, pose: Pose) -> bool {
        let Some(it) = self.get_mut(id) else {
            return false;
        };
        it.set_pose(pose);
        true
    }

    /// Full copy of the item array, for undo history.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Replace the whole item array.
    pub fn restore(&mut self, items: Vec<Item>) {
        self.items = items;
        for it in &mut self.items {
            it.sanitize();
        }
        let max_z = self.items.iter().map(|it| it.z).max();
        self.next_z = max_z.map_or(FIRST_Z, |z| z.saturating_add(1).max(FIRST_Z));
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.restore(Vec::new());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
