//! Pointer gestures on the rendering surface.
//!
//! Pointer positions arrive in client pixels; the surface rect converts them into pitch
//! percent. A gesture always terminates on pointer-up, including one delivered for focus loss
//! or outside the surface.

use crate::foundation::math::clamp_pct;
use crate::scene::item::Item;
use crate::scene::store::ItemStore;

/// On-screen bounds of the rendering surface, in client pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect of a surface drawn at the client origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Client point to clamped pitch percent. `None` for a collapsed surface.
    pub fn to_pct(&self, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
        if !self.is_usable() {
            return None;
        }
        Some((
            clamp_pct((client_x - self.left) / self.width * 100.0),
            clamp_pct((client_y - self.top) / self.height * 100.0),
        ))
    }
}

#[derive(Clone, Debug)]
struct Gesture {
    id: String,
    start_client: (f64, f64),
    origin_pct: (f64, f64),
    before: Vec<Item>,
    moved: bool,
}

/// Tracks at most one in-flight drag.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    active: Option<Gesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|g| g.id.as_str())
    }

    /// Begin dragging `id`. Returns `false` (and starts nothing) if the item is unknown.
    pub fn pointer_down(&mut self, store: &ItemStore, id: &str, client_x: f64, client_y: f64) -> bool {
        let Some(it) = store.get(id) else {
            return false;
        };
        self.active = Some(Gesture {
            id: id.to_owned(),
            start_client: (client_x, client_y),
            origin_pct: (it.x, it.y),
            before: store.snapshot(),
            moved: false,
        });
        true
    }

    /// Move the dragged item so it follows the pointer. No-op without an active gesture, for a
    /// collapsed surface, or once the dragged item has been deleted.
    pub fn pointer_move(
        &mut self,
        store: &mut ItemStore,
        rect: SurfaceRect,
        client_x: f64,
        client_y: f64,
    ) -> bool {
        let Some(g) = self.active.as_mut() else {
            return false;
        };
        if !rect.is_usable() {
            return false;
        }
        let nx = g.origin_pct.0 + (client_x - g.start_client.0) / rect.width * 100.0;
        let ny = g.origin_pct.1 + (client_y - g.start_client.1) / rect.height * 100.0;
        let applied = store.move_to(&g.id, nx, ny);
        g.moved |= applied;
        applied
    }

    /// Finish the gesture. Returns the pre-gesture item array when the gesture moved an item
    /// that still exists, for the caller to record as an undo step.
    pub fn pointer_up(&mut self, store: &ItemStore) -> Option<Vec<Item>> {
        let g = self.active.take()?;
        if !g.moved || !store.contains(&g.id) {
            return None;
        }
        if store.items() == g.before.as_slice() {
            return None;
        }
        Some(g.before)
    }

    /// Drop any in-flight gesture without committing it.
    pub fn abort(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/drag.rs"]
mod tests;
