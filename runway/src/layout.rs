use std::collections::HashMap;

use crate::{ItemKey, Rectangle};

/// Rectangles by item key.
///
/// Entries are created lazily, the first time relaxation or measurement touches a key, and are
/// never removed: an entry for an item that left the list is harmless and lets its height
/// survive if the item comes back.
#[derive(Clone, Debug)]
pub struct Layout<K> {
    rectangles: HashMap<K, Rectangle>,
}

impl<K> Default for Layout<K> {
    fn default() -> Self {
        Self {
            rectangles: HashMap::new(),
        }
    }
}

impl<K: ItemKey> Layout<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rectangle(&self, key: &K) -> Option<Rectangle> {
        self.rectangles.get(key).copied()
    }

    /// Creates (or replaces) the entry for `key` at `top = 0`.
    pub fn initialize(&mut self, key: K, height: f64) -> Rectangle {
        let r = Rectangle::new(0.0, sanitize_height(height));
        self.rectangles.insert(key, r);
        r
    }

    /// Returns the rectangle for `key`, initializing it with `estimate()` when absent.
    pub fn get_or_initialize(&mut self, key: &K, estimate: impl FnOnce() -> f64) -> Rectangle {
        if let Some(r) = self.rectangles.get(key) {
            return *r;
        }
        self.initialize(key.clone(), estimate())
    }

    /// Records a measured height.
    ///
    /// Returns whether the stored height changed. An absent entry is created at `top = 0`, which
    /// always counts as a change.
    pub fn update_height(&mut self, key: &K, height: f64) -> bool {
        let height = sanitize_height(height);
        match self.rectangles.get_mut(key) {
            Some(r) => {
                let changed = r.height != height;
                r.height = height;
                changed
            }
            None => {
                self.rectangles
                    .insert(key.clone(), Rectangle::new(0.0, height));
                true
            }
        }
    }

    pub fn set_rectangle(&mut self, key: K, rectangle: Rectangle) {
        self.rectangles.insert(key, rectangle);
    }

    /// Moves an existing entry. Returns `false` when `key` has no rectangle.
    pub fn set_top(&mut self, key: &K, top: f64) -> bool {
        match self.rectangles.get_mut(key) {
            Some(r) => {
                r.top = top;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Rectangle)> {
        self.rectangles.iter()
    }

    /// Exports the known heights (useful for persistence).
    pub fn export_heights(&self) -> Vec<(K, f64)> {
        self.rectangles
            .iter()
            .map(|(k, r)| (k.clone(), r.height))
            .collect()
    }

    /// Merges previously exported heights.
    ///
    /// Imported entries start at `top = 0`; the next relaxation positions them.
    pub fn import_heights(&mut self, entries: impl IntoIterator<Item = (K, f64)>) -> usize {
        let mut n = 0usize;
        for (key, height) in entries {
            self.update_height(&key, height);
            n = n.saturating_add(1);
        }
        vdebug!(entries = n, "Layout::import_heights");
        n
    }
}

fn sanitize_height(height: f64) -> f64 {
    if height.is_finite() && height >= 0.0 {
        return height;
    }
    vwarn!(height, "Layout: clamping invalid height to 0");
    0.0
}
