use crate::Slot;

/// One entry of the virtualized list.
///
/// `key` must be unique within a list and stable across reorderings; `data` is opaque to the
/// engine apart from equality, which decides whether a rendition changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<K, T> {
    pub key: K,
    pub data: T,
}

impl<K, T> Item<K, T> {
    pub fn new(key: K, data: T) -> Self {
        Self { key, data }
    }
}

/// An item selected for presentation, with its offset in list coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderableItem<K, T> {
    pub item: Item<K, T>,
    /// Rounded top of the item's rectangle.
    pub offset: f64,
}

pub type Rendition<K, T> = Vec<RenderableItem<K, T>>;

/// What an update pass should do. Requests submitted within one frame are OR-merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateRequest {
    /// Re-measure every rendered item.
    pub sync_heights: bool,
    /// Re-run relaxation even if no height changed.
    pub relax_layout: bool,
    /// Recompute rendition membership (not just offsets).
    pub update_rendition: bool,
    /// Scrolling has been idle for the quiescence interval.
    pub quiescent: bool,
}

impl UpdateRequest {
    pub const fn layout() -> Self {
        Self {
            sync_heights: false,
            relax_layout: true,
            update_rendition: true,
            quiescent: false,
        }
    }

    pub const fn rendition() -> Self {
        Self {
            sync_heights: false,
            relax_layout: false,
            update_rendition: true,
            quiescent: false,
        }
    }

    pub const fn sync_heights() -> Self {
        Self {
            sync_heights: true,
            relax_layout: false,
            update_rendition: false,
            quiescent: false,
        }
    }

    pub const fn quiescent() -> Self {
        Self {
            sync_heights: false,
            relax_layout: false,
            update_rendition: false,
            quiescent: true,
        }
    }

    #[must_use]
    pub fn merge(self, next: UpdateRequest) -> UpdateRequest {
        UpdateRequest {
            sync_heights: self.sync_heights || next.sync_heights,
            relax_layout: self.relax_layout || next.relax_layout,
            update_rendition: self.update_rendition || next.update_rendition,
            quiescent: self.quiescent || next.quiescent,
        }
    }
}

/// The unit committed to the host for repaint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame<K, T> {
    pub rendition: Rendition<K, T>,
    /// `slots[i]` is the view slot of `rendition[i]`.
    pub slots: Vec<Slot>,
    pub runway_height: f64,
    pub renderer_revision: u64,
}

impl<K, T> Default for Frame<K, T> {
    fn default() -> Self {
        Self {
            rendition: Vec::new(),
            slots: Vec::new(),
            runway_height: 0.0,
            renderer_revision: 0,
        }
    }
}

impl<K, T> Frame<K, T> {
    pub fn len(&self) -> usize {
        self.rendition.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendition.is_empty()
    }

    /// Iterates `(item, offset, slot)` in rendition order.
    pub fn iter(&self) -> impl Iterator<Item = (&Item<K, T>, f64, Slot)> {
        self.rendition
            .iter()
            .zip(self.slots.iter())
            .map(|(r, s)| (&r.item, r.offset, *s))
    }

    /// Key → offset pairs, for logging and assertions.
    pub fn digest(&self) -> Vec<(&K, f64)> {
        self.rendition
            .iter()
            .map(|r| (&r.item.key, r.offset))
            .collect()
    }
}
