//! Detection and correction of coordinate drift.
//!
//! Relaxation anchors wherever the pivot is, so after insertions above the viewport or height
//! corrections the first item can end up with a negative top, or with a gap above it. Such a
//! layout is "denormalized": the origin of list coordinates no longer matches the first item.

use crate::relax::relax_layout;
use crate::{Item, ItemKey, Layout, Rectangle};

/// Returns `true` when the drift is visible in `viewport`.
///
/// That is the case when the first item intersecting the viewport has a negative top, or when
/// it is the first item of the list and sits below the origin.
pub fn is_denormalization_visible<K: ItemKey, T>(
    viewport: &Rectangle,
    layout: &Layout<K>,
    list: &[Item<K, T>],
) -> bool {
    let first_in_view = list.iter().enumerate().find_map(|(index, item)| {
        let r = layout.rectangle(&item.key)?;
        r.intersects(viewport).then_some((index, r))
    });
    match first_in_view {
        Some((index, r)) => r.top < 0.0 || (index == 0 && r.top > 0.0),
        None => false,
    }
}

/// Returns `true` when the first laid-out item has a negative top, visible or not.
pub fn is_top_denormalized<K: ItemKey, T>(layout: &Layout<K>, list: &[Item<K, T>]) -> bool {
    list.iter()
        .find_map(|item| layout.rectangle(&item.key))
        .is_some_and(|r| r.top < 0.0)
}

/// Moves the first laid-out item to `top = 0` and relaxes the rest from it.
///
/// Returns the shift applied to every rectangle (`-old_top`; `0` when already normalized).
/// To keep the picture still, the viewport has to scroll by the same amount.
pub fn normalize_top<K: ItemKey, T>(
    layout: &mut Layout<K>,
    list: &[Item<K, T>],
    estimate_height: &dyn Fn(&T) -> f64,
) -> f64 {
    let first = list
        .iter()
        .enumerate()
        .find_map(|(index, item)| layout.rectangle(&item.key).map(|r| (index, item, r)));
    let Some((index, item, r)) = first else {
        return 0.0;
    };
    if r.top == 0.0 {
        return 0.0;
    }
    let shift = -r.top;
    layout.set_top(&item.key, 0.0);
    relax_layout(list, index, layout, estimate_height);
    vdebug!(shift, pivot = index, "normalize_top");
    shift
}
