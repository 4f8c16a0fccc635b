use std::collections::HashSet;

use crate::{Item, ItemKey, Layout, Rectangle, RenderableItem, Rendition};

/// Selects the items whose rectangle intersects `viewport`, in list order.
///
/// Items with a negative top are skipped: they belong to a denormalized region that is not
/// reachable by scrolling until the layout is normalized. Items without a rectangle are
/// skipped too.
pub fn calculate_rendition<K: ItemKey, T: Clone>(
    layout: &Layout<K>,
    list: &[Item<K, T>],
    viewport: &Rectangle,
) -> Rendition<K, T> {
    // TODO: tops are monotonic after relaxation, so the first and last intersecting items
    // could be found by binary search instead of a full scan.
    list.iter()
        .filter_map(|item| {
            let r = layout.rectangle(&item.key)?;
            (r.top >= 0.0 && r.intersects(viewport)).then(|| renderable(item, &r))
        })
        .collect()
}

/// Like [`calculate_rendition`], but when the new rendition adds no key and drops some, the
/// dropped item whose top is closest to the viewport top is kept (appended last).
///
/// This keeps a view that is scrolling out alive for one more pass, e.g. so that it can keep
/// input focus.
pub fn calculate_rendition_retaining<K: ItemKey, T: Clone>(
    layout: &Layout<K>,
    list: &[Item<K, T>],
    viewport: &Rectangle,
    previous: &[RenderableItem<K, T>],
) -> Rendition<K, T> {
    let mut next = calculate_rendition(layout, list, viewport);
    let next_keys: HashSet<&K> = next.iter().map(|r| &r.item.key).collect();
    let previous_keys: HashSet<&K> = previous.iter().map(|r| &r.item.key).collect();

    let added = next_keys.iter().any(|k| !previous_keys.contains(k));
    if added {
        return next;
    }

    let departing = previous
        .iter()
        .filter(|r| !next_keys.contains(&r.item.key))
        .filter_map(|r| {
            let rect = layout.rectangle(&r.item.key)?;
            Some((r, (rect.top - viewport.top).abs(), rect))
        })
        .min_by(|(_, a, _), (_, b, _)| a.total_cmp(b));

    if let Some((r, _, rect)) = departing {
        vtrace!("calculate_rendition: retaining departing item");
        let item = r.item.clone();
        next.push(renderable(&item, &rect));
    }
    next
}

/// Re-derives offsets for the items already in `rendition`, without changing membership.
///
/// Used after a pure height correction. Entries whose key lost its rectangle are dropped.
pub fn relayout_rendition<K: ItemKey, T: Clone>(
    rendition: &[RenderableItem<K, T>],
    layout: &Layout<K>,
) -> Rendition<K, T> {
    rendition
        .iter()
        .filter_map(|r| {
            let rect = layout.rectangle(&r.item.key)?;
            Some(renderable(&r.item, &rect))
        })
        .collect()
}

/// The total scrollable extent: the bottom of the last item's rectangle, or `0`.
pub fn runway_height<K: ItemKey, T>(layout: &Layout<K>, list: &[Item<K, T>]) -> f64 {
    list.iter()
        .rev()
        .find_map(|item| layout.rectangle(&item.key))
        .map_or(0.0, |r| r.bottom())
}

/// Drops rendition entries whose key is no longer in `list`.
pub fn prune_missing<K: ItemKey, T: Clone>(
    rendition: &[RenderableItem<K, T>],
    list: &[Item<K, T>],
) -> Rendition<K, T> {
    let keys: HashSet<&K> = list.iter().map(|item| &item.key).collect();
    rendition
        .iter()
        .filter(|r| keys.contains(&r.item.key))
        .cloned()
        .collect()
}

/// Structural equality: same keys, same data, same offsets, same order.
pub fn is_equal_rendition<K: PartialEq, T: PartialEq>(
    a: &[RenderableItem<K, T>],
    b: &[RenderableItem<K, T>],
) -> bool {
    a == b
}

pub(crate) fn renderable<K: Clone, T: Clone>(
    item: &Item<K, T>,
    rect: &Rectangle,
) -> RenderableItem<K, T> {
    RenderableItem {
        item: item.clone(),
        offset: rect.top.round(),
    }
}
