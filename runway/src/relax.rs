use crate::{Item, ItemKey, Layout};

/// Recomputes every item's top, anchored at `list[pivot]`.
///
/// The pivot keeps its current top (or `0` when it has never been laid out). Items after it
/// are stacked downward from its bottom, items before it upward from its top. Missing
/// rectangles are created from `estimate_height`.
///
/// Forward tops are rounded up and backward tops rounded down, so neighbours never overlap
/// even with fractional heights.
///
/// This is the only place absolute positions are assigned. `pivot >= list.len()` is a no-op.
pub fn relax_layout<K: ItemKey, T>(
    list: &[Item<K, T>],
    pivot: usize,
    layout: &mut Layout<K>,
    estimate_height: &dyn Fn(&T) -> f64,
) {
    let Some(pivot_item) = list.get(pivot) else {
        return;
    };
    let pivot_rect = layout.get_or_initialize(&pivot_item.key, || {
        estimate_height(&pivot_item.data)
    });
    vtrace!(
        pivot,
        count = list.len(),
        top = pivot_rect.top,
        "relax_layout"
    );

    let mut bottom = pivot_rect.bottom();
    for item in &list[pivot + 1..] {
        let r = layout.get_or_initialize(&item.key, || estimate_height(&item.data));
        let top = bottom.ceil();
        layout.set_top(&item.key, top);
        bottom = top + r.height;
    }

    let mut top = pivot_rect.top;
    for item in list[..pivot].iter().rev() {
        let r = layout.get_or_initialize(&item.key, || estimate_height(&item.data));
        let next = (top - r.height).floor();
        layout.set_top(&item.key, next);
        top = next;
    }
}
