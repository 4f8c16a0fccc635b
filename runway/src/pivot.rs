use core::cmp::Ordering;

use crate::{Item, ItemKey, Layout, Rectangle, RenderableItem};

/// How much of an item the viewport shows. Lower is more salient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PositioningGrade {
    /// The viewport surrounds the item.
    Inside = 0,
    /// The item is partially visible.
    Partial = 1,
    /// The item is outside the viewport.
    Outside = 2,
}

impl PositioningGrade {
    pub fn of(rect: &Rectangle, viewport: &Rectangle) -> Self {
        if viewport.surrounds(rect) {
            Self::Inside
        } else if viewport.intersects(rect) {
            Self::Partial
        } else {
            Self::Outside
        }
    }
}

/// Ranks the rendered keys by salience, most salient first.
///
/// Items are ordered by [`PositioningGrade`], then by the distance between their top and the
/// viewport top. Keys without a rectangle sort last.
pub fn order_by_salience<K: ItemKey, T>(
    rendition: &[RenderableItem<K, T>],
    layout: &Layout<K>,
    viewport: &Rectangle,
) -> Vec<K> {
    let mut ranked: Vec<(Option<(PositioningGrade, f64)>, &K)> = rendition
        .iter()
        .map(|r| {
            let key = &r.item.key;
            let rank = layout.rectangle(key).map(|rect| {
                (
                    PositioningGrade::of(&rect, viewport),
                    (rect.top - viewport.top).abs(),
                )
            });
            (rank, key)
        })
        .collect();

    // Stable sort: ties keep rendition order.
    ranked.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some((ga, da)), Some((gb, db))) => ga.cmp(gb).then(da.total_cmp(db)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked.into_iter().map(|(_, k)| k.clone()).collect()
}

/// Picks the list index to anchor the next relaxation.
///
/// Walks `salience` in rank order and returns the list index of the first key that is also in
/// `rendition` and still in `list`. Falls back to `0`.
pub fn find_pivot_index<K: ItemKey, T>(
    list: &[Item<K, T>],
    rendition: &[RenderableItem<K, T>],
    salience: &[K],
) -> usize {
    salience
        .iter()
        .filter(|key| rendition.iter().any(|r| &r.item.key == *key))
        .find_map(|key| index_of_key(list, key))
        .unwrap_or(0)
}

pub(crate) fn index_of_key<K: ItemKey, T>(list: &[Item<K, T>], key: &K) -> Option<usize> {
    list.iter().position(|item| &item.key == key)
}
