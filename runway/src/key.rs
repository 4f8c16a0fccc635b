/// Bound for item keys.
///
/// Keys identify items across list replacements: layout rectangles and slots are stored by key,
/// so a key must stay stable when its item moves.
pub trait ItemKey: core::hash::Hash + Eq + Clone {}
impl<K: core::hash::Hash + Eq + Clone> ItemKey for K {}
