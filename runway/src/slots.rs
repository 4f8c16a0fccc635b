use std::collections::HashMap;

use crate::ItemKey;

/// A recyclable view handle. Slots start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot(u32);

impl Slot {
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Assigns slots to rendered keys so a host can reuse a bounded pool of view instances.
///
/// A key keeps its slot while it stays rendered. Slots of keys that left are handed to newly
/// rendered keys before any new slot is minted, so the number of minted slots tracks the
/// largest rendition seen, not the number of distinct keys.
#[derive(Clone, Debug)]
pub struct SlotRecycler<K> {
    assignment: HashMap<K, Slot>,
    minted: u32,
}

impl<K> Default for SlotRecycler<K> {
    fn default() -> Self {
        Self {
            assignment: HashMap::new(),
            minted: 0,
        }
    }
}

impl<K: ItemKey> SlotRecycler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassigns slots for the next rendered key set and returns them in the same order.
    pub fn assign<'a>(&mut self, keys: impl IntoIterator<Item = &'a K>) -> Vec<Slot>
    where
        K: 'a,
    {
        let keys: Vec<&K> = keys.into_iter().collect();
        let mut kept: HashMap<&K, Slot> = HashMap::with_capacity(keys.len());
        for &key in &keys {
            if let Some(&slot) = self.assignment.get(key) {
                kept.insert(key, slot);
            }
        }

        // Popped from the back: smallest slot first.
        let mut recycled: Vec<Slot> = self
            .assignment
            .iter()
            .filter(|(k, _)| !kept.contains_key(k))
            .map(|(_, s)| *s)
            .collect();
        recycled.sort_unstable_by(|a, b| b.cmp(a));

        let mut next = HashMap::with_capacity(keys.len());
        let mut out = Vec::with_capacity(keys.len());
        for &key in &keys {
            let slot = match kept.get(key) {
                Some(&slot) => slot,
                None => match recycled.pop() {
                    Some(slot) => slot,
                    None => self.mint(),
                },
            };
            next.insert(key.clone(), slot);
            out.push(slot);
        }
        vtrace!(
            rendered = out.len(),
            minted = self.minted,
            "SlotRecycler::assign"
        );
        self.assignment = next;
        out
    }

    pub fn slot(&self, key: &K) -> Option<Slot> {
        self.assignment.get(key).copied()
    }

    /// Number of keys currently holding a slot.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Number of distinct slots ever handed out; the pool size a host needs.
    pub fn minted(&self) -> u32 {
        self.minted
    }

    pub fn clear(&mut self) {
        self.assignment.clear();
        self.minted = 0;
    }

    fn mint(&mut self) -> Slot {
        self.minted = self.minted.saturating_add(1);
        Slot(self.minted)
    }
}
