//! Array-backed binary min-heap over expiration instants.
//!
//! Items are owned by a [`Slab`]; the heap itself only orders slab ids. Every item records the
//! heap position it currently occupies (`slot`), and [`IndexedHeap::swap`] is the only place that
//! moves ids around, so the recorded slot can never drift from the real one.
use super::slab::Slab;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub(super) struct TtlItem<K, V> {
    pub(super) expiration: DateTime<Utc>,
    pub(super) slot: usize,
    pub(super) key: K,
    pub(super) value: V,
}

/// Ordering key of a heap position. `Vacant` (a position whose item is gone) sorts before any
/// real expiration so a hole surfaces at the root and is discarded on the next pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Rank {
    Vacant,
    Expires(DateTime<Utc>),
}

#[derive(Debug)]
pub(super) struct IndexedHeap<K, V> {
    slots: Vec<usize>,
    items: Slab<TtlItem<K, V>>,
}

impl<K, V> IndexedHeap<K, V> {
    pub(super) fn with_capacity(cap: usize) -> Self {
        Self { slots: Vec::with_capacity(cap), items: Slab::with_capacity(cap) }
    }

    pub(super) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(super) fn item(&self, id: usize) -> Option<&TtlItem<K, V>> {
        self.items.get(id)
    }

    pub(super) fn item_mut(&mut self, id: usize) -> Option<&mut TtlItem<K, V>> {
        self.items.get_mut(id)
    }

    pub(super) fn rank(&self, slot: usize) -> Option<Rank> {
        let id = self.slots.get(slot)?;
        Some(self.items.get(*id).map_or(Rank::Vacant, |item| Rank::Expires(item.expiration)))
    }

    pub(super) fn peek(&self) -> Option<&TtlItem<K, V>> {
        self.items.get(*self.slots.first()?)
    }

    /// Appends the item and sifts it up. Returns the slab id that stays valid until removal.
    pub(super) fn push(&mut self, item: TtlItem<K, V>) -> usize {
        let id = self.items.insert(item);
        self.slots.push(id);
        let slot = self.slots.len() - 1;
        self.record_slot(slot);
        self.sift_up(slot);
        id
    }

    /// Removes the root. `None` either when empty or when the root was a vacant position.
    pub(super) fn pop(&mut self) -> Option<TtlItem<K, V>> {
        self.remove_at(0)
    }

    /// Replaces `slot` with the last position, shrinks by one and restores order around the
    /// moved element in whichever direction it needs.
    pub(super) fn remove_at(&mut self, slot: usize) -> Option<TtlItem<K, V>> {
        if slot >= self.slots.len() {
            return None;
        }
        let last = self.slots.len() - 1;
        if slot != last {
            self.swap(slot, last);
        }
        let id = self.slots.pop()?;
        if slot < self.slots.len() {
            self.fix(slot);
        }
        self.items.remove(id)
    }

    /// Restores heap order after the expiration at `slot` changed.
    pub(super) fn fix(&mut self, slot: usize) {
        if !self.sift_down(slot) {
            self.sift_up(slot);
        }
    }

    pub(super) fn clear(&mut self) {
        self.slots.clear();
        self.items.clear();
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.rank(i) < self.rank(j)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
        self.record_slot(i);
        self.record_slot(j);
    }

    fn record_slot(&mut self, slot: usize) {
        if let Some(item) = self.slots.get(slot).copied().and_then(|id| self.items.get_mut(id)) {
            item.slot = slot;
        }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    /// Returns whether the element moved.
    fn sift_down(&mut self, start: usize) -> bool {
        let n = self.slots.len();
        let mut slot = start;
        loop {
            let left = 2 * slot + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let child = if right < n && self.less(right, left) { right } else { left };
            if !self.less(child, slot) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
        slot > start
    }

    #[cfg(test)]
    pub(super) fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    #[cfg(test)]
    pub(super) fn assert_invariants(&self) {
        for (slot, id) in self.slots.iter().enumerate() {
            let item = self.items.get(*id).expect("live slot must point at an item");
            assert_eq!(item.slot, slot, "recorded slot drifted");
            if slot > 0 {
                let parent = (slot - 1) / 2;
                assert!(self.rank(parent) <= self.rank(slot), "heap order broken at {slot}");
            }
        }
    }
}
