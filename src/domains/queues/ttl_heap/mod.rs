//! Key-addressable priority queue ordered by expiration.
//!
//! ```text
//!       +--------------------+
//!       | HashMap<K, usize>  |   key index (key -> slab id)
//!       +---------+----------+
//!                 |
//!                 v
//!       +-------------------------+        +-----------------------+
//!       |  Slab<TtlItem<K, V>>    | <----- |  Vec<usize> (heap)    |
//!       |  expiration, slot, ...  |        |  min-heap by expiry   |
//!       +-------------------------+        +-----------------------+
//! ```
//!
//! Both views point at the same slab-owned item. The heap rewrites `slot` whenever it moves an
//! id, so a lookup through the key index always knows where to re-heapify or remove from.
mod heap;
mod slab;

use crate::domains::clock::{SystemClock, TClock, expires_at};
use chrono::{DateTime, Utc};
use heap::{IndexedHeap, Rank, TtlItem};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// Min-heap of keyed values ordered by expiration, with O(log n) removal and TTL refresh by key.
///
/// Not synchronized. `get_and_refresh` moves items too, so shared use needs exclusive access per
/// call: an outer lock, or the [`TtlActor`](crate::domains::ttl_actors::TtlActor).
#[derive(Debug)]
pub struct TtlHeap<K, V, C = SystemClock> {
    heap: IndexedHeap<K, V>,
    index: HashMap<K, usize>,
    clock: C,
}

impl<K: Eq + Hash + Clone, V> TtlHeap<K, V, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            heap: IndexedHeap::with_capacity(cap),
            index: HashMap::with_capacity(cap),
            clock: SystemClock,
        }
    }
}

impl<K: Eq + Hash + Clone, V> Default for TtlHeap<K, V, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, V, C: TClock> TtlHeap<K, V, C> {
    pub fn with_clock(clock: C) -> Self {
        Self { heap: IndexedHeap::with_capacity(0), index: HashMap::new(), clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Inserts `value` under `key`, expiring `ttl` from now. A zero `ttl` makes the entry
    /// immediately sweepable.
    ///
    /// An existing entry for the same key is replaced rather than shadowed: the old item leaves
    /// the heap and its value is returned.
    pub fn add(&mut self, key: K, value: V, ttl: Duration) -> Option<V> {
        let previous = self.delete(&key);
        let expiration = expires_at(self.clock.now(), ttl);
        let id = self.heap.push(TtlItem { expiration, slot: 0, key: key.clone(), value });
        self.index.insert(key, id);
        trace!(%expiration, len = self.len(), "item added");
        previous
    }

    /// Returns the value for `key` and pushes its expiration to `ttl` from now.
    ///
    /// This is a write: the item is re-prioritized before the value is handed back, so calling
    /// it changes when (and in which order) entries are swept.
    pub fn get_and_refresh(&mut self, key: &K, ttl: Duration) -> Option<&V> {
        let id = *self.index.get(key)?;
        let expiration = expires_at(self.clock.now(), ttl);
        let item = self.heap.item_mut(id)?;
        item.expiration = expiration;
        let slot = item.slot;
        self.heap.fix(slot);
        self.heap.item(id).map(|item| &item.value)
    }

    /// Reads without touching the expiration.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.heap.item(*self.index.get(key)?).map(|item| &item.value)
    }

    pub fn expiration_of(&self, key: &K) -> Option<DateTime<Utc>> {
        self.heap.item(*self.index.get(key)?).map(|item| item.expiration)
    }

    /// Expiration of the entry that will be swept first.
    pub fn next_expiration(&self) -> Option<DateTime<Utc>> {
        self.heap.peek().map(|item| item.expiration)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key` if present. Absent keys are a no-op.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let slot = self.heap.item(id)?.slot;
        self.heap.remove_at(slot).map(|item| item.value)
    }

    /// Removes every entry whose expiration is not after `as_of` and returns how many went.
    ///
    /// Stops at the first unexpired root; heap order guarantees nothing behind it is expired.
    #[instrument(level = "debug", skip_all, fields(as_of = %as_of))]
    pub fn delete_expired(&mut self, as_of: DateTime<Utc>) -> usize {
        let mut count = 0;
        while let Some(rank) = self.heap.rank(0) {
            if matches!(rank, Rank::Expires(expiration) if expiration > as_of) {
                break;
            }
            if let Some(item) = self.heap.pop() {
                self.index.remove(&item.key);
                count += 1;
            }
        }
        if count > 0 {
            debug!(count, remaining = self.len(), "expired items removed");
        }
        count
    }

    /// [`delete_expired`](Self::delete_expired) as of the heap's own clock.
    pub fn delete_expired_now(&mut self) -> usize {
        let now = self.clock.now();
        self.delete_expired(now)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::clock::ManualClock;
    use chrono::TimeDelta;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn heap_at_epoch() -> (TtlHeap<String, u32, ManualClock>, ManualClock) {
        let clock = ManualClock::at(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        (TtlHeap::with_clock(clock.clone()), clock)
    }

    fn assert_consistent<V>(q: &TtlHeap<String, V, ManualClock>) {
        q.heap.assert_invariants();
        let heap_keys: HashSet<_> =
            q.heap.ids().map(|id| q.heap.item(id).unwrap().key.clone()).collect();
        let index_keys: HashSet<_> = q.index.keys().cloned().collect();
        assert_eq!(heap_keys.len(), q.heap.len(), "duplicate key inside heap");
        assert_eq!(heap_keys, index_keys);
        for (key, id) in &q.index {
            assert_eq!(&q.heap.item(*id).unwrap().key, key);
        }
    }

    #[test]
    fn test_add_registers_item_in_heap_and_index() {
        // GIVEN
        let (mut q, _) = heap_at_epoch();

        // WHEN
        q.add("key".into(), 7, Duration::from_secs(30));

        // THEN
        assert_eq!(q.len(), 1);
        assert_eq!(q.index.len(), 1);
        assert_eq!(q.heap.peek().unwrap().slot, 0);
        assert_eq!(q.peek(&"key".into()), Some(&7));
        assert_consistent(&q);
    }

    #[test]
    fn test_add_with_duplicate_key_replaces_entry() {
        // GIVEN
        let (mut q, clock) = heap_at_epoch();
        q.add("key".into(), 1, Duration::from_secs(10));

        // WHEN
        let previous = q.add("key".into(), 2, Duration::from_secs(60));

        // THEN
        assert_eq!(previous, Some(1));
        assert_eq!(q.len(), 1);
        assert_eq!(q.expiration_of(&"key".into()), Some(clock.now() + TimeDelta::seconds(60)));
        assert_consistent(&q);

        // nothing left behind at the old expiration
        clock.advance(Duration::from_secs(11));
        assert_eq!(q.delete_expired_now(), 0);
        assert_eq!(q.peek(&"key".into()), Some(&2));
    }

    #[test]
    fn test_get_and_refresh_reorders_item() {
        // GIVEN
        let (mut q, clock) = heap_at_epoch();
        q.add("short".into(), 1, Duration::from_secs(10));
        q.add("long".into(), 2, Duration::from_secs(50));

        // WHEN
        let value = q.get_and_refresh(&"short".into(), Duration::from_secs(100)).copied();

        // THEN
        assert_eq!(value, Some(1));
        assert_eq!(q.next_expiration(), Some(clock.now() + TimeDelta::seconds(50)));
        clock.advance(Duration::from_secs(60));
        assert_eq!(q.delete_expired_now(), 1);
        assert!(q.contains_key(&"short".into()));
        assert_consistent(&q);
    }

    #[test]
    fn test_get_and_refresh_can_move_item_toward_root() {
        // GIVEN
        let (mut q, clock) = heap_at_epoch();
        for (i, key) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
            q.add(key.into(), i as u32, Duration::from_secs(10 * (i as u64 + 1)));
        }

        // WHEN
        q.get_and_refresh(&"e".into(), Duration::from_secs(1));

        // THEN
        assert_eq!(q.next_expiration(), Some(clock.now() + TimeDelta::seconds(1)));
        assert_eq!(q.heap.peek().unwrap().key, "e");
        assert_consistent(&q);
    }

    #[test]
    fn test_get_absent_key_leaves_heap_untouched() {
        let (mut q, _) = heap_at_epoch();
        q.add("a".into(), 1, Duration::from_secs(1));
        assert_eq!(q.get_and_refresh(&"missing".into(), Duration::from_secs(1)), None);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_delete_absent_key_is_noop() {
        let (mut q, _) = heap_at_epoch();
        q.add("a".into(), 1, Duration::from_secs(1));
        assert_eq!(q.delete(&"missing".into()), None);
        assert_eq!(q.len(), 1);
        assert_consistent(&q);
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let (mut q, clock) = heap_at_epoch();
        q.add("now".into(), 1, Duration::ZERO);
        q.add("later".into(), 2, Duration::from_millis(1));
        assert_eq!(q.delete_expired(clock.now()), 1);
        assert!(q.contains_key(&"later".into()));
    }

    #[test]
    fn test_delete_expired_treats_exact_expiration_as_expired() {
        let (mut q, clock) = heap_at_epoch();
        q.add("a".into(), 1, Duration::from_secs(5));
        let at = clock.now() + TimeDelta::seconds(5);
        assert_eq!(q.delete_expired(at - TimeDelta::nanoseconds(1)), 0);
        assert_eq!(q.delete_expired(at), 1);
        assert!(q.is_empty());
        assert!(q.index.is_empty());
    }

    #[test]
    fn test_clear() {
        let (mut q, _) = heap_at_epoch();
        q.add("a".into(), 1, Duration::from_secs(5));
        q.add("b".into(), 2, Duration::from_secs(5));
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.next_expiration(), None);
        q.add("a".into(), 3, Duration::from_secs(5));
        assert_consistent(&q);
    }

    #[test]
    fn test_random_operations_preserve_invariants() {
        // GIVEN
        let (mut q, clock) = heap_at_epoch();
        let mut rng = StdRng::seed_from_u64(0x5eed);

        // WHEN
        for round in 0..2_000 {
            let key = format!("k{}", rng.random_range(0..64));
            let ttl = Duration::from_millis(rng.random_range(0..5_000));
            match rng.random_range(0..10) {
                0..=3 => {
                    q.add(key, round, ttl);
                },
                4..=5 => {
                    q.get_and_refresh(&key, ttl);
                },
                6..=7 => {
                    q.delete(&key);
                },
                _ => {
                    clock.advance(Duration::from_millis(rng.random_range(0..1_000)));
                    let before = q.len();
                    let removed = q.delete_expired_now();
                    assert_eq!(q.len(), before - removed);
                    if let Some(next) = q.next_expiration() {
                        assert!(next > clock.now());
                    }
                },
            }

            // THEN
            assert_consistent(&q);
        }
    }
}
