use alloc::collections::VecDeque;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
type KeyMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
pub(crate) trait CacheKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> CacheKey for K {}

#[cfg(not(feature = "std"))]
pub(crate) trait CacheKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> CacheKey for K {}

/// Fixed-capacity memo with insertion-order eviction.
///
/// Entries are never refreshed on hit: the oldest insert is always the next to go.
#[derive(Clone, Debug)]
pub(crate) struct RangeCache<K, V> {
    entries: KeyMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K: CacheKey, V: Clone> RangeCache<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: KeyMap::new(),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    pub(crate) fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.contains_key(&key) {
            self.entries.insert(key, value);
            return;
        }
        while self.order.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Rounds a non-negative viewport parameter to a cache-key bucket.
pub(crate) fn quantize(value: f64, granularity: f64) -> i64 {
    let granularity = if granularity > 0.0 && granularity.is_finite() {
        granularity
    } else {
        1.0
    };
    // `as` saturates and maps NaN to 0; inputs are already clamped to >= 0.
    (value / granularity + 0.5) as i64
}
