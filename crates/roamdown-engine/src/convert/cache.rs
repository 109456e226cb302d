//! Size-bounded memoization for the inline marker transform.
//!
//! The transform is pure, so a cached result can never go stale; the bound
//! exists only to cap memory. Eviction is least-recently-used. The map sits
//! behind a `Mutex` so a shared [`super::Converter`] can be used from
//! multiple threads.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::Direction;

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

type Key = (Direction, String);

#[derive(Debug, Default)]
struct Inner {
    map: HashMap<Key, String>,
    recency: VecDeque<Key>,
}

#[derive(Debug)]
pub struct EmphasisCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl EmphasisCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache lock poisoned").map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.map.clear();
        inner.recency.clear();
    }

    /// Returns the cached result for `(direction, text)`, computing and
    /// storing it on a miss. The least-recently-used entry is evicted once
    /// the bound is reached.
    pub fn get_or_insert_with<F>(&self, direction: Direction, text: &str, compute: F) -> String
    where
        F: FnOnce() -> String,
    {
        let key = (direction, text.to_string());
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        if let Some(hit) = inner.map.get(&key).cloned() {
            touch(&mut inner.recency, &key);
            return hit;
        }

        let value = compute();
        if inner.map.len() >= self.capacity
            && let Some(oldest) = inner.recency.pop_front()
        {
            inner.map.remove(&oldest);
        }
        inner.recency.push_back(key.clone());
        inner.map.insert(key, value.clone());
        value
    }
}

impl Default for EmphasisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

fn touch(recency: &mut VecDeque<Key>, key: &Key) {
    if let Some(position) = recency.iter().position(|k| k == key) {
        recency.remove(position);
        recency.push_back(key.clone());
    }
}
