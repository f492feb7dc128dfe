//! Bounded memoization of relational maps.
//!
//! A [`GraphCache`] is an ordinary value: a scanner either owns one or is
//! handed a shared `Arc<GraphCache>`. There is no process-wide cache.
//!
//! Eviction is least-recently-used. Building a map under the lock is cheap
//! (at most `edge_cap` edges), so a miss computes while holding it and two
//! threads never build the same entry twice.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::graph::{GraphParams, RelationalMap};

/// Default capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Cache key: the seed plus every parameter that shapes the map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphKey {
    seed: String,
    td_max: usize,
    edge_cap: usize,
    weight_bits: u64,
}

impl GraphKey {
    pub fn new(seed: &str, params: GraphParams) -> Self {
        Self {
            seed: seed.to_string(),
            td_max: params.td_max,
            edge_cap: params.edge_cap,
            weight_bits: params.edge_weight.to_bits(),
        }
    }
}

/// Counters exposed for tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
    pub capacity: usize,
}

#[derive(Debug, Default)]
struct LruState {
    entries: HashMap<GraphKey, Arc<RelationalMap>>,
    /// Least recently used at the front.
    order: VecDeque<GraphKey>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl LruState {
    fn touch(&mut self, key: &GraphKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

/// Thread-safe LRU cache of relational maps.
#[derive(Debug)]
pub struct GraphCache {
    capacity: usize,
    state: Mutex<LruState>,
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl GraphCache {
    /// Create a cache holding at most `capacity` maps (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(LruState::default()),
        }
    }

    /// Create a cache ready to be shared between scanners.
    pub fn shared(capacity: usize) -> Arc<Self> {
        Arc::new(Self::new(capacity))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the cached map for `(seed, params)`, building it on a miss.
    pub fn get_or_build(&self, seed: &str, params: GraphParams) -> Arc<RelationalMap> {
        let key = GraphKey::new(seed, params);
        let mut state = self.state.lock();

        if let Some(map) = state.entries.get(&key).cloned() {
            state.hits += 1;
            state.touch(&key);
            tracing::debug!(td_max = params.td_max, "graph cache hit");
            return map;
        }

        state.misses += 1;
        let map = Arc::new(RelationalMap::build(seed, params));

        if state.entries.len() >= self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
                state.evictions += 1;
            }
        }
        state.entries.insert(key.clone(), Arc::clone(&map));
        state.order.push_back(key);

        tracing::debug!(
            td_max = params.td_max,
            cached = state.entries.len(),
            "graph cache miss"
        );
        map
    }

    /// Check for an entry without building or reordering.
    pub fn contains(&self, seed: &str, params: GraphParams) -> bool {
        self.state
            .lock()
            .entries
            .contains_key(&GraphKey::new(seed, params))
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            len: state.entries.len(),
            capacity: self.capacity,
        }
    }
}
