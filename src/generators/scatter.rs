use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::math::Fnv1a64;
use crate::registry::PresetId;

/// Number of independent unit samples carried per scattered element.
pub const SCATTER_DIMS: usize = 6;

/// Random unit samples for one scattered element (position, size, phase...).
///
/// Generators map these onto their own ranges, so a layout survives speed changes and only
/// population changes select a different layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scatter {
    pub u: [f64; SCATTER_DIMS],
}

impl Scatter {
    /// Sample `i` mapped onto `[lo, hi)`.
    pub fn range(&self, i: usize, lo: f64, hi: f64) -> f64 {
        lo + self.u[i % SCATTER_DIMS] * (hi - lo)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    preset: PresetId,
    count: usize,
}

/// Hit/miss counters for a [`LayoutCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

/// Memoized random layouts keyed by `(preset, population)`.
///
/// Seeds derive from the key, so an evicted layout is recomputed bit-identically.
#[derive(Debug)]
pub struct LayoutCache {
    entries: HashMap<LayoutKey, Arc<[Scatter]>>,
    lru: VecDeque<LayoutKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Layout for `count` elements of `preset`.
    pub fn scatter(&mut self, preset: PresetId, count: usize) -> Arc<[Scatter]> {
        let key = LayoutKey { preset, count };
        if let Some(layout) = self.entries.get(&key).cloned() {
            self.hits += 1;
            self.touch(key);
            tracing::trace!(preset = preset.as_str(), count, "layout cache hit");
            return layout;
        }

        self.misses += 1;
        tracing::trace!(preset = preset.as_str(), count, "layout cache miss");
        let layout: Arc<[Scatter]> = generate(seed_for(preset, count), count).into();
        self.insert(key, layout.clone());
        layout
    }

    pub fn stats(&self) -> LayoutCacheStats {
        LayoutCacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.entries.len(),
        }
    }

    fn insert(&mut self, key: LayoutKey, layout: Arc<[Scatter]>) {
        self.entries.insert(key, layout);
        self.touch(key);
        while self.lru.len() > self.capacity {
            if let Some(old) = self.lru.pop_front() {
                self.entries.remove(&old);
            }
        }
    }

    fn touch(&mut self, key: LayoutKey) {
        if let Some(pos) = self.lru.iter().position(|k| *k == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key);
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic seed for a layout key.
pub fn seed_for(preset: PresetId, count: usize) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_str(preset.as_str());
    h.write_u64(count as u64);
    h.finish()
}

fn generate(seed: u64, count: usize) -> Vec<Scatter> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Scatter {
            u: std::array::from_fn(|_| rng.gen_range(0.0..1.0)),
        })
        .collect()
}
