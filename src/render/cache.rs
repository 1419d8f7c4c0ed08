use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::foundation::value::Snapshot;
use crate::render::buffer::PixelBuffer;
use crate::render::fingerprint::{StateFingerprint, fingerprint_snapshot};

/// Default capacity for leaf nodes.
pub const LEAF_CACHE_CAPACITY: usize = 128;
/// Default capacity for composite nodes (scenes, layouts).
pub const COMPOSITE_CACHE_CAPACITY: usize = 32;

/// Hit/miss counters of one cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct CacheEntry {
    snapshot: Snapshot,
    buffer: Arc<PixelBuffer>,
}

/// Bounded snapshot-to-buffer cache owned by a single node instance.
///
/// Eviction is FIFO: when full, the oldest *inserted* entry is dropped regardless of how
/// recently it was read. Keys are 128-bit fingerprints of the snapshot; the stored snapshot is
/// compared on every hit so a fingerprint collision degrades into a miss.
///
/// Buffers are handed out as `Arc`s; callers that want to draw on one must copy it first.
pub struct RenderCache {
    capacity: usize,
    entries: HashMap<StateFingerprint, CacheEntry>,
    order: VecDeque<StateFingerprint>,
    stats: CacheStats,
}

impl RenderCache {
    /// Empty cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            stats: CacheStats::default(),
        }
    }

    /// Cache sized for leaf nodes.
    pub fn leaf() -> Self {
        Self::new(LEAF_CACHE_CAPACITY)
    }

    /// Cache sized for composite nodes.
    pub fn composite() -> Self {
        Self::new(COMPOSITE_CACHE_CAPACITY)
    }

    /// Return the buffer cached for `snapshot`, computing and inserting it on a miss.
    pub fn get_or_compute(
        &mut self,
        snapshot: &Snapshot,
        compute: impl FnOnce() -> PixelBuffer,
    ) -> Arc<PixelBuffer> {
        let key = fingerprint_snapshot(snapshot);
        if let Some(entry) = self.entries.get(&key) {
            if entry.snapshot == *snapshot {
                self.stats.hits += 1;
                return Arc::clone(&entry.buffer);
            }
        }

        self.stats.misses += 1;
        tracing::trace!(entries = self.entries.len(), "render cache miss");
        let buffer = Arc::new(compute());

        if let Some(entry) = self.entries.get_mut(&key) {
            // Fingerprint collision: replace in place, keep the slot's age.
            entry.snapshot = snapshot.clone();
            entry.buffer = Arc::clone(&buffer);
            return buffer;
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.entries.insert(
            key,
            CacheEntry {
                snapshot: snapshot.clone(),
                buffer: Arc::clone(&buffer),
            },
        );
        self.order.push_back(key);
        buffer
    }

    /// Peek without computing or touching hit counters.
    pub fn get(&self, snapshot: &Snapshot) -> Option<Arc<PixelBuffer>> {
        let entry = self.entries.get(&fingerprint_snapshot(snapshot))?;
        (entry.snapshot == *snapshot).then(|| Arc::clone(&entry.buffer))
    }

    /// Whether `snapshot` currently has an entry.
    pub fn contains(&self, snapshot: &Snapshot) -> bool {
        self.get(snapshot).is_some()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hit/miss counters since construction or the last [`RenderCache::clear`].
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every entry and reset counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats = CacheStats::default();
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::leaf()
    }
}

impl std::fmt::Debug for RenderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCache")
            .field("capacity", &self.capacity)
            .field("len", &self.entries.len())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
