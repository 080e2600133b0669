//! Identity-keyed memo trie for compiled style contributions.
//!
//! Each [`CacheLevel`] maps a compiled descriptor to the work done for it
//! (its class-name chunk, the properties it claimed, and the debug string
//! accumulated so far) plus the level to consult for the descriptor processed
//! next. Because the resolver walks styles from last to first, a path through
//! the trie is a suffix of the call's style sequence: `[a, b, c]` and
//! `[x, b, c]` share the nodes for `c` then `b`.
//!
//! Entries hold a [`Weak`] reference to their descriptor. The weak reference
//! pins the descriptor's allocation, so its address (the key) cannot be reused
//! while the entry exists. Once every strong reference is dropped the entry is
//! dead: it is never returned again and is pruned, together with its subtree,
//! the next time its level is written or [`StyleCache::prune`] runs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use log::trace;
use once_cell::sync::Lazy;

use crate::style::{Descriptor, Style};

/// Levels smaller than this are swept for dead entries on every write.
/// Larger ones are swept each time they double.
const MIN_PRUNE_LEN: usize = 32;

static GLOBAL_CACHE: Lazy<StyleCache> = Lazy::new(StyleCache::new);

/// Handle to the root of a memo trie.
///
/// Clones share the same trie. [`StyleCache::global`] is the process-wide
/// instance used by resolvers that do not inject their own.
#[derive(Debug, Clone, Default)]
pub struct StyleCache {
    root: Arc<CacheLevel>,
}

impl StyleCache {
    /// Creates an empty, independent cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide cache.
    pub fn global() -> Self {
        GLOBAL_CACHE.clone()
    }

    /// Returns the root level of the trie.
    pub fn root(&self) -> Arc<CacheLevel> {
        Arc::clone(&self.root)
    }

    /// Drops every dead entry in the trie, including on levels that are no
    /// longer written to. Returns the number of entries removed.
    pub fn prune(&self) -> usize {
        self.root.prune()
    }

    /// Number of live entries at the root level.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both handles point at the same trie.
    pub fn ptr_eq(&self, other: &StyleCache) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

/// The memoized contribution of one compiled descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedChunk {
    /// Class names contributed by the descriptor, space separated.
    pub class_name: Arc<str>,
    /// Properties the descriptor claimed, after property expansion.
    pub properties: Arc<[String]>,
    /// The debug string as it stood after this descriptor.
    pub debug_string: Arc<str>,
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct CacheHit {
    pub chunk: CachedChunk,
    /// Level to consult for the next descriptor in the same sequence.
    pub next: Arc<CacheLevel>,
}

#[derive(Debug)]
struct CacheEntry {
    descriptor: Weak<Style>,
    chunk: CachedChunk,
    next: Arc<CacheLevel>,
}

impl CacheEntry {
    fn is_live(&self) -> bool {
        self.descriptor.strong_count() > 0
    }
}

#[derive(Debug, Default)]
struct LevelState {
    entries: HashMap<usize, CacheEntry>,
    prune_at: usize,
}

impl LevelState {
    fn sweep(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live());
        let removed = before - self.entries.len();
        if removed > 0 {
            trace!("pruned {} dead style cache entries", removed);
        }
        removed
    }
}

/// One node of the memo trie.
#[derive(Debug, Default)]
pub struct CacheLevel {
    state: RwLock<LevelState>,
}

impl CacheLevel {
    /// Looks up the entry for `descriptor` at this level.
    pub fn get(&self, descriptor: &Descriptor) -> Option<CacheHit> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let entry = state.entries.get(&identity(descriptor))?;
        if !entry.is_live() {
            return None;
        }
        Some(CacheHit {
            chunk: entry.chunk.clone(),
            next: Arc::clone(&entry.next),
        })
    }

    /// Records `chunk` for `descriptor` and returns the level for the next
    /// descriptor in the sequence.
    ///
    /// If a live entry already exists it is kept, and its next level is
    /// returned: both writers computed the same chunk for the same path.
    pub fn put(&self, descriptor: &Descriptor, chunk: CachedChunk) -> Arc<CacheLevel> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let len = state.entries.len();
        if len < MIN_PRUNE_LEN || len >= state.prune_at {
            state.sweep();
            state.prune_at = state.entries.len() * 2;
        }

        let key = identity(descriptor);
        if let Some(entry) = state.entries.get(&key) {
            if entry.is_live() {
                return Arc::clone(&entry.next);
            }
        }
        let next = Arc::new(CacheLevel::default());
        state.entries.insert(
            key,
            CacheEntry {
                descriptor: Arc::downgrade(descriptor),
                chunk,
                next: Arc::clone(&next),
            },
        );
        next
    }

    /// Drops dead entries at this level and below, returning how many were
    /// removed. Dropping an entry releases its whole subtree.
    pub fn prune(&self) -> usize {
        let (removed, children) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let removed = state.sweep();
            let children: Vec<Arc<CacheLevel>> =
                state.entries.values().map(|e| Arc::clone(&e.next)).collect();
            (removed, children)
        };
        removed + children.iter().map(|level| level.prune()).sum::<usize>()
    }

    /// Number of live entries at this level.
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.values().filter(|e| e.is_live()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn identity(descriptor: &Descriptor) -> usize {
    Arc::as_ptr(descriptor) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::CompiledStyle;

    fn chunk(class_name: &str, properties: &[&str]) -> CachedChunk {
        CachedChunk {
            class_name: Arc::from(class_name),
            properties: properties.iter().map(|p| p.to_string()).collect(),
            debug_string: Arc::from(""),
        }
    }

    #[test]
    fn test_put_then_get() {
        let cache = StyleCache::new();
        let a = CompiledStyle::new().class("a", "a1").into_descriptor();

        let next = cache.root().put(&a, chunk("a1", &["a"]));
        let hit = cache.root().get(&a).unwrap();

        assert_eq!(&*hit.chunk.class_name, "a1");
        assert_eq!(&*hit.chunk.properties, &["a".to_string()]);
        assert!(Arc::ptr_eq(&hit.next, &next));
    }

    #[test]
    fn test_identity_not_contents() {
        let cache = StyleCache::new();
        let a = CompiledStyle::new().class("a", "a1").into_descriptor();
        let clone = CompiledStyle::new().class("a", "a1").into_descriptor();

        cache.root().put(&a, chunk("a1", &["a"]));
        assert!(cache.root().get(&clone).is_none());
    }

    #[test]
    fn test_existing_entry_wins() {
        let cache = StyleCache::new();
        let a = CompiledStyle::new().class("a", "a1").into_descriptor();

        let first = cache.root().put(&a, chunk("a1", &["a"]));
        let second = cache.root().put(&a, chunk("other", &[]));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(&*cache.root().get(&a).unwrap().chunk.class_name, "a1");
    }

    #[test]
    fn test_dropped_descriptor_is_not_live() {
        let cache = StyleCache::new();
        let a = CompiledStyle::new().class("a", "a1").into_descriptor();
        cache.root().put(&a, chunk("a1", &["a"]));
        assert_eq!(cache.len(), 1);

        drop(a);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_dead_entries_are_pruned() {
        let cache = StyleCache::new();
        for i in 0..MIN_PRUNE_LEN {
            let d = CompiledStyle::new().class("a", format!("a{}", i)).into_descriptor();
            cache.root().put(&d, chunk("a", &["a"]));
        }
        let keep = CompiledStyle::new().class("b", "b1").into_descriptor();
        cache.root().put(&keep, chunk("b1", &["b"]));

        let state = cache.root.state.read().unwrap();
        assert_eq!(state.entries.len(), 1);
    }

    #[test]
    fn test_small_level_sweeps_on_write() {
        let cache = StyleCache::new();
        let dead = CompiledStyle::new().class("a", "a1").into_descriptor();
        let below = cache.root().put(&dead, chunk("a1", &["a"]));
        let subtree = Arc::downgrade(&below);
        drop(below);
        drop(dead);

        let live = CompiledStyle::new().class("b", "b1").into_descriptor();
        cache.root().put(&live, chunk("b1", &["b"]));

        assert_eq!(cache.root.state.read().unwrap().entries.len(), 1);
        assert!(subtree.upgrade().is_none());
    }

    #[test]
    fn test_prune_reaches_idle_levels() {
        let cache = StyleCache::new();
        let outer = CompiledStyle::new().class("a", "a1").into_descriptor();
        let inner = CompiledStyle::new().class("b", "b1").into_descriptor();
        let next = cache.root().put(&outer, chunk("a1", &["a"]));
        let deepest = Arc::downgrade(&next.put(&inner, chunk("b1", &["b"])));

        drop(inner);
        assert_eq!(cache.prune(), 1);
        assert!(next.state.read().unwrap().entries.is_empty());
        assert!(deepest.upgrade().is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.prune(), 0);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(StyleCache::global().ptr_eq(&StyleCache::global()));
        assert!(!StyleCache::new().ptr_eq(&StyleCache::global()));
    }
}
