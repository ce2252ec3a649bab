use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, trace};

use crate::bare::BareJid;
use crate::error::Result;
use crate::prep::JidPrep;

pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Memoizes strict [`BareJid::parse`] results by raw input.
///
/// Entries live in a sharded map, so a miss on one key never waits on an
/// unrelated key. Values are built before they are published and concurrent
/// inserts of the same key resolve to a single shared value. Failed parses are
/// not remembered. Once `capacity` entries exist, new results are still
/// returned but no longer stored. The capacity check reads an atomic counter
/// and takes no shard lock.
pub struct BareJidCache {
    prep: JidPrep,
    entries: DashMap<Box<str>, Arc<BareJid>>,
    stored: AtomicUsize,
    capacity: usize,
}

impl BareJidCache {
    pub fn new(prep: JidPrep, capacity: usize) -> Self {
        Self {
            prep,
            entries: DashMap::new(),
            stored: AtomicUsize::new(0),
            capacity,
        }
    }

    pub fn get_or_parse(&self, raw: &str) -> Result<Arc<BareJid>> {
        if let Some(hit) = self.entries.get(raw) {
            trace!(raw, "bare jid cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        let parsed = Arc::new(BareJid::parse(&self.prep, raw)?);
        if self.stored.load(Ordering::Relaxed) >= self.capacity {
            debug!(capacity = self.capacity, "bare jid cache full, not storing");
            return Ok(parsed);
        }

        trace!(raw, "bare jid cache miss");
        match self.entries.entry(Box::from(raw)) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                self.stored.fetch_add(1, Ordering::Relaxed);
                Ok(Arc::clone(entry.insert(parsed).value()))
            }
        }
    }

    pub fn prep(&self) -> &JidPrep {
        &self.prep
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.stored.store(0, Ordering::Relaxed);
    }
}

impl fmt::Debug for BareJidCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BareJidCache")
            .field("prep", &self.prep)
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::BareJidCache;
    use crate::bare::BareJid;
    use crate::error::{JidError, ParseError};
    use crate::prep::JidPrep;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn repeated_parse_shares_value() {
        let cache = BareJidCache::new(JidPrep::basic(), 16);
        let first = cache.get_or_parse("User@Example.com").unwrap();
        let second = cache.get_or_parse("User@Example.com").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cached_value_matches_direct_parse() {
        let prep = JidPrep::basic();
        let cache = BareJidCache::new(prep.clone(), 16);
        let cached = cache.get_or_parse("User@Example.com/res").unwrap();
        let direct = BareJid::parse(&prep, "User@Example.com/res").unwrap();
        assert_eq!(*cached, direct);
        assert_eq!(cached.as_str(), "user@example.com");
    }

    #[test]
    fn distinct_raw_keys_with_same_address_are_equal() {
        let cache = BareJidCache::new(JidPrep::basic(), 16);
        let lower = cache.get_or_parse("user@example.com").unwrap();
        let upper = cache.get_or_parse("USER@example.com").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = BareJidCache::new(JidPrep::basic(), 16);
        let err = cache.get_or_parse("user@").unwrap_err();
        assert_eq!(err, JidError::Parse(ParseError::MissingDomain));
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_still_parses() {
        let cache = BareJidCache::new(JidPrep::basic(), 1);
        cache.get_or_parse("a@example.com").unwrap();
        let b = cache.get_or_parse("b@example.com").unwrap();
        assert_eq!(b.as_str(), "b@example.com");
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        cache.get_or_parse("b@example.com").unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn racing_inserts_of_one_key_count_once() {
        let cache = Arc::new(BareJidCache::new(JidPrep::basic(), 2));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_parse("same@example.com").unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        cache.get_or_parse("other@example.com").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn concurrent_lookups_converge() {
        let cache = Arc::new(BareJidCache::new(JidPrep::basic(), 1024));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    (0..64)
                        .map(|i| cache.get_or_parse(&format!("user{}@example.com", i % 4)))
                        .collect::<Result<Vec<_>, _>>()
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            for jid in handle.join().unwrap() {
                let again = cache.get_or_parse(jid.as_str()).unwrap();
                assert!(Arc::ptr_eq(&jid, &again));
            }
        }
        assert_eq!(cache.len(), 4);
    }
}
