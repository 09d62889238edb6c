//! Generic in-memory TTL cache.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use ephemera_core::error::Result;
use ephemera_core::types::{CacheConfig, CacheStats};

use crate::sweeper::Sweeper;

/// Cache entry with its insertion time.
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }

    fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    /// Unreadable from `inserted_at + ttl` onwards.
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) >= ttl
    }

    /// Sweepable only once `inserted_at + ttl` is strictly in the past.
    fn is_sweepable(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) > ttl
    }
}

/// State shared between the cache handle and its sweeper thread.
struct Store<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
    sweeps: AtomicU64,
    evicted: AtomicU64,
}

impl<K: Eq + Hash, V> Store<K, V> {
    fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            sweeps: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
        }
    }

    /// Removes every entry that was already stale at `now`.
    fn evict(&self, now: Instant) -> usize {
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_sweepable(self.ttl, now));
            before - entries.len()
        };

        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.evicted.fetch_add(removed as u64, Ordering::Relaxed);

        if removed > 0 {
            debug!(removed, "evicted expired entries");
        } else {
            trace!("sweep found nothing to evict");
        }
        removed
    }
}

/// Thread-safe cache whose entries expire a fixed duration after insertion.
///
/// Reads filter out expired entries; a background sweeper removes them from
/// memory once per sweep interval (the TTL unless configured otherwise).
///
/// # Thread Safety
///
/// A single reader-writer lock guards the map. [`get`](Self::get),
/// [`len`](Self::len) and the other read accessors share it; writes and
/// sweeps take it exclusively. Wrap the cache in an `Arc` to share it.
///
/// # Shutdown
///
/// The sweeper runs until [`close`](Self::close) is called or the cache is
/// dropped, whichever comes first.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ephemera_cache::TtlCache;
///
/// let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60)).unwrap();
/// cache.add("answer".to_string(), 42);
/// assert_eq!(cache.get("answer"), Some(42));
/// ```
pub struct TtlCache<K, V> {
    store: Arc<Store<K, V>>,
    sweep_interval: Duration,
    sweeper: Mutex<Option<Sweeper>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Creates an empty cache that sweeps once per `ttl`.
    pub fn new(ttl: Duration) -> Result<Self> {
        Self::with_config(CacheConfig::new(ttl))
    }

    /// Creates an empty cache from a full configuration.
    ///
    /// Keys and values must be `Send + Sync + 'static` even when
    /// `background_sweep` is off, since the same constructor may hand the
    /// map to the sweeper thread.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(Store::new(config.ttl));
        let sweep_interval = config.effective_sweep_interval();

        let sweeper = if config.background_sweep {
            let sweep_store = Arc::clone(&store);
            Some(Sweeper::spawn(sweep_interval, move |now| {
                sweep_store.evict(now);
            })?)
        } else {
            None
        };

        debug!(ttl = ?config.ttl, ?sweep_interval, background = config.background_sweep, "cache created");

        Ok(Self {
            store,
            sweep_interval,
            sweeper: Mutex::new(sweeper),
        })
    }
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    /// Inserts or overwrites `key`, restarting its TTL.
    pub fn add(&self, key: K, value: V) {
        self.store.entries.write().insert(key, CacheEntry::new(value));
    }

    /// Gets a copy of the value for `key`.
    ///
    /// Returns `None` if the key was never added, was removed, or has expired.
    /// Expired entries are left in place for the sweeper.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let now = Instant::now();
        let entries = self.store.entries.read();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.store.ttl, now))
            .map(|entry| entry.value.clone())
    }

    /// Returns true if `key` holds a value that has not expired.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.store
            .entries
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired(self.store.ttl, now))
    }

    /// Removes `key`, returning its value if it had not expired yet.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.store
            .entries
            .write()
            .remove(key)
            .filter(|entry| !entry.is_expired(self.store.ttl, now))
            .map(|entry| entry.value)
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.store.entries.write().clear();
    }

    /// Runs one sweep immediately. Returns the number of entries removed.
    pub fn evict_expired(&self) -> usize {
        self.store.evict(Instant::now())
    }

    /// Returns the number of entries in memory, expired or not.
    pub fn len(&self) -> usize {
        self.store.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.store.entries.read();
        let expired = entries
            .values()
            .filter(|entry| entry.is_expired(self.store.ttl, now))
            .count();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len() - expired,
            sweeps: self.store.sweeps.load(Ordering::Relaxed),
            evicted: self.store.evicted.load(Ordering::Relaxed),
        }
    }

    /// How long entries stay readable.
    pub fn ttl(&self) -> Duration {
        self.store.ttl
    }

    /// Period of the background sweep.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Returns true while the background sweeper is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.lock().as_ref().is_some_and(Sweeper::is_running)
    }

    /// Stops the background sweeper and waits for it to exit.
    ///
    /// The cache remains usable and reads still hide expired entries, but
    /// nothing reclaims them unless [`evict_expired`](Self::evict_expired) is
    /// called. Calling this more than once is a no-op.
    pub fn close(&self) {
        let sweeper = self.sweeper.lock().take();
        if let Some(mut sweeper) = sweeper {
            sweeper.stop();
        }
    }
}

impl<K, V> fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.store.ttl)
            .field("sweep_interval", &self.sweep_interval)
            .field("len", &self.store.entries.read().len())
            .finish_non_exhaustive()
    }
}
