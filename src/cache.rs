//! Explicit staleness-window cache for the catalog lists fetched from the
//! remote API.

use std::future::Future;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Default staleness window applied to cached lists.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug)]
struct Entry<T> {
    data: Vec<T>,
    fetched_at: Instant,
}

/// Holds one list together with the instant it was fetched.
///
/// Reads within `ttl` of the last store are served from memory. Overlapping
/// fetches are not coordinated: whichever finishes last is what gets stored.
#[derive(Debug)]
pub struct ListCache<T> {
    ttl: Duration,
    entry: RwLock<Option<Entry<T>>>,
}

impl<T: Clone> Default for ListCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<T: Clone> ListCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached list if it is younger than the staleness window.
    pub fn get(&self) -> Option<Vec<T>> {
        self.get_at(Instant::now())
    }

    fn get_at(&self, now: Instant) -> Option<Vec<T>> {
        let guard = self.entry.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|entry| now.saturating_duration_since(entry.fetched_at) < self.ttl)
            .map(|entry| entry.data.clone())
    }

    /// Replaces the cached list.
    pub fn store(&self, data: Vec<T>) {
        self.store_at(data, Instant::now());
    }

    fn store_at(&self, data: Vec<T>, fetched_at: Instant) {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Entry { data, fetched_at });
    }

    /// Drops the cached list so the next read goes to the source.
    pub fn invalidate(&self) {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Serves a fresh cached list or runs `fetch` and stores its result.
    /// Errors are returned as-is and leave the cache untouched.
    pub async fn get_or_fetch<E, Fut>(&self, fetch: impl FnOnce() -> Fut) -> Result<Vec<T>, E>
    where
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if let Some(data) = self.get() {
            return Ok(data);
        }

        let data = fetch().await?;
        self.store(data.clone());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_expire_after_ttl() {
        let cache = ListCache::new(Duration::from_secs(5));
        let start = Instant::now();
        cache.store_at(vec![1, 2, 3], start);

        assert_eq!(cache.get_at(start + Duration::from_secs(4)), Some(vec![1, 2, 3]));
        assert_eq!(cache.get_at(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn invalidate_drops_entry() {
        let cache = ListCache::default();
        cache.store(vec!["a"]);
        assert!(cache.get().is_some());

        cache.invalidate();
        assert!(cache.get().is_none());
    }

    #[test]
    fn last_store_wins() {
        let cache = ListCache::default();
        cache.store(vec![1]);
        cache.store(vec![2]);
        assert_eq!(cache.get(), Some(vec![2]));
    }

    #[test]
    fn zero_ttl_never_serves() {
        let cache = ListCache::new(Duration::ZERO);
        cache.store(vec![1]);
        assert_eq!(cache.get(), None);
    }
}
