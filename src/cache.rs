use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

/// Time source for expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock().unwrap_or_else(|e| e.into_inner());
        self.start + offset
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    stored_at: Instant,
}

/// A single cached value with a fixed time-to-live.
///
/// The lock is only held to copy the slot in or out, never across I/O.
pub struct TtlCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: RwLock<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Value if present and younger than the TTL.
    pub fn get(&self) -> Option<T> {
        let now = self.clock.now();
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Value regardless of age.
    pub fn get_stale(&self) -> Option<T> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|entry| entry.value.clone())
    }

    pub fn set(&self, value: T) {
        let entry = Entry {
            value,
            stored_at: self.clock.now(),
        };
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(entry);
    }

    /// Age of the stored value, if any.
    pub fn age(&self) -> Option<Duration> {
        let now = self.clock.now();
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .map(|entry| now.saturating_duration_since(entry.stored_at))
    }

    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(ttl_secs: u64) -> (TtlCache<u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(Duration::from_secs(ttl_secs), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_empty_cache() {
        let (cache, _) = cache(300);
        assert_eq!(cache.get(), None);
        assert_eq!(cache.get_stale(), None);
        assert_eq!(cache.age(), None);
    }

    #[test]
    fn test_value_expires_after_ttl() {
        let (cache, clock) = cache(300);
        cache.set(7);

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get(), Some(7));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get(), None);
        assert_eq!(cache.get_stale(), Some(7));
        assert_eq!(cache.age(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_set_refreshes_timestamp() {
        let (cache, clock) = cache(10);
        cache.set(1);
        clock.advance(Duration::from_secs(9));
        cache.set(2);
        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.get(), Some(2));
    }

    #[test]
    fn test_clear() {
        let (cache, _) = cache(10);
        cache.set(1);
        cache.clear();
        assert_eq!(cache.get_stale(), None);
    }
}
