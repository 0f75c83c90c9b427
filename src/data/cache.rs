//! Year-keyed holiday cache with a fixed time-to-live.

use crate::data::fetcher::{FetchOutcome, HolidayFetcher, HolidayTransport};
use crate::data::holiday::HolidayMap;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub holidays: HolidayMap,
    pub fetched_at: Instant,
}

impl CacheEntry {
    pub fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) >= ttl
    }
}

#[derive(Debug)]
pub struct HolidayCache {
    ttl: Duration,
    entries: HashMap<i32, CacheEntry>,
}

impl Default for HolidayCache {
    fn default() -> Self {
        HolidayCache::new(DEFAULT_TTL)
    }
}

impl HolidayCache {
    pub fn new(ttl: Duration) -> Self {
        HolidayCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached holidays for `year` while fresh, otherwise fetches.
    /// Only successful fetches are stored; a failure is retried on the next call.
    pub fn get_or_fetch<T: HolidayTransport>(
        &mut self,
        year: i32,
        now: Instant,
        fetcher: &HolidayFetcher<T>,
    ) -> FetchOutcome {
        if let Some(entry) = self.entries.get(&year) {
            if !entry.is_stale(now, self.ttl) {
                log::debug!("holiday cache hit for {year}");
                return FetchOutcome::ok(entry.holidays.clone());
            }
            log::debug!("holiday cache entry for {year} expired");
        }

        let outcome = fetcher.fetch(year);
        if outcome.is_ok() {
            self.entries.insert(
                year,
                CacheEntry {
                    holidays: outcome.holidays.clone(),
                    fetched_at: now,
                },
            );
        } else {
            self.entries.remove(&year);
        }
        outcome
    }

    pub fn invalidate(&mut self, year: i32) {
        self.entries.remove(&year);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fetcher::tests::{StubTransport, AUGUST_2025};
    use crate::data::fetcher::FetchError;

    #[test]
    fn test_second_call_within_ttl_hits_cache() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let fetcher = HolidayFetcher::new("https://example.test/api", &transport);
        let mut cache = HolidayCache::default();
        let t0 = Instant::now();

        let first = cache.get_or_fetch(2025, t0, &fetcher);
        let second = cache.get_or_fetch(2025, t0 + Duration::from_secs(59 * 60), &fetcher);

        assert_eq!(transport.calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_refetched() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let fetcher = HolidayFetcher::new("https://example.test/api", &transport);
        let mut cache = HolidayCache::default();
        let t0 = Instant::now();

        cache.get_or_fetch(2025, t0, &fetcher);
        cache.get_or_fetch(2025, t0 + DEFAULT_TTL, &fetcher);

        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_years_are_cached_separately() {
        let transport = StubTransport::status(200, "[]");
        let fetcher = HolidayFetcher::new("https://example.test/api", &transport);
        let mut cache = HolidayCache::default();
        let t0 = Instant::now();

        cache.get_or_fetch(2025, t0, &fetcher);
        cache.get_or_fetch(2026, t0, &fetcher);
        cache.get_or_fetch(2025, t0, &fetcher);

        assert_eq!(transport.calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let transport = StubTransport::error(FetchError::Network("down".into()));
        let fetcher = HolidayFetcher::new("https://example.test/api", &transport);
        let mut cache = HolidayCache::default();
        let t0 = Instant::now();

        let outcome = cache.get_or_fetch(2025, t0, &fetcher);
        assert!(!outcome.is_ok());
        cache.get_or_fetch(2025, t0, &fetcher);

        assert_eq!(transport.calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let fetcher = HolidayFetcher::new("https://example.test/api", &transport);
        let mut cache = HolidayCache::default();
        let t0 = Instant::now();

        cache.get_or_fetch(2025, t0, &fetcher);
        cache.invalidate(2025);
        cache.get_or_fetch(2025, t0, &fetcher);

        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_is_stale_boundary() {
        let t0 = Instant::now();
        let entry = CacheEntry {
            holidays: HolidayMap::new(),
            fetched_at: t0,
        };
        let ttl = Duration::from_secs(10);
        assert!(!entry.is_stale(t0 + Duration::from_secs(9), ttl));
        assert!(entry.is_stale(t0 + Duration::from_secs(10), ttl));
    }
}
