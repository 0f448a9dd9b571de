//! Quote source selector
//!
//! The persisted `bible`-or-`general` preference. Changing it invalidates
//! today's cached quote so the switch takes effect on the next fetch rather
//! than after the calendar day rolls over.

use std::sync::Arc;

use super::cache::QuoteCache;
use super::types::QuoteSource;
use crate::store::{Store, StoreResult};

/// Store key for the source preference
const SOURCE_KEY: &str = "quote_source";

/// Handle to the persisted source preference
#[derive(Clone)]
pub struct SourceSelector {
    store: Arc<Store>,
    cache: QuoteCache,
}

impl SourceSelector {
    pub fn new(store: Arc<Store>, cache: QuoteCache) -> Self {
        Self { store, cache }
    }

    /// Current preference, defaulting to `bible` when unset
    pub fn get(&self) -> QuoteSource {
        self.store.get(SOURCE_KEY).unwrap_or_default()
    }

    /// Persist a new preference and drop today's cached quote
    pub fn set(&self, source: QuoteSource) -> StoreResult<()> {
        self.store.set(SOURCE_KEY, &source)?;
        self.cache.invalidate_today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::types::Quote;
    use crate::quotes::Clock;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn selector() -> (TempDir, SourceSelector, QuoteCache) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(Store::open(dir.path().join("store.json")).unwrap());
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()));
        let cache = QuoteCache::new(store.clone(), clock);
        let selector = SourceSelector::new(store, cache.clone());
        (dir, selector, cache)
    }

    #[test]
    fn test_defaults_to_bible() {
        let (_dir, selector, _cache) = selector();
        assert_eq!(selector.get(), QuoteSource::Bible);
    }

    #[test]
    fn test_set_persists() {
        let (_dir, selector, _cache) = selector();
        selector.set(QuoteSource::General).unwrap();
        assert_eq!(selector.get(), QuoteSource::General);
    }

    #[test]
    fn test_set_invalidates_daily_slot() {
        let (_dir, selector, cache) = selector();

        let mut quote = Quote::fallback();
        quote.id = "cached-daily".to_string();
        cache.store_daily(&quote).unwrap();
        assert!(cache.cached_daily().is_some());

        selector.set(QuoteSource::General).unwrap();
        assert!(cache.cached_daily().is_none());
    }
}
