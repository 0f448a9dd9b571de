//! Quote cache
//!
//! Two pieces of persisted cache state: the bounded recent-quotes list and
//! the "today's quote" slot keyed by calendar date. Both live in the
//! key-value [`Store`]; this type is a cheap handle that can be cloned into
//! whatever needs cache access.

use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use super::types::Quote;
use super::Clock;
use crate::store::{Store, StoreResult};

/// Store key for the recent-quotes list
const RECENT_KEY: &str = "cached_quotes";

/// Maximum number of quotes kept in the recent list
pub const RECENT_CAPACITY: usize = 50;

/// Handle to the persisted quote cache
#[derive(Clone)]
pub struct QuoteCache {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl QuoteCache {
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Daily-slot key for the current local date.
    ///
    /// Plain `quote_{year}_{month}_{day}` text with a zero-based month,
    /// kept readable for external inspection of the store document.
    pub fn today_key(&self) -> String {
        Self::key_for(self.clock.today())
    }

    /// Daily-slot key for an arbitrary date
    pub fn key_for(date: NaiveDate) -> String {
        format!("quote_{}_{}_{}", date.year(), date.month0(), date.day())
    }

    /// Today's cached quote, if one was already fetched
    pub fn cached_daily(&self) -> Option<Quote> {
        self.store.get(&self.today_key())
    }

    /// Persist today's quote. The slot is only ever written on a cache miss,
    /// so the value is immutable for the rest of the calendar day.
    pub fn store_daily(&self, quote: &Quote) -> StoreResult<()> {
        self.store.set(&self.today_key(), quote)
    }

    /// Drop today's slot so the next daily fetch goes to the network
    pub fn invalidate_today(&self) -> StoreResult<()> {
        self.store.remove(&self.today_key())
    }

    /// Recent quotes, most-recent-first, at most [`RECENT_CAPACITY`]
    pub fn recent(&self) -> Vec<Quote> {
        self.store.get(RECENT_KEY).unwrap_or_default()
    }

    /// Insert a quote at the head of the recent list.
    ///
    /// Idempotent per id: a quote already in the list leaves it untouched.
    /// Overflow truncates from the tail. A store failure is logged and
    /// swallowed - losing a cache append never fails a fetch.
    pub fn remember(&self, quote: &Quote) {
        let mut list = self.recent();

        if list.iter().any(|q| q.id == quote.id) {
            return;
        }

        list.insert(0, quote.clone());
        list.truncate(RECENT_CAPACITY);

        if let Err(e) = self.store.set(RECENT_KEY, &list) {
            tracing::warn!("Failed to persist recent quotes: {}", e);
        }
    }

    /// Look a quote up by id in the recent list
    pub fn find_recent(&self, id: &str) -> Option<Quote> {
        self.recent().into_iter().find(|q| q.id == id)
    }
}
