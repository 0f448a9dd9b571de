//! Quote engine
//!
//! The core of quotidian: fetching one inspirational quote per calendar day
//! from two remote APIs, with fallback and local caching.
//!
//! - [`fetcher`]: daily/random quote retrieval with the Bible -> general ->
//!   fixed-fallback chain
//! - [`cache`]: the bounded recent-quotes list and the date-keyed daily slot
//! - [`selector`]: the persisted source preference (`bible` or `general`)
//! - [`bible`]: the fixed book tables and reflection-text lookup
//! - [`types`]: the `Quote` entity

pub mod bible;
pub mod cache;
pub mod fetcher;
pub mod selector;
pub mod types;

pub use bible::{meaning_for_verse, BibleReference};
pub use cache::{QuoteCache, RECENT_CAPACITY};
pub use fetcher::QuoteFetcher;
pub use selector::SourceSelector;
pub use types::{Quote, QuoteSource};

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

/// Source of the current calendar date.
///
/// The daily-quote key is derived from local wall-clock time; tests inject a
/// fixed date instead of relying on the system clock.
pub trait Clock: Send + Sync {
    /// Today's date in local time
    fn today(&self) -> NaiveDate;
}

/// System clock, local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Source of uniform random indices.
///
/// Book, chapter, and verse selection are pure functions of this provider,
/// so tests can script the exact reference that gets requested.
pub trait Randomness: Send + Sync {
    /// Uniform value in `[0, upper)`. `upper` is always at least 1.
    fn pick(&self, upper: usize) -> usize;
}

/// Thread-local RNG backed randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn pick(&self, upper: usize) -> usize {
        use rand::Rng;
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Errors that can occur while fetching quotes
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Quote API returned status {status}")]
    Api { status: u16 },

    /// Successful response missing the verse text
    #[error("Quote payload missing verse text")]
    EmptyPayload,

    /// Persisting the fetched quote failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;
