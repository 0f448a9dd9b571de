//! # Quotidian
//!
//! Daily inspirational quote engine: one quote per calendar day, fetched
//! from a Bible text API or a general quotes API, cached in persistent
//! local key-value storage.
//!
//! ## Features
//!
//! - **Daily quote**: memoized per calendar day, never fails outward
//! - **Fallback chain**: Bible endpoint -> general endpoint -> fixed quote
//! - **Recent history**: bounded most-recent-first list (50 quotes)
//! - **Preferences**: quote source, favorites, theme, notification time
//!
//! ## Modules
//!
//! - [`quotes`]: the fetch/cache/fallback core
//! - [`store`]: persistent JSON key-value store
//! - [`prefs`]: user preferences
//! - [`config`]: TOML configuration with env overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quotidian::config::Config;
//! use quotidian::quotes::QuoteFetcher;
//! use quotidian::store::Store;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let store = Arc::new(Store::open(config.storage.store_path())?);
//!
//!     let fetcher = QuoteFetcher::new(&config.api, store);
//!     let quote = fetcher.daily_quote().await;
//!
//!     println!("{} \u{2014} {}", quote.content, quote.author);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod prefs;
pub mod quotes;
pub mod store;

// Re-export top-level types for convenience
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, StorageConfig};

pub use quotes::{
    meaning_for_verse, BibleReference, Clock, Quote, QuoteCache, QuoteError, QuoteFetcher,
    QuoteResult, QuoteSource, Randomness, SourceSelector, SystemClock, ThreadRandomness,
    RECENT_CAPACITY,
};

pub use prefs::{NotificationTime, Preferences, PrefsError, PrefsResult, Theme};

pub use store::{Store, StoreError, StoreResult};
