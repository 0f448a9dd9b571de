//! Core quote types
//!
//! Defines the `Quote` entity and its `QuoteSource` classification. Quotes
//! are immutable once created: the fetcher builds one, the cache persists
//! it, and nothing mutates it afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed fallback text used when every fetch path fails
pub const FALLBACK_CONTENT: &str =
    "The best time to plant a tree was 20 years ago. The second best time is now.";

/// Attribution of the fallback quote
pub const FALLBACK_AUTHOR: &str = "Chinese Proverb";

/// A single inspirational quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Unique identifier; generated locally for Bible and fallback quotes,
    /// supplied by the general-quote API when present
    pub id: String,
    /// The quote text
    pub content: String,
    /// Attribution: verse reference or person name
    pub author: String,
    /// Labels for filtering and display
    #[serde(default)]
    pub tags: Vec<String>,
    /// Which corpus produced this quote
    pub source: QuoteSource,
    /// Reflection text, present only for Bible quotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl Quote {
    /// The fixed fallback quote, with a fresh unique id
    pub fn fallback() -> Self {
        Self {
            id: format!("fallback-{}", Uuid::new_v4()),
            content: FALLBACK_CONTENT.to_string(),
            author: FALLBACK_AUTHOR.to_string(),
            tags: vec!["wisdom".to_string(), "motivation".to_string()],
            source: QuoteSource::Fallback,
            meaning: None,
        }
    }

    /// Shareable plain-text rendering: quoted content plus attribution.
    /// Clipboard or share-sheet delivery is the frontend's job.
    pub fn share_text(&self) -> String {
        format!("\"{}\"\n\n\u{2014} {}", self.content, self.author)
    }
}

/// Which corpus a quote came from, and the user's fetch preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    /// Random verse from the Bible text API
    #[default]
    Bible,
    /// Random quote from the general quotes API
    General,
    /// The fixed local fallback
    Fallback,
}

impl QuoteSource {
    /// Parse a user-supplied source name (CLI input)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bible" => Some(QuoteSource::Bible),
            "general" => Some(QuoteSource::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteSource::Bible => write!(f, "bible"),
            QuoteSource::General => write!(f, "general"),
            QuoteSource::Fallback => write!(f, "fallback"),
        }
    }
}
