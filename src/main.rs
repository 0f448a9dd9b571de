//! Quotidian CLI
//!
//! Command-line frontend for the quote engine:
//! - Show the daily quote
//! - Fetch random or tagged quotes
//! - Manage favorites, theme, source, and notification preferences

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quotidian::config::{generate_default_config, Config};
use quotidian::prefs::{Preferences, Theme};
use quotidian::quotes::{Quote, QuoteFetcher, QuoteSource};
use quotidian::store::Store;

#[derive(Parser)]
#[command(name = "quotidian")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Daily inspirational quotes from the Bible or the Quotable corpus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's quote (fetched once per day, then cached)
    Daily,

    /// Fetch a fresh quote, ignoring the daily cache
    Random,

    /// Fetch a random quote carrying the given tag
    Tag {
        /// Tag name, e.g. "wisdom"
        tag: String,
    },

    /// List recently fetched quotes, most recent first
    Recent,

    /// Show or change the quote source
    Source {
        /// New source: bible or general
        value: Option<String>,
    },

    /// List favorite quotes
    Favorites,

    /// Toggle a quote in or out of the favorites by id
    Favorite {
        /// Quote id (from `recent` or `favorites`)
        id: String,
    },

    /// Print a quote in shareable form
    Share {
        /// Quote id (from `recent` or `favorites`)
        id: String,
    },

    /// Show, set, or toggle the theme
    Theme {
        /// New theme: light or dark
        value: Option<String>,
        /// Flip between light and dark
        #[arg(short, long)]
        toggle: bool,
    },

    /// Set the daily notification time (stored only; scheduling is up to
    /// the mobile frontend)
    Notify {
        /// Hour of day (0-23)
        hour: u32,
        /// Minute (0-59)
        minute: u32,
    },

    /// Print a default configuration file
    Config,

    /// Clear all stored data: cached quotes, favorites, and preferences
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_default();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("quotidian={}", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = Arc::new(
        Store::open(config.storage.store_path()).context("Failed to open the local store")?,
    );
    let fetcher = QuoteFetcher::new(&config.api, store.clone());
    let prefs = Preferences::new(store);

    match cli.command {
        Commands::Daily => {
            let quote = fetcher.daily_quote().await;
            print_quote(&quote);
        }

        Commands::Random => {
            let quote = fetcher
                .random_quote()
                .await
                .context("Failed to fetch a quote")?;
            print_quote(&quote);
        }

        Commands::Tag { tag } => {
            let quote = fetcher
                .quote_by_tag(&tag)
                .await
                .with_context(|| format!("Failed to fetch a quote tagged '{tag}'"))?;
            print_quote(&quote);
        }

        Commands::Recent => {
            let recent = fetcher.cache().recent();
            if recent.is_empty() {
                println!("No quotes fetched yet.");
            }
            for quote in recent {
                println!("[{}] \"{}\" \u{2014} {}", quote.id, quote.content, quote.author);
            }
        }

        Commands::Source { value } => match value {
            None => println!("{}", fetcher.selector().get()),
            Some(raw) => {
                let Some(source) = QuoteSource::from_str(&raw) else {
                    bail!("Unknown source '{raw}' (expected: bible, general)");
                };
                fetcher.selector().set(source)?;
                println!("Quote source set to {source}. Today's quote will be refetched.");
            }
        },

        Commands::Favorites => {
            let favorites = prefs.favorites();
            if favorites.is_empty() {
                println!("No favorite quotes yet.");
            }
            for quote in favorites {
                println!("[{}] \"{}\" \u{2014} {}", quote.id, quote.content, quote.author);
            }
        }

        Commands::Favorite { id } => {
            let quote = find_quote(&fetcher, &prefs, &id)?;
            if prefs.toggle_favorite(&quote)? {
                println!("Added to favorites: {}", quote.author);
            } else {
                println!("Removed from favorites: {}", quote.author);
            }
        }

        Commands::Share { id } => {
            let quote = find_quote(&fetcher, &prefs, &id)?;
            println!("{}", quote.share_text());
        }

        Commands::Theme { value, toggle } => {
            let theme = match (value, toggle) {
                (Some(raw), _) => {
                    let Some(theme) = Theme::from_str(&raw) else {
                        bail!("Unknown theme '{raw}' (expected: light, dark)");
                    };
                    prefs.set_theme(theme)?;
                    theme
                }
                (None, true) => prefs.toggle_theme()?,
                (None, false) => prefs.theme(),
            };
            println!("{theme}");
        }

        Commands::Notify { hour, minute } => {
            prefs.set_notification_time(hour, minute)?;
            println!("Daily notification time set to {hour:02}:{minute:02}.");
        }

        Commands::Config => {
            print!("{}", generate_default_config());
        }

        Commands::Reset => {
            prefs.reset()?;
            println!("All stored data cleared.");
        }
    }

    Ok(())
}

fn find_quote(fetcher: &QuoteFetcher, prefs: &Preferences, id: &str) -> anyhow::Result<Quote> {
    fetcher
        .cache()
        .find_recent(id)
        .or_else(|| prefs.favorites().into_iter().find(|q| q.id == id))
        .with_context(|| format!("No quote with id '{id}' in recent history or favorites"))
}

fn print_quote(quote: &Quote) {
    println!("\"{}\"", quote.content);
    println!("  \u{2014} {}", quote.author);
    if !quote.tags.is_empty() {
        println!("  [{}]", quote.tags.join(", "));
    }
    if let Some(meaning) = &quote.meaning {
        println!();
        println!("{meaning}");
    }
}
