//! CLI administration tool for geocode-proxy.
//!
//! Inspects and purges cached search results directly in Redis, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the cache key a query maps to
//! cargo run --bin admin -- key "new york"
//!
//! # Show what is cached for a query and how long it lives
//! cargo run --bin admin -- show "new york"
//!
//! # Drop a cached entry so the next request refetches it
//! cargo run --bin admin -- purge "new york"
//!
//! # Check Redis connectivity
//! cargo run --bin admin -- ping
//! ```
//!
//! # Environment Variables
//!
//! Same Redis settings as the server (`REDIS_URL` or `REDIS_HOST` and friends,
//! `CACHE_KEY_PREFIX`). The in-process cache lives inside the server and cannot
//! be reached from here.

use geocode_proxy::config::{self, mask_connection_string};
use geocode_proxy::domain::cache_key::CacheKey;
use geocode_proxy::domain::entities::LocationRecord;
use geocode_proxy::domain::repositories::CacheStore;
use geocode_proxy::infrastructure::cache::RedisCache;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing the geocode-proxy cache.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the cache key derived from a search query
    Key {
        /// Raw search query
        query: String,
    },

    /// Show the cached result for a search query
    Show {
        /// Raw search query
        query: String,
    },

    /// Remove the cached result for a search query
    Purge {
        /// Raw search query
        query: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Check Redis connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Key derivation needs no backend
    if let Commands::Key { query } = &cli.command {
        print_key(query);
        return Ok(());
    }

    let config = config::load_from_env()?;
    let redis_url = config
        .redis_url
        .as_deref()
        .context("Redis is not configured; set REDIS_URL or REDIS_HOST")?;

    let cache = RedisCache::connect(redis_url, &config.cache_key_prefix)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(redis_url)))?;

    match cli.command {
        Commands::Key { .. } => {}
        Commands::Show { query } => show_entry(&cache, &query).await?,
        Commands::Purge { query, yes } => purge_entry(&cache, &query, yes).await?,
        Commands::Ping => ping(&cache, redis_url).await?,
    }

    Ok(())
}

/// Prints the escaped key for a query.
fn print_key(query: &str) {
    let key = CacheKey::normalize(query);
    println!("{}", "Cache key".bright_white().bold());
    println!("  Query: {}", query.cyan());
    println!("  Key:   {}", key.as_str().bright_yellow());
}

/// Displays the cached entry for a query with its remaining lifetime.
async fn show_entry(cache: &RedisCache, query: &str) -> Result<()> {
    let key = CacheKey::normalize(query);

    let Some(bytes) = cache
        .get(key.as_str())
        .await
        .context("Failed to read cache entry")?
    else {
        println!("{} {}", "Not cached:".yellow(), key.as_str().cyan());
        return Ok(());
    };

    let ttl = cache
        .ttl(key.as_str())
        .await
        .context("Failed to read entry TTL")?;

    println!("{}", "Cached entry".bright_white().bold());
    println!("  Key:  {}", key.as_str().cyan());
    println!("  Size: {} bytes", bytes.len());
    match ttl {
        Some(ttl) => println!("  TTL:  {:.1}s", ttl.as_secs_f64()),
        None => println!("  TTL:  {}", "no expiry".yellow()),
    }
    println!();

    match serde_json::from_slice::<Vec<LocationRecord>>(&bytes) {
        Ok(locations) if locations.is_empty() => {
            println!("{}", "No locations (empty result is cached)".yellow());
        }
        Ok(locations) => {
            println!(
                "{}",
                format!("{:<12} {:<12} {:<12} {}", "PLACE ID", "LAT", "LON", "NAME")
                    .bright_white()
                    .bold()
            );
            for location in locations {
                println!(
                    "{:<12} {:<12} {:<12} {}",
                    location.place_id, location.lat, location.lon, location.display_name
                );
            }
        }
        Err(e) => {
            println!("{} {}", "Entry is corrupt:".red().bold(), e);
        }
    }

    Ok(())
}

/// Deletes the cached entry for a query after confirmation.
async fn purge_entry(cache: &RedisCache, query: &str, skip_confirm: bool) -> Result<()> {
    let key = CacheKey::normalize(query);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Purge cached entry '{}'?", key.as_str()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = cache
        .invalidate(key.as_str())
        .await
        .context("Failed to purge cache entry")?;

    if deleted {
        println!("{} {}", "Purged".green().bold(), key.as_str().cyan());
    } else {
        println!("{} {}", "Nothing cached for".yellow(), key.as_str().cyan());
    }

    Ok(())
}

/// Checks that Redis answers PING.
async fn ping(cache: &RedisCache, redis_url: &str) -> Result<()> {
    if cache.health_check().await {
        println!(
            "{} {}",
            "Redis OK".green().bold(),
            mask_connection_string(redis_url)
        );
        Ok(())
    } else {
        anyhow::bail!(
            "Redis at {} did not answer PING",
            mask_connection_string(redis_url)
        )
    }
}
