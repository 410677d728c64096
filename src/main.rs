//! Matchday - run football data queries through the fetch-through cache
//!
//! Operator tool: executes one query (optionally several times against the
//! same in-process cache) and prints the upstream JSON to stdout.

use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matchday::cache::keys::category_of;
use matchday::cache::{CacheStore, SweepConfig, SweepHandle, Tier};
use matchday::cli::{execute, Cli};
use matchday::football::FootballApi;
use matchday::upstream::UpstreamClient;

/// Sends log output to stderr so stdout stays pure JSON
fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Prints hit/miss statistics and every live key with its tier and remaining TTL
fn print_cache_report(cache: &CacheStore) -> Result<(), serde_json::Error> {
    let keys: Vec<_> = cache
        .list_keys()
        .into_iter()
        .map(|key| {
            let ttl = cache.remaining_ttl(&key);
            let tier = Tier::for_tag(category_of(&key));
            json!({ "key": key, "tier": format!("{tier:?}"), "ttl_secs": ttl })
        })
        .collect();
    let report = json!({ "stats": cache.detailed_stats(), "keys": keys });
    eprintln!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    cli.validate()?;

    let cache = Arc::new(CacheStore::new());
    let sweeper = SweepHandle::spawn(cache.clone(), SweepConfig::default());
    let client = UpstreamClient::new(cli.upstream_config())?;
    let api = FootballApi::new(client, cache.clone());
    let options = cli.fetch_options();

    info!(command = ?cli.command, repeat = cli.repeat, "running query");

    let mut output = serde_json::Value::Null;
    for _ in 0..cli.repeat {
        output = execute(&api, &cli.command, &options).await?;
    }
    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.stats {
        print_cache_report(&cache)?;
    }

    sweeper.shutdown().await;
    Ok(())
}
