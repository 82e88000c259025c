use std::collections::BTreeMap;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::EnvFilter;

use natcat::catalog::generate_catalog;
use natcat::config::MonitorConfig;
use natcat::events::MagnitudeBand;

/// Write a synthetic earthquake catalog as NDJSON on stdout.
#[derive(Parser)]
struct Args {
    /// RNG seed (defaults to the canonical catalog seed).
    #[arg(long)]
    seed: Option<u64>,
    /// Days of history to generate.
    #[arg(long)]
    days: Option<u32>,
    /// End of the window, RFC 3339 (defaults to now).
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = MonitorConfig::canonical();
    let seed = args.seed.unwrap_or(config.catalog.seed);
    let days = args.days.unwrap_or(config.lookback_days);
    let as_of = args.as_of.unwrap_or_else(Utc::now);

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let events = generate_catalog(&config.catalog, as_of, days, &mut rng);

    for e in &events {
        println!("{}", serde_json::to_string(e).context("serialising event")?);
    }

    // Per-source and per-band summary to stderr.
    let mut by_source: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    let mut by_band: BTreeMap<MagnitudeBand, usize> = BTreeMap::new();
    for e in &events {
        let entry = by_source.entry(e.place.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 = entry.1.max(e.magnitude);
        if let Some(band) = e.band() {
            *by_band.entry(band).or_insert(0) += 1;
        }
    }

    let expected: f64 = config.catalog.sources.iter().map(|s| s.weekly_rate).sum::<f64>() * f64::from(days) / 7.0;
    eprintln!(
        "quake_catalog: seed={seed} days={days} events={} (expected ~{expected:.1})",
        events.len()
    );
    for band in MagnitudeBand::ALL {
        eprintln!("  band={:<5} events={:>4}", band.label(), by_band.get(&band).copied().unwrap_or(0));
    }
    for (source, (n, max_mag)) in by_source {
        eprintln!("  source={source:<28} events={n:>4} max_mag={max_mag:.1}");
    }

    Ok(())
}
