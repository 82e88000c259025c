use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use natcat::config::{MonitorConfig, load_treaties};
use natcat::events::MagnitudeBand;
use natcat::exposure::{ExposureRecord, match_exposures, nearest_first, rank_alerts};
use natcat::feed::{FeedFilter, FeedFormat, load_events};
use natcat::summary::{SummaryStatistics, summarize};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Geojson,
    Ndjson,
}

impl From<Format> for FeedFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Geojson => FeedFormat::GeoJson,
            Format::Ndjson => FeedFormat::Ndjson,
        }
    }
}

/// Match an earthquake snapshot against the treaty book and report exposure.
#[derive(Parser)]
struct Args {
    /// Event snapshot: a USGS GeoJSON feed or an NDJSON catalog.
    #[arg(long)]
    events: PathBuf,
    #[arg(long, value_enum, default_value = "geojson")]
    format: Format,
    /// Treaty book as a JSON array (defaults to the built-in book).
    #[arg(long)]
    treaties: Option<PathBuf>,
    #[arg(long)]
    min_magnitude: Option<f64>,
    /// Lookback window in days.
    #[arg(long)]
    days: Option<u32>,
    /// Reference time for the lookback window, RFC 3339 (defaults to now).
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,
    /// Ranked exposure records, one JSON object per line.
    #[arg(long, default_value = "alerts.ndjson")]
    output: PathBuf,
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = MonitorConfig::canonical();

    let treaties = match &args.treaties {
        Some(path) => load_treaties(path).with_context(|| format!("loading treaties from {}", path.display()))?,
        None => config.treaties,
    };

    let filter = FeedFilter {
        min_magnitude: args.min_magnitude.unwrap_or(config.min_magnitude),
        lookback_days: args.days.unwrap_or(config.lookback_days),
        as_of: args.as_of.unwrap_or_else(Utc::now),
    };
    let events = load_events(&args.events, args.format.into())
        .with_context(|| format!("loading events from {}", args.events.display()))?;
    let events = filter.apply(events);

    let records = match_exposures(&events, &treaties);
    let stats = summarize(&events, &records);
    let ranked = rank_alerts(&records);

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    for r in &ranked {
        serde_json::to_writer(&mut writer, r).context("serialising exposure record")?;
        writeln!(writer)?;
    }
    writer.flush()?;
    info!(path = %args.output.display(), records = ranked.len(), "wrote alerts");

    if !args.quiet {
        print_summary(&stats);
        print_alerts(&ranked);
        print_event_exposures(&records);
    }

    Ok(())
}

fn usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${out}")
}

fn print_summary(stats: &SummaryStatistics) {
    println!("=== Summary ===");
    println!("  Total events:      {}", stats.total_events);
    for band in MagnitudeBand::ALL {
        println!("  {:<18} {}", format!("{}:", band.label()), stats.bands.get(band));
    }
    if stats.below_band > 0 {
        println!("  Below M4:          {}", stats.below_band);
    }
    println!("  Treaties at risk:  {}", stats.treaties_at_risk);
    if !stats.affected_treaty_names.is_empty() {
        println!("    {}", stats.affected_treaty_names.join(", "));
    }
    println!("  Total exposure:    {}", usd(stats.total_exposed_limit));
    for (region, limit) in &stats.exposure_by_region {
        println!("    {region:<8} {:>16}", usd(*limit));
    }
}

fn print_alerts(ranked: &[ExposureRecord<'_>]) {
    println!("\n=== Exposure alerts ===");
    if ranked.is_empty() {
        println!("  No exposure alerts at this time.");
        return;
    }
    println!(
        "{:>5} | {:<36} | {:<22} | {:>14} | {:>10}",
        "Mag", "Place", "Treaty", "Exposure", "Dist(km)"
    );
    println!("{}", "-".repeat(5 + 3 + 36 + 3 + 22 + 3 + 14 + 3 + 10));
    for r in ranked {
        let tier = r.severity().map(MagnitudeBand::label).unwrap_or("-");
        println!(
            "{:>5.1} | {:<36.36} | {:<22.22} | {:>14} | {:>10.1}  {tier}",
            r.event.magnitude,
            r.event.place,
            r.treaty.name,
            usd(r.exposure_usd()),
            r.distance_km,
        );
    }
}

/// Treaties hit by each triggering event, closest zone first.
fn print_event_exposures(records: &[ExposureRecord<'_>]) {
    let mut start = 0;
    while start < records.len() {
        let event = records[start].event;
        let end = start + records[start..].iter().take_while(|r| r.event.id == event.id).count();
        if start == 0 {
            println!("\n=== Affected treaties by event ===");
        }
        println!("  M{:.1} {} ({})", event.magnitude, event.place, event.time.format("%Y-%m-%d %H:%M UTC"));
        for r in nearest_first(&records[start..end]) {
            println!("    - {} ({:.1} km)", r.treaty.name, r.distance_km);
        }
        start = end;
    }
}
