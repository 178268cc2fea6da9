//! WeightLab CLI — draw and shuffle commands over a weighted sampler.
//!
//! Commands:
//! - `draw` — sample with replacement and compare observed to expected shares
//! - `shuffle` — drain the sampler without replacement, printing the order
//!
//! Entries come from a TOML config file (`--config`) or repeated
//! `--entry NAME=WEIGHT` flags.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;
use weightlab_core::{EntryConfig, SamplerConfig, Tally};

#[derive(Parser)]
#[command(
    name = "weightlab",
    about = "WeightLab CLI — weighted random selection"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Path to a TOML sampler config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Inline entry as NAME=WEIGHT. Repeatable.
    #[arg(long = "entry", value_parser = parse_entry)]
    entries: Vec<EntryConfig>,

    /// Seed override. Defaults to the config's seed, or 0.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample with replacement and report observed vs. expected frequencies.
    Draw {
        #[command(flatten)]
        source: Source,

        /// Number of draws.
        #[arg(long, default_value_t = 10_000)]
        count: u64,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Draw every entry once, without replacement, in weighted-random order.
    Shuffle {
        #[command(flatten)]
        source: Source,

        /// Print the order as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Draw {
            source,
            count,
            json,
        } => run_draw(source, count, json),
        Commands::Shuffle { source, json } => run_shuffle(source, json),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn parse_entry(s: &str) -> Result<EntryConfig, String> {
    let (value, weight) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=WEIGHT, got '{s}'"))?;
    if value.is_empty() {
        return Err(format!("empty name in '{s}'"));
    }
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad weight in '{s}': {e}"))?;
    Ok(EntryConfig {
        value: value.to_string(),
        weight,
    })
}

fn load_config(source: Source) -> Result<SamplerConfig> {
    if source.config.is_some() && !source.entries.is_empty() {
        bail!("--config and --entry are mutually exclusive");
    }

    let mut config = match source.config {
        Some(path) => SamplerConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None if source.entries.is_empty() => {
            bail!("one of --config or --entry is required")
        }
        None => SamplerConfig {
            seed: 0,
            entries: source.entries,
        },
    };
    if let Some(seed) = source.seed {
        config.seed = seed;
    }
    info!(
        "sampler: {} entries, seed {}",
        config.entries.len(),
        config.seed
    );
    Ok(config)
}

fn run_draw(source: Source, count: u64, json: bool) -> Result<()> {
    let config = load_config(source)?;
    let mut sampler = config.build()?;

    let mut expected: BTreeMap<String, f64> = BTreeMap::new();
    let mut weights: BTreeMap<String, f64> = BTreeMap::new();
    for (value, p) in sampler.probabilities() {
        *expected.entry(value.clone()).or_insert(0.0) += p;
    }
    for (value, w) in sampler.iter() {
        *weights.entry(value.clone()).or_insert(0.0) += w;
    }

    let mut tally = Tally::new();
    for _ in 0..count {
        tally.record(sampler.sample()?.clone());
    }
    let deviation = tally.max_abs_deviation(&expected);

    if json {
        let report = draw_report(config.seed, &expected, &weights, &tally)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{:<20} {:>10} {:>10} {:>10} {:>10}",
        "value", "weight", "expected", "observed", "count"
    );
    for (value, p) in &expected {
        println!(
            "{:<20} {:>10.4} {:>10.4} {:>10.4} {:>10}",
            value,
            weights[value],
            p,
            tally.frequency(value),
            tally.count(value)
        );
    }
    println!();
    println!("Draws:              {}", tally.total());
    println!("Max |obs - exp|:    {deviation:.5}");
    Ok(())
}

/// JSON draw report: per-entry comparison rows plus the raw tally.
fn draw_report(
    seed: u64,
    expected: &BTreeMap<String, f64>,
    weights: &BTreeMap<String, f64>,
    tally: &Tally<String>,
) -> Result<serde_json::Value> {
    let rows: Vec<_> = expected
        .iter()
        .map(|(value, p)| {
            serde_json::json!({
                "value": value,
                "weight": weights.get(value).copied().unwrap_or(0.0),
                "expected": p,
                "observed": tally.frequency(value),
            })
        })
        .collect();
    Ok(serde_json::json!({
        "seed": seed,
        "max_abs_deviation": tally.max_abs_deviation(expected),
        "entries": rows,
        "tally": serde_json::to_value(tally)?,
    }))
}

fn run_shuffle(source: Source, json: bool) -> Result<()> {
    let config = load_config(source)?;
    let mut sampler = config.build()?;

    let order: Vec<String> = sampler.drain_weighted().collect();
    if !sampler.is_empty() {
        warn!(
            "{} zero-weight entries were never drawn",
            sampler.len()
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
    } else {
        for (i, value) in order.iter().enumerate() {
            println!("{:>4}  {value}", i + 1);
        }
    }
    Ok(())
}
