//! Cache hierarchy simulator CLI.
//!
//! This binary drives the simulation engine from the command line. It performs:
//! 1. **Run:** Generate a workload, simulate it under one replacement policy, and print statistics.
//! 2. **Compare:** Replay one workload under all eight policies and rank them by hit rate.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use memsim_core::common::{ConfigError, SimError};
use memsim_core::config::{AccessPattern, Config, ReplacementPolicy};
use memsim_core::sim::{PolicyComparison, compare_policies};
use memsim_core::{Simulator, WorkloadGenerator};

#[derive(Parser, Debug)]
#[command(
    name = "memsim",
    author,
    version,
    about = "Multi-level cache hierarchy simulator",
    long_about = "Simulate a synthetic memory workload through an N-level set-associative cache hierarchy.\n\nExamples:\n  memsim run --policy lru --pattern locality --count 20000 --seed 42\n  memsim run --config hierarchy.json --json\n  memsim compare --pattern loop --seed 7"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate one workload under one replacement policy.
    Run {
        #[command(flatten)]
        workload: WorkloadArgs,

        /// Replacement policy (overrides the config file).
        #[arg(short, long)]
        policy: Option<ReplacementPolicy>,

        /// Print statistics as JSON instead of the text summary.
        #[arg(long)]
        json: bool,

        /// Print the last N access results.
        #[arg(long, default_value_t = 0)]
        show: usize,
    },

    /// Replay one workload under every replacement policy and rank them.
    Compare {
        #[command(flatten)]
        workload: WorkloadArgs,

        /// Print the comparison as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
struct WorkloadArgs {
    /// JSON hierarchy configuration; built-in defaults otherwise.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Access pattern.
    #[arg(long)]
    pattern: Option<AccessPattern>,

    /// Number of accesses to generate.
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Probability that an access is a write.
    #[arg(short, long)]
    write_ratio: Option<f64>,

    /// Seed for the workload and the simulator.
    #[arg(short, long)]
    seed: Option<u64>,
}

impl WorkloadArgs {
    /// Loads the base config and applies command-line overrides.
    fn load(&self) -> Result<Config, SimError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(pattern) = self.pattern {
            config.workload.pattern = pattern;
        }
        if let Some(count) = self.count {
            config.workload.count = count;
        }
        if let Some(ratio) = self.write_ratio {
            config.workload.write_ratio = ratio;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Run {
            workload,
            policy,
            json,
            show,
        } => cmd_run(&workload, policy, json, show),
        Commands::Compare { workload, json } => cmd_compare(&workload, json),
    };

    if let Err(e) = outcome {
        error!("{e}");
        process::exit(1);
    }
}

/// Generates the workload, runs it on a worker thread, and prints the statistics.
fn cmd_run(
    args: &WorkloadArgs,
    policy: Option<ReplacementPolicy>,
    json: bool,
    show: usize,
) -> Result<(), SimError> {
    let mut config = args.load()?;
    if let Some(policy) = policy {
        config.policy = policy;
    }
    let seed = config.seed_or_random();
    info!(
        policy = %config.policy,
        pattern = %config.workload.pattern,
        count = config.workload.count,
        seed,
        "configuration loaded"
    );
    info!("{}", config.policy.description());

    let accesses = WorkloadGenerator::with_seed(seed).generate_from(&config.workload);
    let mut sim = Simulator::new(&config.levels, config.policy, &config.memory, seed)?;

    let mut last = 0;
    let results = sim.run_bulk_on_worker(&accesses, move |pct| {
        if pct >= last + 10 || pct == 100 {
            info!(progress = pct, "simulating");
            last = pct;
        }
    })?;

    if json {
        println!("{}", to_json(&sim.statistics())?);
    } else {
        println!("{}", sim.summary_text());
    }

    if show > 0 {
        println!();
        println!(
            "{:<12} {:<2} {:<5} {:<6} {:>8}  path",
            "address", "op", "hit", "level", "cycles"
        );
        for r in results.iter().skip(results.len().saturating_sub(show)) {
            let level = r.hit_level.map_or_else(|| "-".to_string(), |l| l.to_string());
            println!(
                "{:#010x}   {:<2} {:<5} {:<6} {:>8}  {}",
                r.address, r.kind, r.hit, level, r.latency, r.details
            );
        }
    }
    Ok(())
}

/// Replays one workload under every policy and prints a ranked table.
fn cmd_compare(args: &WorkloadArgs, json: bool) -> Result<(), SimError> {
    let config = args.load()?;
    let seed = config.seed_or_random();
    info!(
        pattern = %config.workload.pattern,
        count = config.workload.count,
        seed,
        "comparing policies"
    );

    let accesses = WorkloadGenerator::with_seed(seed).generate_from(&config.workload);
    let results = compare_policies(&config.levels, &config.memory, seed, &accesses)?;

    if json {
        println!("{}", to_json(&results)?);
        return Ok(());
    }

    let mut ranked = results.clone();
    ranked.sort_by(|a, b| b.hit_rate.total_cmp(&a.hit_rate));
    println!("{:<14} {:>10} {:>14}", "policy", "hit rate", "avg latency");
    for r in &ranked {
        println!(
            "{:<14} {:>9.2}% {:>14.1}",
            r.policy.name(),
            r.hit_rate,
            r.average_latency
        );
    }
    if let Some(best) = PolicyComparison::best(&results) {
        println!();
        println!("best: {} ({:.2}%)", best.policy, best.hit_rate);
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, SimError> {
    serde_json::to_string_pretty(value).map_err(|e| ConfigError::Json(e).into())
}
