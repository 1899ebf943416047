//! Morris counter ordering experiment.

mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};
use morris_rust::experiment::{self, ExperimentConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "morris-rust")]
#[command(version)]
#[command(about = "Measures how well Morris approximate counters preserve count ordering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the paired-counter ordering experiment
    Run {
        /// Number of paired counters in the population
        #[arg(long, default_value_t = 100_000)]
        total_counters: usize,

        /// Number of counted pair comparisons
        #[arg(long, default_value_t = 1_000_000)]
        trials: u64,

        /// Inclusive upper bound on each counter's true count
        #[arg(long, default_value_t = 512)]
        max_counter_value: u64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Plot mean Morris estimates against true counts
    Plot {
        /// Collect per-seed data sequentially instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    // Diagnostics go to stderr; stdout carries only the result line.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            total_counters,
            trials,
            max_counter_value,
            seed,
        } => {
            let config = ExperimentConfig {
                total_counters,
                trials,
                max_counter_value,
                seed,
            };
            info!(
                total_counters,
                trials, max_counter_value, "running ordering experiment"
            );
            let agreement = experiment::run(&config)?;
            println!("{agreement}%");
        }
        Commands::Plot { sequential } => {
            demo::synthetic::plot_convergence(!sequential)?;
        }
    }

    Ok(())
}
