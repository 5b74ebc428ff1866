//! natfib - Fibonacci prefixes
//!
//! Prints a prefix of 0, 1, 1, 2, 3, 5, ... space-separated on one line.
//! With `--set` the terms are collected into a `NatSet` and printed in its
//! canonical rendering instead.
//!
//! # Usage
//!
//! ```bash
//! # First 10 terms
//! natfib count
//!
//! # Every term up to 1000, as a set
//! natfib upto 1000 --set
//! ```

mod fib;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use natset::NatSet;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Largest term collected into a set; its storage is two MiB.
const LARGE_MEMBER: u128 = 1 << 24;

/// Fibonacci prefix printer
#[derive(Parser, Debug)]
#[command(name = "natfib")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Collect the terms into a NatSet and print its rendering
    #[arg(long, global = true)]
    set: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the first N terms
    Count {
        /// Number of terms
        #[arg(default_value_t = 10)]
        n: usize,
    },

    /// Print every term not above BOUND
    Upto {
        /// Largest term to print
        #[arg(default_value_t = 100)]
        bound: u128,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the sequence.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let terms = match cli.command {
        Commands::Count { n } => {
            tracing::debug!(n, "generating first terms");
            fib::first(n)?
        }
        Commands::Upto { bound } => {
            tracing::debug!(%bound, "generating terms up to bound");
            fib::up_to(bound)
        }
    };

    let line = if cli.set {
        render_set(&terms)?
    } else {
        render_terms(&terms)
    };
    println!("{line}");
    Ok(())
}

/// Space-separated terms.
fn render_terms(terms: &[u128]) -> String {
    terms
        .iter()
        .map(u128::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical rendering of the terms as a set of naturals.
fn render_set(terms: &[u128]) -> Result<String> {
    if let Some(&max) = terms.last() {
        if max > LARGE_MEMBER {
            bail!("term {max} is too large to collect into a set (limit {LARGE_MEMBER})");
        }
    }
    let set = NatSet::try_from_sequence(terms).context("terms do not fit in a set")?;
    tracing::debug!(members = set.cardinality(), "collected terms");
    Ok(set.to_string())
}
