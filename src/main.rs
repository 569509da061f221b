//! Scalable Bloom - command line entrypoint.
//!
//! A thin front end over the library: loads configuration, initializes
//! logging, and runs one subcommand against a scalable Bloom filter.

use clap::{Parser, Subcommand};
use scalable_bloom_lib::config::{AppConfig, ConfigLoader, LogConfig, ENV_PREFIX};
use scalable_bloom_lib::data_structures::ScalableBloomFilter;
use scalable_bloom_lib::error::{AppError, AppResult};
use scalable_bloom_lib::logging::init_logging;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(name = "scalable_bloom", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print each input line the first time it is seen
    Dedup {
        /// Read lines from this file instead of stdin
        #[clap(short, long, value_parser)]
        input: Option<PathBuf>,
    },

    /// Insert synthetic items and print the resulting generations
    Inspect {
        /// Number of items to insert
        #[clap(short = 'n', long, default_value_t = 100_000)]
        items: usize,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    let config = match ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet, fall back to defaults to report
            let _ = init_logging(&LogConfig::default());
            tracing::error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e}");
        process::exit(1);
    }

    if let Err(e) = run(args.command, &config) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(command: Command, config: &AppConfig) -> AppResult<()> {
    match command {
        Command::Dedup { input } => match input {
            Some(path) => dedup(BufReader::new(File::open(path)?), config),
            None => dedup(io::stdin().lock(), config),
        },
        Command::Inspect { items } => inspect(items, config),
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => gen_config(&output),
    }
}

/// Stream `reader` line by line, writing unseen lines to stdout.
fn dedup<R: BufRead>(reader: R, config: &AppConfig) -> AppResult<()> {
    let mut filter = config.filter.to_filter_config().build()?;
    let mut out = BufWriter::new(io::stdout().lock());
    let (mut read, mut written) = (0usize, 0usize);

    for line in reader.lines() {
        let line = line?;
        read += 1;
        if !filter.test_and_add(&line) {
            writeln!(out, "{line}")?;
            written += 1;
        }
    }
    out.flush()?;

    info!(
        lines_read = read,
        lines_written = written,
        generations = filter.generation_count(),
        capacity = filter.capacity(),
        fill_ratio = filter.fill_ratio(),
        "Deduplication finished"
    );
    Ok(())
}

/// Fill a filter with `items` synthetic keys and print a per-generation table.
fn inspect(items: usize, config: &AppConfig) -> AppResult<()> {
    let mut filter = config.filter.to_filter_config().build()?;
    for i in 0..items {
        filter.add(format!("item-{i}"));
    }

    let mut out = io::stdout().lock();
    print_generations(&mut out, &filter)?;
    writeln!(
        out,
        "total: generations={} capacity={} fill_ratio={:.4} items={}",
        filter.generation_count(),
        filter.capacity(),
        filter.fill_ratio(),
        filter.count()
    )?;
    Ok(())
}

fn print_generations<W: Write>(out: &mut W, filter: &ScalableBloomFilter) -> io::Result<()> {
    writeln!(out, "{:>5} {:>12} {:>5} {:>12} {:>10} {:>10}", "gen", "fp", "k", "m", "fill", "items")?;
    for (i, generation) in filter.generations().iter().enumerate() {
        writeln!(
            out,
            "{:>5} {:>12.3e} {:>5} {:>12} {:>10.4} {:>10}",
            i,
            generation.false_positive_rate(),
            generation.k(),
            generation.capacity(),
            generation.fill_ratio(),
            generation.count()
        )?;
    }
    Ok(())
}

fn gen_config(output: &Path) -> AppResult<()> {
    info!("Generating default configuration");

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| AppError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}
