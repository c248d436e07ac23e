//! Galaxy crucible CLI.
//!
//! Searches for the fairest galaxy layout and writes a JSON summary of the
//! best one found.
//!
//! Usage:
//!   galaxy-crucible [OPTIONS]
//!
//! Options:
//!   --config FILE   JSON configuration file (default: built-in defaults)
//!   --batch N       Galaxies generated per batch (default: 1000)
//!   --batches N     Number of batches (default: 1)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --threads N     Worker threads for parallel search (default: 4)
//!   --sequential    Score every galaxy on the main thread
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use galaxy_crucible::config::{load_config, CrucibleConfig};
use galaxy_crucible::protocol::GalaxySummary;
use galaxy_crucible::Crucible;

/// Command-line values that override the configuration file.
#[derive(Default)]
struct Overrides {
    config: Option<PathBuf>,
    batch: Option<usize>,
    batches: Option<usize>,
    seed: Option<u64>,
    threads: Option<usize>,
    sequential: bool,
    output: Option<PathBuf>,
    quiet: bool,
}

impl Overrides {
    fn apply(&self, config: &mut CrucibleConfig) {
        if let Some(n) = self.batch {
            config.batch_size = n;
        }
        if let Some(n) = self.batches {
            config.batches = n;
        }
        if let Some(n) = self.seed {
            config.seed = n;
        }
        if let Some(n) = self.threads {
            config.threads = n;
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut opts = Overrides::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                opts.config = Some(PathBuf::from(value(&args, i, "--config")));
            }
            "--batch" => {
                i += 1;
                opts.batch = Some(parse(&args, i, "--batch"));
            }
            "--batches" => {
                i += 1;
                opts.batches = Some(parse(&args, i, "--batches"));
            }
            "--seed" => {
                i += 1;
                opts.seed = Some(parse(&args, i, "--seed"));
            }
            "--threads" => {
                i += 1;
                opts.threads = Some(parse(&args, i, "--threads"));
            }
            "--sequential" => {
                opts.sequential = true;
            }
            "--output" => {
                i += 1;
                opts.output = Some(PathBuf::from(value(&args, i, "--output")));
            }
            "--quiet" => {
                opts.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(2);
            }
        }
        i += 1;
    }

    let default_level = if opts.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&opts) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(opts: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &opts.config {
        Some(path) => load_config(path)?,
        None => CrucibleConfig::default(),
    };
    opts.apply(&mut config);
    config.validate()?;

    if !opts.quiet {
        eprintln!(
            "Crucible: radius {}, {} players, {} x {} galaxies, {} threads{}",
            config.radius,
            config.players,
            config.batches,
            config.batch_size,
            config.threads,
            if config.parallel { "" } else { " (sequential)" }
        );
    }

    let crucible = Crucible::new(&config)?;
    let mut failures = 0;
    for n in 0..config.batches {
        let report = crucible.search(config.batch_size, config.parallel);
        failures += report.failures.len();
        if !opts.quiet {
            eprintln!(
                "Batch {}/{}: best {:.4}, {} evaluated, {} rejected, {} improvements ({:.1}s)",
                n + 1,
                config.batches,
                report.best_score,
                report.evaluated,
                report.rejected,
                report.improvements,
                report.elapsed.as_secs_f64()
            );
        }
    }
    if failures > 0 {
        eprintln!("{} iterations failed", failures);
    }

    let (best, _) = crucible.best();
    let summary = GalaxySummary::build(&best, crucible.score_config())?;

    match &opts.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            summary.write_json(&mut writer)?;
            if !opts.quiet {
                eprintln!("Wrote best galaxy to {}", path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            summary.write_json(&mut writer)?;
        }
    }
    Ok(())
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("missing value for {}", flag);
            process::exit(2);
        }
    }
}

fn parse<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value(args, i, flag);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {} value: {}", flag, raw);
            process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: galaxy-crucible [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    JSON configuration file");
    eprintln!("  --batch N        Galaxies generated per batch (default: 1000)");
    eprintln!("  --batches N      Number of batches (default: 1)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --threads N      Worker threads for parallel search (default: 4)");
    eprintln!("  --sequential     Score every galaxy on the main thread");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress output");
    eprintln!("  --help           Show this help");
}
