//! prioseq: prioritized interval sequencing
//!
//! Usage: prioseq <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use prioseq::commands::{GenerateCommand, GenerateConfig, MergeCommand, VerifyCommand};
use prioseq::records::RecordError;
use prioseq::sweep::Strategy;

#[derive(Parser)]
#[command(name = "prioseq")]
#[command(version)]
#[command(about = "Merge overlapping prioritized intervals into a non-overlapping sequence", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    /// Sweep strategy: scan or incremental. Both produce identical output.
    #[arg(long, global = true)]
    strategy: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge prioritized intervals (track, start, end, priority)
    Merge {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print merge statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Check that a file is a well-formed merged sequence
    Verify {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Generate a synthetic dataset for benchmarking
    Generate {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of intervals
        #[arg(short = 'n', long, default_value = "10000")]
        count: u64,

        /// Number of tracks
        #[arg(long, default_value = "1")]
        tracks: u32,

        /// Coordinate span per track
        #[arg(long, default_value = "1000000")]
        span: i64,

        /// Minimum interval length
        #[arg(long, default_value = "50")]
        len_min: i64,

        /// Maximum interval length
        #[arg(long, default_value = "1000")]
        len_max: i64,

        /// Largest priority to assign
        #[arg(long, default_value = "7")]
        max_priority: u32,

        /// Fraction of intervals written inverted (start > end)
        #[arg(long, default_value = "0.0")]
        inverted: f64,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,

        /// Print generation statistics to stderr
        #[arg(long)]
        stats: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure the default strategy before any command is built
    if let Some(ref name) = cli.strategy {
        match Strategy::parse(name) {
            Some(strategy) => prioseq::config::set_default_strategy(strategy),
            None => {
                eprintln!(
                    "Error: Invalid strategy '{}'. Use: scan, incremental",
                    name
                );
                process::exit(1);
            }
        }
    }

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
        {
            eprintln!("Error: Failed to initialize thread pool: {}", e);
            process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Merge { input, stats } => run_merge(input, stats),
        Commands::Verify { input } => run_verify(input),
        Commands::Generate {
            output,
            count,
            tracks,
            span,
            len_min,
            len_max,
            max_priority,
            inverted,
            seed,
            force,
            stats,
        } => run_generate(
            output,
            GenerateConfig {
                count,
                tracks,
                span,
                len_min,
                len_max,
                max_priority,
                inverted_fraction: inverted,
                seed,
            },
            force,
            stats,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn run_merge(input: Option<PathBuf>, stats: bool) -> Result<(), RecordError> {
    let cmd = MergeCommand::new();
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let result = match input {
        Some(path) if !is_stdin(&path) => cmd.run(&path, &mut handle)?,
        _ => cmd.run_stdin(&mut handle)?,
    };

    if stats {
        eprintln!("Merge stats: {}", result);
    }

    Ok(())
}

fn run_verify(input: Option<PathBuf>) -> Result<(), RecordError> {
    let cmd = VerifyCommand::new();

    let report = match input {
        Some(path) if !is_stdin(&path) => cmd.run(&path)?,
        _ => {
            let stdin = io::stdin();
            cmd.run_reader(stdin.lock())?
        }
    };

    eprintln!("{}", report);
    Ok(())
}

fn run_generate(
    output: Option<PathBuf>,
    config: GenerateConfig,
    force: bool,
    stats: bool,
) -> Result<(), RecordError> {
    let cmd = GenerateCommand::new(config);

    let result = match output {
        Some(path) => {
            if path.exists() && !force {
                return Err(RecordError::InvalidFormat(format!(
                    "Output file '{}' already exists. Use --force to overwrite.",
                    path.display()
                )));
            }
            cmd.run(&path)?
        }
        None => {
            let stdout = io::stdout();
            cmd.run_writer(stdout.lock())?
        }
    };

    if stats {
        eprintln!("Generate stats: {}", result);
    }

    Ok(())
}
