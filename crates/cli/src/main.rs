use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tasklet_cli::commands::Command;
use tasklet_store::{DATA_DIR_ENV, FileStorage, StoreError, open_file_store};

/// Tasklet - a small task list manager
#[derive(Parser)]
#[command(name = "tl")]
#[command(version)]
#[command(about = "A small task list manager", long_about = None)]
struct Args {
    /// Directory holding saved tasks (can also be set via TASKLET_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Initialize logging from the RUST_LOG environment variable
///
/// Examples:
/// - `RUST_LOG=debug` - show debug and above
/// - `RUST_LOG=tasklet_store=trace` - trace the store only
///
/// Defaults to `warn`, so a corrupt save file is reported on stderr.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

fn main() {
    init_logging();

    if let Err(e) = run_app() {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
fn run_app() -> Result<(), StoreError> {
    let args = Args::parse();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with_args(&args, &mut |question| prompt_yes_no(question, &mut input))
}

/// Run the application with the given arguments
fn run_with_args(args: &Args, confirm: &mut dyn FnMut(&str) -> bool) -> Result<(), StoreError> {
    // Determine data directory using priority: CLI arg > env var > default
    let data_dir = FileStorage::resolve_path(args.data_dir.clone());
    debug!("Resolved data directory {}", data_dir.display());

    match &args.command {
        Some(cmd) => {
            let mut store = open_file_store(&data_dir)?;
            let result = cmd.execute(&mut store, confirm)?;
            println!("{}", result);
        }
        None => {
            println!("Welcome to Tasklet!");
            println!("Use 'tl --help' for usage information.");
            println!("Tasks are saved in {} (override with {}).", data_dir.display(), DATA_DIR_ENV);
        }
    }

    Ok(())
}

/// Ask a yes/no question on stdout and read the answer from `input`.
///
/// Only `y` or `yes` (any case) count as agreement.
fn prompt_yes_no(question: &str, input: &mut impl BufRead) -> bool {
    print!("{} [y/N] ", question);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
