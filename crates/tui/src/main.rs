//! Entry point for the Tasklet TUI application.

use std::path::PathBuf;

use clap::Parser;
use tasklet_tui::{App, TuiResult};

/// Tasklet terminal UI
#[derive(Parser)]
#[command(name = "tl-tui")]
#[command(version)]
#[command(about = "Interactive terminal UI for Tasklet", long_about = None)]
struct Args {
    /// Directory holding saved tasks (can also be set via TASKLET_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> TuiResult<()> {
    let args = Args::parse();
    let mut app = App::open(args.data_dir)?;
    app.run()
}
