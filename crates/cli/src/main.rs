use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use runscope_lib::consts::APP_NAME;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;
mod worker;

use cmd::{RunOptions, cmd_demo, cmd_info, cmd_run};

/// runscope - process, runspace and thread scoped state for Lua scripts
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Print machine readable JSON
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show version, store defaults and effective configuration
  Info,

  /// Walk through how each store is scoped across runspaces and threads
  Demo,

  /// Evaluate a Lua script in every runspace on every worker thread
  Run {
    /// Path to the Lua script
    file: Option<PathBuf>,

    /// Evaluate this Lua source instead of a file
    #[arg(short = 'e', long = "eval", conflicts_with = "file")]
    code: Option<String>,

    /// Number of runspaces to open
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    runspaces: u16,

    /// Number of worker threads to run the script on
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    threads: u16,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // RUST_LOG takes precedence over --verbose
  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Info => cmd_info(cli.json),
    Commands::Demo => cmd_demo(cli.json),
    Commands::Run {
      file,
      code,
      runspaces,
      threads,
    } => cmd_run(
      RunOptions {
        file,
        code,
        runspaces: runspaces.into(),
        threads: threads.into(),
      },
      cli.json,
    ),
  }
}
