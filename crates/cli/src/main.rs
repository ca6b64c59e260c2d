mod cmd;
mod output;
mod session;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{Operation, cmd_shell, run_once};
use crate::output::{OutputFormat, print_error_chain};
use crate::session::SessionOptions;

/// PySys - manage packages in the standard and opt-in OBN namespaces
#[derive(Parser)]
#[command(name = "pysys")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Packages root holding the standard/ and obn/ directories
  #[arg(long, global = true, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t)]
  output: OutputFormat,

  /// Stop install hooks running longer than this (e.g. "30s", "2m")
  #[arg(long, global = true, value_name = "DURATION", value_parser = humantime::parse_duration)]
  hook_timeout: Option<Duration>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  #[command(flatten)]
  Op(Operation),

  /// Read commands from stdin, one per line
  Shell,
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let options = SessionOptions {
    root: cli.root,
    hook_timeout: cli.hook_timeout,
  };

  let result = match cli.command {
    Commands::Op(op) => run_once(&options, op, cli.output),
    Commands::Shell => cmd_shell(&options, cli.output),
  };

  if let Err(e) = result {
    print_error_chain(&e, cli.verbose);
    std::process::exit(1);
  }
}
