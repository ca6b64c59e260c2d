//! Interactive session reading one command per line from stdin.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use pysys_lib::state_lock::LockMode;

use super::{Operation, dispatch};
use crate::output::{OutputFormat, print_error, print_info};
use crate::session::{Session, SessionOptions};

const PROMPT: &str = "pysys> ";

#[derive(Parser)]
#[command(name = "pysys", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
  #[command(subcommand)]
  command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
  #[command(flatten)]
  Op(Operation),

  /// Leave the shell
  #[command(alias = "quit")]
  Exit,
}

/// Run the shell until `exit` or end of input.
///
/// The state file stays exclusively locked for the whole session and is
/// saved after every successful mutating command.
pub fn cmd_shell(options: &SessionOptions, output: OutputFormat) -> Result<()> {
  let mut session = Session::open(options, LockMode::Exclusive, "shell")?;

  let stdin = io::stdin();
  let interactive = stdin.is_terminal();
  if interactive {
    print_info("PySys shell. Type 'help' for commands, 'exit' to leave.");
  }

  let mut lines = stdin.lock().lines();
  loop {
    if interactive {
      print!("{}", PROMPT);
      io::stdout().flush()?;
    }

    let Some(line) = lines.next() else { break };
    let line = line.context("Failed to read from stdin")?;

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.first().is_none_or(|t| t.starts_with('#')) {
      continue;
    }

    let parsed = match ShellLine::try_parse_from(tokens) {
      Ok(parsed) => parsed,
      Err(e) => {
        // Help output and usage errors alike; the session goes on.
        let _ = e.print();
        continue;
      }
    };

    match parsed.command {
      ShellCommand::Exit => break,
      ShellCommand::Op(op) => {
        debug!(command = %line.trim(), "shell command");
        let mutating = op.is_mutating();
        match dispatch(&mut session, op, output) {
          Ok(()) if mutating => session.save()?,
          Ok(()) => {}
          Err(e) => print_error(&e.to_string()),
        }
      }
    }
  }

  Ok(())
}
