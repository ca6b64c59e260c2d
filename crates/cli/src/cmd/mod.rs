//! Command dispatch.
//!
//! Commands are parsed into an [`Operation`] before they reach the manager,
//! both from argv and from shell lines.

mod gate;
mod install;
mod list;
mod remove;
mod shell;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use pysys_lib::Namespace;
use pysys_lib::state_lock::LockMode;

use crate::output::OutputFormat;
use crate::session::{Session, SessionOptions};

pub use gate::cmd_gate;
pub use install::cmd_install;
pub use list::cmd_list;
pub use remove::cmd_remove;
pub use shell::cmd_shell;
pub use update::cmd_update;

/// Namespace selection shared by every package command.
#[derive(Debug, Clone, Default, Args)]
pub struct NamespaceArgs {
  /// Namespace to operate on: standard (alias std) or obn
  #[arg(long, value_name = "NAMESPACE", conflicts_with = "obn")]
  pub namespace: Option<Namespace>,

  /// Shorthand for --namespace obn
  #[arg(long)]
  pub obn: bool,
}

impl NamespaceArgs {
  pub fn resolve(&self) -> Namespace {
    match self.namespace {
      Some(namespace) => namespace,
      None if self.obn => Namespace::Obn,
      None => Namespace::Standard,
    }
  }
}

#[derive(Debug, Clone, Args)]
pub struct PackageArgs {
  /// Package name (the directory name under the namespace root)
  pub name: String,

  #[command(flatten)]
  pub ns: NamespaceArgs,
}

impl PackageArgs {
  pub fn namespace(&self) -> Namespace {
    self.ns.resolve()
  }
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
  #[command(flatten)]
  pub ns: NamespaceArgs,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum GateAction {
  /// Allow operations on the OBN namespace
  Enable,
  /// Refuse operations on the OBN namespace
  Disable,
  /// Show whether the OBN namespace is enabled
  Status,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Operation {
  /// Install a package from its namespace directory
  Install(PackageArgs),

  /// Remove an installed package
  #[command(alias = "uninstall")]
  Remove(PackageArgs),

  /// Re-read an installed package's metadata and record its new version
  Update(PackageArgs),

  /// List installed packages in install order
  List(ListArgs),

  /// Enable, disable or query the OBN namespace gate
  Gate {
    #[command(subcommand)]
    action: GateAction,
  },
}

impl Operation {
  /// Whether the operation may change the persisted state.
  pub fn is_mutating(&self) -> bool {
    !matches!(
      self,
      Operation::List(_)
        | Operation::Gate {
          action: GateAction::Status
        }
    )
  }

  /// Short description recorded in the lock file.
  pub fn label(&self) -> String {
    match self {
      Operation::Install(args) => format!("install {}", args.name),
      Operation::Remove(args) => format!("remove {}", args.name),
      Operation::Update(args) => format!("update {}", args.name),
      Operation::List(_) => "list".to_string(),
      Operation::Gate { .. } => "gate".to_string(),
    }
  }
}

/// Route one operation to its command implementation.
pub fn dispatch(session: &mut Session, op: Operation, output: OutputFormat) -> Result<()> {
  match op {
    Operation::Install(args) => cmd_install(session.manager_mut(), &args, output),
    Operation::Remove(args) => cmd_remove(session.manager_mut(), &args, output),
    Operation::Update(args) => cmd_update(session.manager_mut(), &args, output),
    Operation::List(args) => cmd_list(session.manager(), args.ns.resolve(), output),
    Operation::Gate { action } => cmd_gate(session.manager_mut(), action, output),
  }
}

/// Run a single operation in its own session, saving state if it succeeded.
pub fn run_once(options: &SessionOptions, op: Operation, output: OutputFormat) -> Result<()> {
  let mutating = op.is_mutating();
  let mode = if mutating { LockMode::Exclusive } else { LockMode::Shared };
  let mut session = Session::open(options, mode, &op.label())?;

  dispatch(&mut session, op, output)?;

  if mutating {
    session.save()?;
  }
  Ok(())
}
