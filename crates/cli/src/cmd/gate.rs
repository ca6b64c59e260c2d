use anyhow::Result;

use pysys_lib::PackageManager;

use super::GateAction;
use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_gate(pm: &mut PackageManager, action: GateAction, output: OutputFormat) -> Result<()> {
  match action {
    GateAction::Enable => pm.set_gate(true),
    GateAction::Disable => pm.set_gate(false),
    GateAction::Status => {}
  }
  let enabled = pm.gate_status();

  if output.is_json() {
    return print_json(&serde_json::json!({ "enabled": enabled }));
  }

  match action {
    GateAction::Enable => print_success("OBN namespace enabled"),
    GateAction::Disable => print_success("OBN namespace disabled"),
    GateAction::Status => print_stat("OBN gate", if enabled { "enabled" } else { "disabled" }),
  }

  Ok(())
}
