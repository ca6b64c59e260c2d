use anyhow::Result;

use pysys_lib::PackageManager;

use super::PackageArgs;
use crate::output::{OutputFormat, print_info, print_json, print_success, symbols};

pub fn cmd_update(pm: &mut PackageManager, args: &PackageArgs, output: OutputFormat) -> Result<()> {
  let outcome = pm.update(args.namespace(), &args.name)?;

  if output.is_json() {
    print_json(&serde_json::json!({
      "namespace": outcome.namespace,
      "name": outcome.name,
      "old_version": outcome.old_version,
      "new_version": outcome.new_version,
    }))?;
  } else if outcome.old_version == outcome.new_version {
    print_info(&format!("{} is up to date ({})", outcome.name, outcome.new_version));
  } else {
    print_success(&format!(
      "Updated {} {} {} {}",
      outcome.name,
      outcome.old_version,
      symbols::ARROW,
      outcome.new_version
    ));
  }

  Ok(())
}
