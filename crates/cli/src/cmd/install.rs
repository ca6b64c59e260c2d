use anyhow::Result;

use pysys_lib::PackageManager;

use super::PackageArgs;
use crate::output::{OutputFormat, print_json, print_success, print_warning};

pub fn cmd_install(pm: &mut PackageManager, args: &PackageArgs, output: OutputFormat) -> Result<()> {
  let outcome = pm.install(args.namespace(), &args.name)?;

  if let Some(warning) = &outcome.warning {
    print_warning(&format!("{}; {} was installed anyway", warning, outcome.name));
  }

  if output.is_json() {
    print_json(&serde_json::json!({
      "namespace": outcome.namespace,
      "name": outcome.name,
      "version": outcome.version,
      "warning": outcome.warning.as_ref().map(|w| w.to_string()),
    }))?;
  } else {
    print_success(&format!(
      "Installed {} {} ({})",
      outcome.name, outcome.version, outcome.namespace
    ));
  }

  Ok(())
}
