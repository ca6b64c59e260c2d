use anyhow::Result;

use pysys_lib::PackageManager;

use super::PackageArgs;
use crate::output::{OutputFormat, print_json, print_success};

pub fn cmd_remove(pm: &mut PackageManager, args: &PackageArgs, output: OutputFormat) -> Result<()> {
  let namespace = args.namespace();
  pm.remove(namespace, &args.name)?;

  if output.is_json() {
    print_json(&serde_json::json!({ "namespace": namespace, "removed": args.name }))?;
  } else {
    print_success(&format!("Removed {} ({})", args.name, namespace));
  }

  Ok(())
}
