use anyhow::Result;

use pysys_lib::{Namespace, PackageManager};

use crate::output::{OutputFormat, print_info, print_json, symbols};

pub fn cmd_list(pm: &PackageManager, namespace: Namespace, output: OutputFormat) -> Result<()> {
  let names = pm.list(namespace)?;
  let registry = pm.registry();

  let packages: Vec<_> = names
    .filter_map(|name| registry.get(namespace, name))
    .collect();

  if output.is_json() {
    let items: Vec<_> = packages
      .iter()
      .map(|p| serde_json::json!({ "name": p.name, "version": p.version }))
      .collect();
    print_json(&serde_json::json!({ "namespace": namespace, "packages": items }))?;
    return Ok(());
  }

  if packages.is_empty() {
    print_info(&format!("No packages installed in '{}'", namespace));
    return Ok(());
  }

  println!("Installed packages ({}):", namespace);
  for package in packages {
    println!("  {} {} {}", symbols::INFO, package.name, package.version);
  }

  Ok(())
}
