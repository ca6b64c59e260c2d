use pysys_lib::{Namespace, PackageError};

use super::common::{PackageTree, names};

#[test]
fn installed_package_is_listed_exactly_once() {
  let tree = PackageTree::new();
  tree.publish(Namespace::Standard, "tool-a", "1.0");
  tree.publish(Namespace::Standard, "tool-b", "0.3");
  let mut pm = tree.manager();

  pm.install(Namespace::Standard, "tool-a").unwrap();
  pm.install(Namespace::Standard, "tool-b").unwrap();
  let _ = pm.install(Namespace::Standard, "tool-a");

  let listed = names(&pm, Namespace::Standard);
  assert_eq!(listed.iter().filter(|n| *n == "tool-a").count(), 1);
  assert_eq!(listed, ["tool-a", "tool-b"]);
}

#[test]
fn obn_install_before_and_after_enabling_gate() {
  let tree = PackageTree::new();
  tree.publish(Namespace::Obn, "net-tool", "1.0");
  let mut pm = tree.manager();

  let err = pm.install(Namespace::Obn, "net-tool").unwrap_err();
  assert!(matches!(err, PackageError::GateDisabled { namespace: Namespace::Obn }));
  assert!(pm.registry().is_empty());

  pm.set_gate(true);
  let outcome = pm.install(Namespace::Obn, "net-tool").unwrap();
  assert_eq!(outcome.name, "net-tool");
  assert_eq!(outcome.version, "1.0");
  assert_eq!(names(&pm, Namespace::Obn), ["net-tool"]);
}

#[test]
fn update_picks_up_descriptor_edits() {
  let tree = PackageTree::new();
  tree.publish(Namespace::Standard, "tool-a", "1.0");
  let mut pm = tree.manager();
  pm.install(Namespace::Standard, "tool-a").unwrap();

  tree.publish(Namespace::Standard, "tool-a", "1.1");
  let outcome = pm.update(Namespace::Standard, "tool-a").unwrap();

  assert_eq!(outcome.old_version, "1.0");
  assert_eq!(outcome.new_version, "1.1");
}

#[test]
fn missing_descriptor_is_not_installed() {
  let tree = PackageTree::new();
  let mut pm = tree.manager();

  let err = pm.install(Namespace::Standard, "ghost").unwrap_err();
  assert!(matches!(err, PackageError::MetadataMissing { .. }));
  assert!(!names(&pm, Namespace::Standard).contains(&"ghost".to_string()));
}

#[test]
fn install_remove_round_trip() {
  let tree = PackageTree::new();
  tree.publish(Namespace::Standard, "tool-a", "1.0");
  let mut pm = tree.manager();

  pm.install(Namespace::Standard, "tool-a").unwrap();
  pm.remove(Namespace::Standard, "tool-a").unwrap();
  assert!(names(&pm, Namespace::Standard).is_empty());

  let err = pm.remove(Namespace::Standard, "tool-a").unwrap_err();
  assert!(matches!(err, PackageError::PackageNotFound { .. }));

  // Reinstall after removal works.
  pm.install(Namespace::Standard, "tool-a").unwrap();
  assert_eq!(names(&pm, Namespace::Standard), ["tool-a"]);
}

#[test]
fn removing_unknown_package_leaves_registry_unchanged() {
  let tree = PackageTree::new();
  tree.publish(Namespace::Standard, "tool-a", "1.0");
  let mut pm = tree.manager();
  pm.install(Namespace::Standard, "tool-a").unwrap();

  assert!(pm.remove(Namespace::Standard, "tool-z").is_err());
  assert_eq!(names(&pm, Namespace::Standard), ["tool-a"]);
}

#[test]
fn same_name_in_both_namespaces() {
  let tree = PackageTree::new();
  tree.publish(Namespace::Standard, "shared", "1.0");
  tree.publish(Namespace::Obn, "shared", "9.0");
  let mut pm = tree.manager();
  pm.set_gate(true);

  assert_eq!(pm.install(Namespace::Standard, "shared").unwrap().version, "1.0");
  assert_eq!(pm.install(Namespace::Obn, "shared").unwrap().version, "9.0");

  pm.remove(Namespace::Obn, "shared").unwrap();
  assert_eq!(names(&pm, Namespace::Standard), ["shared"]);
  assert!(names(&pm, Namespace::Obn).is_empty());
}

#[cfg(unix)]
#[test]
fn failing_hook_still_installs() {
  let tree = PackageTree::new();
  tree.publish(Namespace::Standard, "tool-a", "1.0");
  tree.hook(Namespace::Standard, "tool-a", "echo missing dependency >&2\nexit 1");
  let mut pm = tree.manager();

  let outcome = pm.install(Namespace::Standard, "tool-a").unwrap();

  assert!(matches!(outcome.warning, Some(PackageError::InstallHookFailed { .. })));
  assert_eq!(names(&pm, Namespace::Standard), ["tool-a"]);
}

#[cfg(unix)]
#[test]
fn successful_hook_runs_in_package_directory() {
  let tree = PackageTree::new();
  tree.publish(Namespace::Standard, "tool-a", "1.0");
  tree.hook(Namespace::Standard, "tool-a", "touch installed-marker");
  let mut pm = tree.manager();

  let outcome = pm.install(Namespace::Standard, "tool-a").unwrap();

  assert!(outcome.warning.is_none());
  assert!(tree.base().join("standard/tool-a/installed-marker").exists());
}
