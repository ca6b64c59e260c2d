use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn shell_runs_commands_in_sequence() {
  let env = TestEnv::new();
  env.publish("obn", "net-tool", "1.0");

  env
    .pysys_cmd()
    .arg("shell")
    .write_stdin("install net-tool --obn\ngate enable\ninstall net-tool --obn\nlist --obn\nexit\n")
    .assert()
    .success()
    .stderr(predicate::str::contains("disabled"))
    .stdout(predicate::str::contains("Installed net-tool 1.0"));

  assert_eq!(env.state()["gate_enabled"], true);
  assert_eq!(env.state()["packages"][0]["name"], "net-tool");
}

#[test]
fn shell_survives_bad_lines() {
  let env = TestEnv::new();
  env.publish("standard", "tool-a", "1.0");

  env
    .pysys_cmd()
    .arg("shell")
    .write_stdin("# comment\n\nfrobnicate\nremove nothing\ninstall tool-a\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed tool-a 1.0"));

  assert_eq!(env.state()["packages"][0]["name"], "tool-a");
}

#[test]
fn shell_help_lists_commands() {
  let env = TestEnv::new();

  env
    .pysys_cmd()
    .arg("shell")
    .write_stdin("help\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("install"));
}

#[test]
fn shell_accepts_namespace_option() {
  let env = TestEnv::new();
  env.publish("obn", "net-tool", "1.0");

  env
    .pysys_cmd()
    .arg("shell")
    .write_stdin("gate enable\ninstall net-tool --namespace OBN\nlist --namespace std\nlist --namespace obn\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed net-tool 1.0 (obn)"))
    .stdout(predicate::str::contains("No packages installed in 'standard'"));

  assert_eq!(env.state()["packages"][0]["namespace"], "obn");
}
