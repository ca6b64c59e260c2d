use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn obn_install_requires_gate() {
  let env = TestEnv::new();
  env.publish("obn", "net-tool", "1.0");

  env
    .pysys_cmd()
    .args(["install", "net-tool", "--obn"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("disabled"));

  env
    .pysys_cmd()
    .args(["gate", "enable"])
    .assert()
    .success()
    .stdout(predicate::str::contains("enabled"));

  env
    .pysys_cmd()
    .args(["install", "net-tool", "--obn"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed net-tool 1.0 (obn)"));

  env
    .pysys_cmd()
    .args(["list", "--obn"])
    .assert()
    .success()
    .stdout(predicate::str::contains("net-tool"));
}

#[test]
fn obn_list_is_gated_by_default() {
  let env = TestEnv::new();

  env
    .pysys_cmd()
    .args(["list", "--obn"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("disabled"));
}

#[test]
fn gate_state_persists() {
  let env = TestEnv::new();

  env.pysys_cmd().args(["gate", "enable"]).assert().success();
  assert_eq!(env.state()["gate_enabled"], true);

  env
    .pysys_cmd()
    .args(["gate", "status", "--output", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"enabled\": true"));

  env.pysys_cmd().args(["gate", "disable"]).assert().success();
  assert_eq!(env.state()["gate_enabled"], false);
}

#[test]
fn standard_namespace_ignores_gate() {
  let env = TestEnv::new();
  env.publish("standard", "tool-a", "1.0");

  env.pysys_cmd().args(["gate", "disable"]).assert().success();
  env.pysys_cmd().args(["install", "tool-a"]).assert().success();
}

#[test]
fn namespace_option_accepts_aliases_and_case() {
  let env = TestEnv::new();
  env.publish("standard", "tool-a", "1.0");
  env.publish("obn", "net-tool", "1.0");

  env
    .pysys_cmd()
    .args(["install", "tool-a", "--namespace", "std"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed tool-a 1.0 (standard)"));

  env
    .pysys_cmd()
    .args(["install", "net-tool", "--namespace", "OBN"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("disabled"));

  env.pysys_cmd().args(["gate", "enable"]).assert().success();

  env
    .pysys_cmd()
    .args(["install", "net-tool", "--namespace", "OBN"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed net-tool 1.0 (obn)"));

  env
    .pysys_cmd()
    .args(["list", "--namespace", "obn"])
    .assert()
    .success()
    .stdout(predicate::str::contains("net-tool"));
}

#[test]
fn unknown_namespace_is_a_usage_error() {
  let env = TestEnv::new();

  env
    .pysys_cmd()
    .args(["list", "--namespace", "pip"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown namespace 'pip'"));
}
