use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn mutations_only_policy_allows_obn_listing() {
  let env = TestEnv::new();
  env.write_config("gate_policy = \"mutations-only\"\n");

  env
    .pysys_cmd()
    .args(["list", "--obn"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No packages installed in 'obn'"));
}

#[test]
fn invalid_config_is_reported() {
  let env = TestEnv::new();
  env.write_config("gate_policy = \"sometimes\"\n");

  env
    .pysys_cmd()
    .arg("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn corrupt_state_file_is_reported() {
  let env = TestEnv::new();
  std::fs::create_dir_all(env.data_path()).unwrap();
  std::fs::write(env.data_path().join("state.json"), "{ nope").unwrap();

  env
    .pysys_cmd()
    .arg("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("state file"));
}
