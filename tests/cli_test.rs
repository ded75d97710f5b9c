use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_help_lists_configuration_flags() {
    let mut cmd = Command::new(cargo_bin!("beneficio-ledger"));
    cmd.arg("--help");

    cmd.assert().success().stdout(
        predicate::str::contains("--bind")
            .and(predicate::str::contains("--lock-wait-ms"))
            .and(predicate::str::contains("--lock-retries")),
    );
}

#[test]
fn test_rejects_malformed_bind_address() {
    let mut cmd = Command::new(cargo_bin!("beneficio-ledger"));
    cmd.args(["--bind", "not-an-address"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--bind"));
}
