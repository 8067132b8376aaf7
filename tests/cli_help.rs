use assert_cmd::Command;

#[test]
fn cli_help_smoke() {
    let mut cmd = Command::cargo_bin("replifeat").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn genome_cli_help_smoke() {
    let mut cmd = Command::cargo_bin("replifeat-genome").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}
