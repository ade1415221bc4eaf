use predicates::prelude::*;

#[test]
fn completions_command_outputs_bash_script() {
    let mut cmd = assert_cmd::Command::cargo_bin("fulfillsmart").unwrap();
    cmd.args(["completions", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fulfillsmart"));
}

#[test]
fn completions_command_outputs_zsh_script() {
    let mut cmd = assert_cmd::Command::cargo_bin("fulfillsmart").unwrap();
    cmd.args(["completions", "zsh"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#compdef fulfillsmart"));
}
