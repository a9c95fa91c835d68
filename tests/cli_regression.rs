// tests/cli_regression.rs

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("validate_karyotype").unwrap()
}

#[test]
fn valid_karyotype_exits_zero_with_json() {
    cmd()
        .arg("46,XX")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn semantic_violation_exits_one() {
    cmd()
        .arg("46,Y")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("at least one X"));
}

#[test]
fn parse_failure_exits_one_with_null_parsed() {
    cmd()
        .arg("46XX")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"parsed\": null"))
        .stdout(predicate::str::contains("comma"));
}

#[test]
fn reads_karyotype_from_stdin() {
    cmd()
        .write_stdin("47,XX,+21\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn empty_input_exits_two() {
    cmd()
        .write_stdin("")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("No karyotype provided"));
}

#[test]
fn compact_flag_emits_single_line() {
    cmd()
        .args(["--compact", "46,XX"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            out.trim_end().lines().count() == 1
        }))
        .stdout(predicate::str::contains("\"valid\":true"));
}

#[test]
fn diagnose_flag_reports_parse_errors_on_stderr() {
    cmd()
        .args(["--diagnose", "46,XX,del(5)(q"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"parsed\": null"))
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn mosaic_round_trip_through_the_cli() {
    cmd()
        .arg("47,XX,+21[10]/46,XX[20]")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cell_lines\""))
        .stdout(predicate::str::contains("\"count\": 10"));
}
