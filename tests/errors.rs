use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bft").unwrap() }

#[test]
fn unmatched_close_bracket_is_a_runtime_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "]"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unmatched ']'").and(predicate::str::contains("^")));
}

#[test]
fn error_carets_point_at_the_unfiltered_source() {
    // The ']' sits at source offset 3, behind three comment characters.
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "abc]"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at source offset 3"));
}

#[test]
fn exhausted_input_is_a_runtime_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", ","])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("input exhausted"));
}

#[test]
fn printing_a_negative_cell_is_a_runtime_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "-."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cell value -1 is not a valid character"));
}

#[test]
fn a_dangling_open_bracket_is_not_an_error() {
    // Mismatches only surface when reached; an unclosed '[' terminates
    // normally when the program runs off the end.
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "[+"])
        .assert()
        .success()
        .stderr(predicate::str::contains("unmatched").not());
}
