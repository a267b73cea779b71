use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bft").unwrap() }

#[test]
fn piped_stdin_with_no_subcommand_executes_once() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin("+++.")
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn bare_flag_behaves_the_same_under_the_repl_subcommand() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["repl", "--bare"])
        .write_stdin("+++.")
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn bare_empty_input_exits_clean_and_quiet() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn bare_invalid_program_prints_concise_error_and_exits_clean() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin("]")
        .assert()
        .success()
        .stderr(predicate::str::contains("unmatched ']'"));
}

#[test]
fn meta_exit_quits_without_executing() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin(":exit\n+++.\n")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn meta_input_stocks_the_comma_buffer() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin(":input A\n,.\n")
        .assert()
        .success()
        .stdout("A\n");
}

#[test]
fn meta_run_executes_the_pending_buffer_early() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin("+.\n:run\n++.\n")
        .assert()
        .success()
        .stdout("\u{1}\n\u{2}\n");
}

#[test]
fn meta_tape_reports_the_last_run_on_stderr() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin("+++>+\n:run\n:tape\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("0: 3").and(predicate::str::contains("1: 1")));
}

#[test]
fn meta_help_prints_to_stderr_not_stdout() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin(":help\n:exit\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(":input"));
}

#[test]
fn forced_editor_on_non_tty_errors() {
    // Piped stdin (non-tty) + --editor should error out with a helpful message.
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["repl", "--editor"])
        .write_stdin("+++.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin is not a TTY"));
}

#[test]
fn repl_mode_env_var_rejects_unknown_values() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("repl")
        .env("BFT_REPL_MODE", "zesty")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid BFT_REPL_MODE value"));
}
