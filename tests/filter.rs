#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Stdio};

const INPUT: &str = "xxfoobar\nfooBar\nnothing\nfoo_bar\nfooxbar\n";

struct Output {
    code: i32,
    stdout: String,
}

fn surf(args: &[&str], input: &str) -> Output {
    surf_with_env(args, input, None)
}

fn surf_with_env(args: &[&str], input: &str, default_options: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_surf"));
    command
        .args(args)
        .env_remove("SURFER_DEFAULT_OPTIONS")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    if let Some(options) = default_options {
        command.env("SURFER_DEFAULT_OPTIONS", options);
    }

    let mut child = command.spawn().expect("failed to spawn surf");
    // surf may exit before reading anything, e.g. on invalid options
    let _ = child.stdin.take().expect("stdin is piped").write_all(input.as_bytes());
    let output = child.wait_with_output().expect("surf did not finish");

    Output {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8(output.stdout).expect("stdout is not UTF-8"),
    }
}

#[test]
fn filter_sorts_best_first() {
    let output = surf(&["-f", "fb"], INPUT);
    assert_eq!(output.code, 0);
    insta::assert_snapshot!(output.stdout.trim_end(), @r"
    fooBar
    foo_bar
    fooxbar
    xxfoobar
    ");
}

#[test]
fn filter_no_match_exits_1() {
    let output = surf(&["-f", "zzz"], INPUT);
    assert_eq!(output.code, 1);
    assert_eq!(output.stdout, "");
}

#[test]
fn filter_empty_query_prints_everything() {
    let output = surf(&[], INPUT);
    assert_eq!(output.code, 0);
    assert_eq!(output.stdout, INPUT);
}

#[test]
fn filter_max_results_and_print_query() {
    let output = surf(&["-f", "fb", "-n", "2", "--print-query"], INPUT);
    assert_eq!(output.code, 0);
    insta::assert_snapshot!(output.stdout.trim_end(), @r"
    fb
    fooBar
    foo_bar
    ");
}

#[test]
fn filter_print_score_and_positions() {
    let output = surf(&["-f", "fb", "-n", "2", "--print-score", "--print-positions"], INPUT);
    assert_eq!(output.stdout, "1.500\tfooBar\t0,3\n3.000\tfoo_bar\t0,4\n");
}

#[test]
fn filter_smart_case() {
    let output = surf(&["-f", "fB"], INPUT);
    assert_eq!(output.stdout, "fooBar\n");

    let output = surf(&["-f", "fB", "--case", "ignore"], INPUT);
    assert_eq!(output.stdout.lines().count(), 4);
}

#[test]
fn filter_read0_print0() {
    let output = surf(&["-f", "fb", "--read0", "--print0"], "foo\nbar\0fooBar\0nope\0");
    assert_eq!(output.stdout, "fooBar\0foo\nbar\0");
}

#[test]
fn filter_default_options_from_env() {
    let output = surf_with_env(&["-f", "fb"], INPUT, Some("-n 1 --print-score"));
    assert_eq!(output.stdout, "1.500\tfooBar\n");
}

#[test]
fn filter_rejects_zero_max_matchers() {
    let output = surf(&["-f", "fb", "--max-matchers", "0"], INPUT);
    assert_eq!(output.code, 2);
}
