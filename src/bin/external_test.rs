use regex::Regex;
use std::collections::VecDeque;
use std::error::Error;
use std::fs;
use std::io::BufRead;
use std::process::{self, Command};

const LOXSCAN_PATH: &str = "./target/debug/loxscan";
const TEST_DIR: &str = "./test";

/// Compares `actual` output lines with the expectations in order, draining matches.
fn check_stream(
    stream: &str,
    output: &[u8],
    expectations: &mut VecDeque<String>,
    failures: &mut Vec<String>,
) {
    for line in output.lines() {
        let line = line.unwrap_or_default();
        match expectations.front() {
            Some(expected) if *expected == line => {
                expectations.pop_front();
            }
            Some(expected) => {
                failures.push(format!("{}: Expected: {}, Actual: {}", stream, expected, line));
            }
            None => failures.push(format!("{}: Unexpected: {}", stream, line)),
        }
    }

    for missed in expectations.drain(..) {
        failures.push(format!("{}: Expected, not found: {}", stream, missed));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let expect_regex = Regex::new("// expect: (.*)")?;
    let error_regex = Regex::new("// error: (.*)")?;
    let mut failed = 0;

    let mut test_files = fs::read_dir(TEST_DIR)?.collect::<Result<Vec<_>, _>>()?;
    test_files.sort_by_key(|entry| entry.file_name());

    for test_file in test_files {
        let test_name = test_file.file_name().to_string_lossy().into_owned();
        print!("Running test: {} ... ", test_name);
        let contents = fs::read_to_string(test_file.path())?;

        let mut expectations = VecDeque::new();
        let mut errors = VecDeque::new();

        for line in contents.lines() {
            if let Some(expected_value) = expect_regex.captures(line).and_then(|c| c.get(1)) {
                expectations.push_back(String::from(expected_value.as_str()));
            }
            if let Some(expected_error) = error_regex.captures(line).and_then(|c| c.get(1)) {
                errors.push_back(String::from(expected_error.as_str()));
            }
        }

        let expected_status = if errors.is_empty() { 0 } else { 65 };
        let output = Command::new(LOXSCAN_PATH).arg(test_file.path()).output()?;

        let mut failures = Vec::new();
        check_stream("stdout", &output.stdout, &mut expectations, &mut failures);
        check_stream("stderr", &output.stderr, &mut errors, &mut failures);
        if output.status.code() != Some(expected_status) {
            failures.push(format!(
                "Expected exit status {}, got {:?}",
                expected_status,
                output.status.code()
            ));
        }

        if failures.is_empty() {
            println!("pass!");
        } else {
            failed += 1;
            println!("\x1b[0;31mfail!\x1b[0m");
            for failure in failures {
                println!("{}", failure);
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
    Ok(())
}
