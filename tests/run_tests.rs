use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

const TEST_TIMEOUT_SECS: u64 = 30;

struct EvalCase {
    name: &'static str,
    args: &'static [&'static str],
    expected_exit_code: i32,
    expected_stdout: Option<&'static str>,
}

const CASES: &[EvalCase] = &[
    EvalCase {
        name: "standard precedence",
        args: &["--eval", "2+2*2"],
        expected_exit_code: 0,
        expected_stdout: Some("6"),
    },
    EvalCase {
        name: "parentheses",
        args: &["--eval", "(2+2)*2"],
        expected_exit_code: 0,
        expected_stdout: Some("8"),
    },
    EvalCase {
        name: "decimal arithmetic",
        args: &["--eval", "1.5/0.5"],
        expected_exit_code: 0,
        expected_stdout: Some("3"),
    },
    EvalCase {
        name: "power falls through to function path",
        args: &["--eval", "2^10"],
        expected_exit_code: 0,
        expected_stdout: Some("1024"),
    },
    EvalCase {
        name: "scientific sqrt",
        args: &["--eval", "sqrt(16)", "--mode", "scientific"],
        expected_exit_code: 0,
        expected_stdout: Some("4"),
    },
    EvalCase {
        name: "scientific log base 10",
        args: &["--eval", "log(100)", "--mode", "scientific"],
        expected_exit_code: 0,
        expected_stdout: Some("2"),
    },
    EvalCase {
        name: "scientific pi substitution",
        args: &["--eval", "2*pi", "--mode", "scientific"],
        expected_exit_code: 0,
        expected_stdout: Some("6.283185307179586"),
    },
    EvalCase {
        name: "programmer hex digits",
        args: &["--eval", "A+1", "--mode", "programmer"],
        expected_exit_code: 0,
        expected_stdout: Some("11"),
    },
    EvalCase {
        name: "programmer shift",
        args: &["--eval", "1<<4", "--mode", "programmer"],
        expected_exit_code: 0,
        expected_stdout: Some("16"),
    },
    EvalCase {
        name: "currency conversion",
        args: &["--eval", "100", "--convert", "USD→EUR"],
        expected_exit_code: 0,
        expected_stdout: Some("85"),
    },
    EvalCase {
        name: "affine temperature conversion",
        args: &["--eval", "0", "--convert", "°C→°F"],
        expected_exit_code: 0,
        expected_stdout: Some("32"),
    },
    EvalCase {
        name: "unit conversion rounds for display",
        args: &["--eval", "3", "--convert", "kg→lb"],
        expected_exit_code: 0,
        expected_stdout: Some("6.6139"),
    },
    EvalCase {
        name: "unknown conversion key is identity",
        args: &["--eval", "42", "--convert", "unknown-key"],
        expected_exit_code: 0,
        expected_stdout: Some("42"),
    },
    EvalCase {
        name: "division by zero fails",
        args: &["--eval", "1/0"],
        expected_exit_code: 2,
        expected_stdout: None,
    },
    EvalCase {
        name: "trailing operator fails",
        args: &["--eval", "2+"],
        expected_exit_code: 2,
        expected_stdout: None,
    },
    EvalCase {
        name: "sqrt of negative fails",
        args: &["--eval", "sqrt(0-1)", "--mode", "scientific"],
        expected_exit_code: 2,
        expected_stdout: None,
    },
    EvalCase {
        name: "non-numeric conversion amount fails",
        args: &["--eval", "abc", "--convert", "cm→m"],
        expected_exit_code: 2,
        expected_stdout: None,
    },
    EvalCase {
        name: "unknown mode fails",
        args: &["--eval", "1+1", "--mode", "hexadecimal"],
        expected_exit_code: 2,
        expected_stdout: None,
    },
];

fn run_case(case: &EvalCase) -> Result<(), String> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_multicalc"));
    command
        .args(case.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    let mut child = command
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    match child.wait_timeout(Duration::from_secs(TEST_TIMEOUT_SECS)) {
        Ok(Some(status)) => {
            let actual_exit_code = status.code().unwrap_or(-1);
            if actual_exit_code != case.expected_exit_code {
                return Err(format!(
                    "Expected exit code: {}, got: {}",
                    case.expected_exit_code, actual_exit_code
                ));
            }

            if let Some(expected) = case.expected_stdout {
                let mut output = String::new();
                if let Some(mut stdout) = child.stdout.take() {
                    let _ = stdout.read_to_string(&mut output);
                }
                if output.trim() != expected {
                    return Err(format!(
                        "Expected stdout: {:?}, got: {:?}",
                        expected,
                        output.trim()
                    ));
                }
            }
            Ok(())
        }
        Ok(None) => {
            let _ = child.kill();
            Err(format!("Test timed out after {} seconds", TEST_TIMEOUT_SECS))
        }
        Err(e) => Err(format!("Error waiting for process: {}", e)),
    }
}

fn run_eval_suite() -> bool {
    println!("Running evaluation test suite...");
    println!("==========================");

    let mut passed = 0;
    let mut failed = 0;

    for case in CASES {
        print!("Testing {}... ", case.name);

        match run_case(case) {
            Ok(()) => {
                println!("PASS");
                passed += 1;
            }
            Err(error) => {
                println!("FAIL");
                println!("  {}", error);
                failed += 1;
            }
        }
    }

    println!("==========================");
    println!("Results: {} passed, {} failed", passed, failed);

    failed == 0
}

#[test]
fn run_all_tests() {
    assert!(run_eval_suite(), "Some tests failed");
}
