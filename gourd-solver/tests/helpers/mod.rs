//! Helpers to run the solver binary in integration tests.
#![allow(dead_code, reason = "not every test file uses every helper")]

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

#[derive(Debug)]
pub(crate) struct Files {
    pub(crate) instance_file: PathBuf,
    pub(crate) log_file: PathBuf,
    pub(crate) err_file: PathBuf,
}

impl Files {
    pub(crate) fn cleanup(self) -> std::io::Result<()> {
        std::fs::remove_file(self.log_file)?;
        std::fs::remove_file(self.err_file)?;

        Ok(())
    }
}

/// The result of a finished run of the solver.
#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) files: Files,
    pub(crate) status: ExitStatus,
    pub(crate) output: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

pub(crate) fn instance_path(folder_name: &str, file_name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/tests/{folder_name}/{file_name}",
        env!("CARGO_MANIFEST_DIR")
    ))
}

/// Runs the solver on `instance_path` and waits for it to exit. The output is written to files
/// named after `run_name`, which has to be unique among the tests running in parallel.
pub(crate) fn run_solver_with_options<'a>(
    instance_path: impl AsRef<Path>,
    run_name: &str,
    args: impl IntoIterator<Item = &'a str>,
) -> Run {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let instance_path = instance_path.as_ref();

    let solver = PathBuf::from(env!("CARGO_BIN_EXE_gourd-solver"));

    let output_directory = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    let log_file_path = output_directory.join(format!("{run_name}.log"));
    let err_file_path = output_directory.join(format!("{run_name}.err"));

    let mut command = Command::new(solver);

    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(instance_path)
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(File::create(&err_file_path).expect("Failed to create error file."))
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let output = std::fs::read_to_string(&log_file_path).expect("Failed to read solver output");

    Run {
        files: Files {
            instance_file: instance_path.to_path_buf(),
            log_file: log_file_path,
            err_file: err_file_path,
        },
        status,
        output,
    }
}

/// Runs the solver and asserts that it exits successfully.
pub(crate) fn run_solver<'a>(
    instance_path: impl AsRef<Path>,
    run_name: &str,
    args: impl IntoIterator<Item = &'a str>,
) -> Run {
    let run = run_solver_with_options(instance_path, run_name, args);
    assert!(
        run.status.success(),
        "error solving instance, output:\n{}",
        run.output
    );
    run
}

/// Finds the `s ...` line in the output.
pub(crate) fn parse_status(output: &str) -> Status {
    let status_regex = Regex::new(r"(?m)^s (SATISFIABLE|UNSATISFIABLE|UNKNOWN)$").unwrap();

    let captures = status_regex
        .captures(output)
        .unwrap_or_else(|| panic!("no status line in the output:\n{output}"));

    match &captures[1] {
        "SATISFIABLE" => Status::Satisfiable,
        "UNSATISFIABLE" => Status::Unsatisfiable,
        _ => Status::Unknown,
    }
}

/// Finds the `v ... 0` line in the output and returns its literals without the terminating zero.
pub(crate) fn parse_model(output: &str) -> Vec<i32> {
    let model_regex = Regex::new(r"(?m)^v ((?:-?\d+ )*)0$").unwrap();

    let captures = model_regex
        .captures(output)
        .unwrap_or_else(|| panic!("no model line in the output:\n{output}"));

    captures[1]
        .split_whitespace()
        .map(|literal| literal.parse::<i32>().unwrap())
        .collect()
}

/// Reads the clauses of a DIMACS file, ignoring comments and the header.
pub(crate) fn read_clauses(instance_path: impl AsRef<Path>) -> Vec<Vec<i32>> {
    let contents = std::fs::read_to_string(instance_path).expect("Failed to read instance");

    let literals = contents
        .lines()
        .filter(|line| !line.starts_with('c') && !line.starts_with('p'))
        .flat_map(|line| line.split_whitespace())
        .map(|literal| literal.parse::<i32>().unwrap())
        .collect::<Vec<_>>();

    literals
        .split(|&literal| literal == 0)
        .filter(|clause| !clause.is_empty())
        .map(<[i32]>::to_vec)
        .collect()
}

/// Reads the lines of a puzzle or grid which contain values.
pub(crate) fn read_grid(path: impl AsRef<Path>) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read grid")
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// The grid lines printed after `s SATISFIABLE`.
pub(crate) fn parse_grid(output: &str) -> Vec<String> {
    let grid_line_regex = Regex::new(r"^\d+( \d+)*$").unwrap();

    output
        .lines()
        .skip_while(|line| *line != "s SATISFIABLE")
        .skip(1)
        .filter(|line| grid_line_regex.is_match(line))
        .map(str::to_owned)
        .collect()
}
