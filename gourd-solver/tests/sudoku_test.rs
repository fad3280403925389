#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::instance_path;
use helpers::parse_grid;
use helpers::parse_status;
use helpers::read_grid;
use helpers::run_solver;
use helpers::run_solver_with_options;
use helpers::Status;
use regex::Regex;

const FAST_OPTIONS: [&str; 4] = [
    "--propagator",
    "watched-literals",
    "--decision-policy",
    "vsids",
];

#[test]
fn puzzle_is_solved_to_its_unique_grid() {
    let run = run_solver(
        instance_path("sudoku", "puzzle_9x9.txt"),
        "sudoku_puzzle_9x9",
        FAST_OPTIONS.into_iter().chain(["--verify"]),
    );

    assert_eq!(Status::Satisfiable, parse_status(&run.output));
    assert_eq!(
        read_grid(instance_path("sudoku", "solved_9x9.txt")),
        parse_grid(&run.output)
    );

    run.files.cleanup().unwrap();
}

#[test]
fn solved_grid_is_reported_unchanged() {
    let run = run_solver(
        instance_path("sudoku", "solved_9x9.txt"),
        "sudoku_solved_9x9",
        ["--verify"],
    );

    assert_eq!(Status::Satisfiable, parse_status(&run.output));
    assert_eq!(
        read_grid(instance_path("sudoku", "solved_9x9.txt")),
        parse_grid(&run.output)
    );

    run.files.cleanup().unwrap();
}

#[test]
fn four_by_four_grid_has_no_solution() {
    let run = run_solver(
        instance_path("sudoku", "empty_4x4.txt"),
        "sudoku_empty_4x4",
        [],
    );

    assert_eq!(Status::Unsatisfiable, parse_status(&run.output));
    assert!(parse_grid(&run.output).is_empty());

    run.files.cleanup().unwrap();
}

#[test]
fn consecutive_clues_have_no_solution() {
    let run = run_solver(
        instance_path("sudoku", "clashing_clues_9x9.txt"),
        "sudoku_clashing_clues",
        FAST_OPTIONS,
    );

    assert_eq!(Status::Unsatisfiable, parse_status(&run.output));

    run.files.cleanup().unwrap();
}

#[test]
fn malformed_puzzle_fails_the_run() {
    let run = run_solver_with_options(
        instance_path("sudoku", "malformed_3x3.txt"),
        "sudoku_malformed",
        [],
    );

    assert!(!run.status.success());
    assert!(run.output.contains("Execution failed"), "output:\n{}", run.output);

    run.files.cleanup().unwrap();
}

#[test]
fn batch_reports_one_line_per_puzzle() {
    let run = run_solver(
        instance_path("sudoku", ""),
        "sudoku_batch",
        FAST_OPTIONS,
    );

    let line_regex =
        Regex::new(r"^(\S+) (SAT|UNSAT|UNKNOWN|error: .*) (\d+\.\d+) (\d+|-) (\d+|-)$").unwrap();
    let lines = run
        .output
        .lines()
        .filter_map(|line| line_regex.captures(line))
        .map(|captures| {
            (
                captures[1].to_owned(),
                captures[2].to_owned(),
                captures[5].to_owned(),
            )
        })
        .collect::<Vec<_>>();

    let names = lines.iter().map(|(name, _, _)| name.as_str()).collect::<Vec<_>>();
    assert_eq!(
        vec![
            "clashing_clues_9x9.txt",
            "empty_4x4.txt",
            "malformed_3x3.txt",
            "puzzle_9x9.txt",
            "solved_9x9.txt",
        ],
        names,
        "output:\n{}",
        run.output
    );

    assert_eq!("UNSAT", lines[0].1);
    assert_eq!(("UNSAT", "64"), (lines[1].1.as_str(), lines[1].2.as_str()));
    assert!(lines[2].1.starts_with("error: "));
    assert_eq!(("SAT", "729"), (lines[3].1.as_str(), lines[3].2.as_str()));
    assert_eq!(("SAT", "729"), (lines[4].1.as_str(), lines[4].2.as_str()));

    run.files.cleanup().unwrap();
}
