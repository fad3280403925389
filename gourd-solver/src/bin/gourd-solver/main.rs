mod checker;
mod file_format;
mod os_signal_termination;
mod parsers;
mod result;

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use file_format::FileFormat;
use gourd_core::options::DecisionPolicyKind;
use gourd_core::options::PropagatorKind;
use gourd_core::options::RestartOptions;
use gourd_core::options::SequenceGeneratorType;
use gourd_core::options::SolverOptions;
use gourd_core::options::VsidsOptions;
use gourd_core::rand::rngs::SmallRng;
use gourd_core::rand::SeedableRng;
use gourd_core::results::SatisfactionResult;
use gourd_core::results::SolveStatus;
use gourd_core::statistics::configure_statistic_logging;
use gourd_core::termination::Combinator;
use gourd_core::termination::TimeBudget;
use gourd_core::Solver;
use gourd_solver::encoders::non_consecutive_sudoku::decode;
use gourd_solver::encoders::non_consecutive_sudoku::encode;
use gourd_solver::encoders::non_consecutive_sudoku::EncodedFormula;
use gourd_solver::encoders::non_consecutive_sudoku::Puzzle;
use log::error;
use log::info;
use log::warn;
use log::Level;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use parsers::dimacs::parse_cnf;
use parsers::dimacs::SolverDimacsSink;
use result::GourdError;
use result::GourdResult;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The instance to solve. Which kind of instance it is follows from the path:
    ///  * '.cnf' for SAT instances, given in the DIMACS format,
    ///  * '.txt' or '.sudoku' for a non-consecutive sudoku puzzle,
    ///  * a directory to solve every '.txt' puzzle in it.
    instance_path: PathBuf,

    /// The time budget for every instance, given in milliseconds.
    #[arg(short = 't', long = "time-limit")]
    time_limit: Option<u64>,

    /// The random seed to use for the PRNG. This influences the initial activities of VSIDS.
    #[arg(short = 'r', long = "random-seed", default_value_t = 42)]
    random_seed: u64,

    /// Enables log message output from the solver.
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    #[arg(short = 's', long = "log-statistics", default_value_t = false)]
    log_statistics: bool,

    /// If `--verbose` is enabled removes the timestamp information from the log messages.
    #[arg(long = "omit-timestamp", default_value_t = false)]
    omit_timestamp: bool,

    /// If `--verbose` is enabled removes the call site information from the log messages.
    /// Call site is the file and line in it that originated the message.
    #[arg(long = "omit-call-site", default_value_t = false)]
    omit_call_site: bool,

    /// Determines how clauses are propagated.
    #[arg(long, value_enum, default_value_t)]
    propagator: PropagatorKind,

    /// Determines which variable is decided on when propagation reaches a fixpoint.
    #[arg(long, value_enum, default_value_t)]
    decision_policy: DecisionPolicyKind,

    /// The factor by which VSIDS decays the activities after every conflict.
    #[arg(long = "vsids-decay-factor", default_value_t = 0.95)]
    vsids_decay_factor: f64,

    /// Enables restarts. Without this flag the search never backtracks to the root voluntarily.
    #[arg(long = "restarts", default_value_t = false)]
    restarts: bool,

    /// Decides the sequence based on which the restarts are performed.
    /// To be used in combination with "--restart-base-interval".
    #[arg(long, value_enum, default_value_t)]
    restart_sequence_generator_type: SequenceGeneratorType,

    /// The base interval length is used as a multiplier to the restart sequence.
    /// For example, constant restarts with base interval 100 means a restart is triggered every
    /// 100 conflicts.
    #[arg(long = "restart-base-interval", default_value_t = 50)]
    restart_base_interval: u64,

    /// The coefficient in the geometric sequence x_i = x_{i-1} * geometric-coef, x_1 =
    /// "restart-base-interval". Used only if "--restart-sequence-generator-type" is
    /// "geometric".
    #[arg(long = "restart-geometric-coef", default_value_t = 1.5)]
    restart_geometric_coef: f64,

    /// Removes literals from learned clauses which are implied by the other literals, following
    /// the idea proposed by Van Gelder.
    #[arg(long = "learned-clause-minimisation", default_value_t = false)]
    learned_clause_minimisation: bool,

    /// Sets every pure literal to true before the search starts. The reported model then still
    /// satisfies the instance, but other models may be excluded.
    #[arg(long = "pure-literal-elimination", default_value_t = false)]
    pure_literal_elimination: bool,

    /// Verify that the reported solution is consistent with the instance.
    #[arg(long = "verify", default_value_t = false)]
    verify_solution: bool,
}

impl Args {
    fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            propagator: self.propagator,
            decision_policy: self.decision_policy,
            restart_options: RestartOptions {
                no_restarts: !self.restarts,
                sequence_generator_type: self.restart_sequence_generator_type,
                base_interval: self.restart_base_interval,
                geometric_coef: self.restart_geometric_coef,
                ..Default::default()
            },
            vsids_options: VsidsOptions {
                decay_factor: self.vsids_decay_factor,
                ..Default::default()
            },
            learned_clause_minimisation: self.learned_clause_minimisation,
            pure_literal_elimination: self.pure_literal_elimination,
            random_generator: SmallRng::seed_from_u64(self.random_seed),
        }
    }
}

fn configure_logging_unknown() -> std::io::Result<()> {
    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(LevelFilter::Trace)
        .target(env_logger::Target::Stdout)
        .init();
    Ok(())
}

fn configure_logging(
    file_format: FileFormat,
    verbose: bool,
    log_statistics: bool,
    omit_timestamp: bool,
    omit_call_site: bool,
) -> std::io::Result<()> {
    let comment_prefix = match file_format {
        FileFormat::CnfDimacsPLine => "c",
        FileFormat::Puzzle | FileFormat::PuzzleDirectory => "%",
    };

    if log_statistics {
        let statistic_prefix = match file_format {
            FileFormat::CnfDimacsPLine => "c STAT",
            FileFormat::Puzzle | FileFormat::PuzzleDirectory => "% STAT",
        };
        configure_statistic_logging(statistic_prefix, None, None, None);
    }

    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "{comment_prefix} ")?;
            if record.level() != Level::Info && !omit_timestamp {
                write!(buf, "{} ", buf.timestamp())?;
            }
            write!(buf, "{} ", record.level())?;
            if record.level() != Level::Info && !omit_call_site {
                write!(
                    buf,
                    "[{}:{}] ",
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0)
                )?;
            }
            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> GourdResult<()> {
    let args = Args::parse();

    let Some(file_format) = FileFormat::of(&args.instance_path) else {
        configure_logging_unknown()?;
        return Err(GourdError::invalid_instance(args.instance_path.display()));
    };

    configure_logging(
        file_format,
        args.verbose,
        args.log_statistics,
        args.omit_timestamp,
        args.omit_call_site,
    )?;

    // Register the handling of signals (for example CTRL+C)
    let os_signal = OsSignal::install()?;

    let run_options = RunOptions {
        time_limit: args.time_limit.map(Duration::from_millis),
        os_signal,
        verify: args.verify_solution,
    };

    match file_format {
        FileFormat::CnfDimacsPLine => {
            cnf_problem(args.solver_options(), &run_options, &args.instance_path)
        }
        FileFormat::Puzzle => {
            puzzle_problem(args.solver_options(), &run_options, &args.instance_path)
        }
        FileFormat::PuzzleDirectory => {
            puzzle_batch(|| args.solver_options(), &run_options, &args.instance_path)
        }
    }
}

/// The settings which apply to every instance solved in one run.
#[derive(Debug)]
struct RunOptions {
    time_limit: Option<Duration>,
    os_signal: OsSignal,
    verify: bool,
}

impl RunOptions {
    fn termination(&self) -> Combinator<Option<TimeBudget>, OsSignal> {
        Combinator::new(
            self.time_limit.map(TimeBudget::starting_now),
            self.os_signal.clone(),
        )
    }
}

fn cnf_problem(
    solver_options: SolverOptions,
    run_options: &RunOptions,
    instance_path: impl AsRef<Path>,
) -> GourdResult<()> {
    let instance_file = File::open(instance_path.as_ref())?;
    let mut solver = parse_cnf::<SolverDimacsSink>(instance_file, solver_options)?;

    let mut termination = run_options.termination();
    let result = solver.satisfy(&mut termination);

    match &result {
        SatisfactionResult::Satisfiable(solution) => {
            println!("s SATISFIABLE");
            println!("v {}", stringify_solution(&solution.as_dimacs_model()));
        }
        SatisfactionResult::Unsatisfiable => println!("s UNSATISFIABLE"),
        SatisfactionResult::Unknown => println!("s UNKNOWN"),
    }
    solver.log_statistics();

    if run_options.verify {
        if let SatisfactionResult::Satisfiable(solution) = &result {
            checker::verify_cnf_solution(instance_path, solution)?;
            info!("The solution satisfies every clause of the instance");
        }
    }

    Ok(())
}

fn stringify_solution(model: &[i32]) -> String {
    model
        .iter()
        .map(|literal| format!("{literal} "))
        .chain(std::iter::once(String::from("0")))
        .collect::<String>()
}

/// The outcome of solving a single puzzle.
#[derive(Debug)]
struct PuzzleOutcome {
    status: SolveStatus,
    num_clauses: usize,
    num_vars: usize,
}

fn solve_puzzle(
    solver_options: SolverOptions,
    run_options: &RunOptions,
    instance_path: &Path,
    print_solution: bool,
) -> GourdResult<PuzzleOutcome> {
    let puzzle = fs::read_to_string(instance_path)?.parse::<Puzzle>()?;
    let EncodedFormula { clauses, num_vars } = encode(&puzzle);
    info!(
        "Encoded a puzzle of size {} into {} clauses over {num_vars} variables",
        puzzle.size(),
        clauses.len()
    );

    let mut solver = Solver::with_options(num_vars, solver_options);
    for clause in &clauses {
        solver.add_clause(clause)?;
    }

    let mut termination = run_options.termination();
    let result = solver.satisfy(&mut termination);

    let status = match &result {
        SatisfactionResult::Satisfiable(_) => SolveStatus::Sat,
        SatisfactionResult::Unsatisfiable => SolveStatus::Unsat,
        SatisfactionResult::Unknown => SolveStatus::Unknown,
    };

    if let SatisfactionResult::Satisfiable(solution) = result {
        let grid = decode(puzzle.size(), &solution.as_dimacs_model())?;

        if print_solution {
            println!("s SATISFIABLE");
            print!("{grid}");
        }
        if run_options.verify {
            checker::verify_puzzle_solution(&puzzle, &grid)?;
        }
    } else if print_solution {
        match status {
            SolveStatus::Unsat => println!("s UNSATISFIABLE"),
            _ => println!("s UNKNOWN"),
        }
    }
    solver.log_statistics();

    Ok(PuzzleOutcome {
        status,
        num_clauses: clauses.len(),
        num_vars,
    })
}

fn puzzle_problem(
    solver_options: SolverOptions,
    run_options: &RunOptions,
    instance_path: &Path,
) -> GourdResult<()> {
    let _ = solve_puzzle(solver_options, run_options, instance_path, true)?;
    Ok(())
}

/// Solves every `.txt` puzzle in the directory, in order of file name, and prints one line per
/// puzzle. A puzzle which fails is reported on its line and does not stop the batch.
fn puzzle_batch(
    solver_options: impl Fn() -> SolverOptions,
    run_options: &RunOptions,
    directory: &Path,
) -> GourdResult<()> {
    let mut puzzle_paths = fs::read_dir(directory)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    puzzle_paths.retain(|path| path.is_file() && FileFormat::of(path) == Some(FileFormat::Puzzle));
    puzzle_paths.sort();

    if puzzle_paths.is_empty() {
        warn!("No puzzles found in {}", directory.display());
    }
    info!("Found {} puzzles in {}", puzzle_paths.len(), directory.display());

    for path in puzzle_paths {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let start = Instant::now();
        let outcome = solve_puzzle(solver_options(), run_options, &path, false);
        let seconds = start.elapsed().as_secs_f64();

        match outcome {
            Ok(PuzzleOutcome {
                status,
                num_clauses,
                num_vars,
            }) => println!("{name} {status} {seconds:.4} {num_clauses} {num_vars}"),
            Err(e) => {
                warn!("Failed on {name}: {e}");
                println!("{name} error: {e} {seconds:.4} - -");
            }
        }
    }

    Ok(())
}
