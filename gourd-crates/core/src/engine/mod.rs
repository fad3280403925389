mod cdcl_solver;
pub(crate) mod conflict_analysis;
pub(crate) mod preprocessing;
pub(crate) mod propagation;
mod restart_strategy;
pub(crate) mod sat;
mod solver_statistics;
pub mod termination;

pub(crate) use cdcl_solver::CdclExecutionFlag;
pub(crate) use cdcl_solver::CdclSolver;
pub use cdcl_solver::SolverOptions;
pub use propagation::PropagatorKind;
pub use restart_strategy::RestartOptions;
