// Solver adapters: concrete implementations of OptimizationSolver

pub mod cp_search;
pub mod cp_solver;
pub mod engine;
pub mod factory;
pub mod flat_model;
pub mod linear_solver;
pub mod normalize;

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc_solver;
#[cfg(feature = "highs")]
pub mod highs_solver;

#[cfg(feature = "coin_cbc")]
pub use coin_cbc_solver::CoinCbcSolver;
pub use cp_solver::{ConstraintProgrammingSolver, CpSolutionCallback};
pub use engine::{EngineOutcome, LinearEngine};
pub use factory::{SolverFactory, FALLBACK_SOLVER};
pub use flat_model::{Column, FlatModel, Row};
#[cfg(feature = "highs")]
pub use highs_solver::HighsSolver;
pub use linear_solver::LinearProgramSolver;
pub use normalize::{optimality_gap, RawSolution};
