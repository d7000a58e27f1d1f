// Domain layer: scalar algebra, model building and the solver contract
pub mod domain;

// Application layer: job service wire format mapping
pub mod application;

// Infrastructure layer: MPS text import/export
pub mod infrastructure;

// Solver adapters: concrete implementations of OptimizationSolver
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Binary, CompletedOptimizationModel, Constraint, Integer, Interval, ModelError,
    ObjectiveFunction, OptimizationModel, OptimizationSolver, Real, Scalar, SolutionValues,
    SolverError, SolverParameters, SolverResult, SolverResultStatus, SolverType, Variable,
    VariableKind, WeightedSum,
};

pub use infrastructure::ModelInMpsFormat;

pub use solver::{ConstraintProgrammingSolver, LinearProgramSolver, SolverFactory};
