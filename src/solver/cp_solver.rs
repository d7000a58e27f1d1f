// Constraint programming adapter for integer models

use std::time::Duration;

use tracing::{debug, info};

use crate::domain::{
    CompletedOptimizationModel, EngineFamily, Integer, OptimizationSolver, Result, SolutionValues,
    SolverError, SolverParameters, SolverResult, Variable, VariableKind,
};
use crate::infrastructure::mps::ModelInMpsFormat;

use super::cp_search::{CpProblem, CpSearch, CpStatus};
use super::flat_model::FlatModel;
use super::normalize::{normalize, RawSolution};

/// Receives every solution the search reports while it is running
pub trait CpSolutionCallback {
    fn on_solution(&mut self, values: &SolutionValues<Integer, Integer>);
}

impl<F> CpSolutionCallback for F
where
    F: FnMut(&SolutionValues<Integer, Integer>),
{
    fn on_solution(&mut self, values: &SolutionValues<Integer, Integer>) {
        self(values)
    }
}

/// Solver for models whose variables, coefficients and bounds are all integers
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintProgrammingSolver;

impl ConstraintProgrammingSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solves `model`, pushing solutions to `callback` as they are found.
    ///
    /// With `optimize` the objective is maximized or minimized and each improving solution is
    /// reported. Without it the objective is ignored and every feasible solution is reported.
    pub fn solve_with_callback(
        &self,
        model: &CompletedOptimizationModel<Integer, Integer>,
        parameters: &SolverParameters,
        mut callback: Option<&mut dyn CpSolutionCallback>,
        optimize: bool,
    ) -> Result<SolverResult<Integer, Integer>> {
        if let Some(variable) = model
            .variables()
            .iter()
            .find(|v| v.kind() == VariableKind::Continuous)
        {
            return Err(SolverError::UnsupportedVariable {
                name: variable.name().to_string(),
                kind: variable.kind().to_string(),
            });
        }

        let (flat, variables) = FlatModel::from_completed(model)?;
        if let Some(path) = &parameters.export_model_file_path {
            ModelInMpsFormat::from_flat(&flat)?.write_to(path)?;
        }
        debug!(
            parameters = %parameters.to_parameter_string(EngineFamily::CpSat),
            enumerate = callback.is_some(),
            "constraint programming parameters"
        );

        let problem = match CpProblem::from_flat(&flat) {
            Ok(problem) => problem,
            Err(reason) => {
                info!(reason = %reason, "model rejected by the constraint programming engine");
                return normalize(&CpStatus::ModelInvalid, None, &variables);
            }
        };

        let time_limit = parameters
            .time_limit_in_milliseconds
            .map(|ms| Duration::from_millis(u64::from(ms)));
        let mut report = |values: &[i64]| {
            if let Some(callback) = callback.as_mut() {
                let solution = to_solution_values(&variables, values);
                callback.on_solution(&solution);
            }
        };
        let outcome = CpSearch::new(&problem, optimize, time_limit, &mut report).run();

        let raw = outcome.solution.map(|values| RawSolution {
            values: values.into_iter().map(|v| v as f64).collect(),
            objective_value: outcome.objective_value,
            best_bound: outcome.best_bound,
        });
        normalize(&outcome.status, raw, &variables)
    }
}

fn to_solution_values(
    variables: &[Variable<Integer>],
    values: &[i64],
) -> SolutionValues<Integer, Integer> {
    variables
        .iter()
        .cloned()
        .zip(values.iter().map(|&v| Integer(v)))
        .collect()
}

impl OptimizationSolver<Integer, Integer> for ConstraintProgrammingSolver {
    type Value = Integer;

    fn solve(
        &self,
        model: &CompletedOptimizationModel<Integer, Integer>,
        parameters: &SolverParameters,
    ) -> Result<SolverResult<Integer, Integer>> {
        self.solve_with_callback(model, parameters, None, true)
    }

    fn name(&self) -> &str {
        "constraint programming"
    }
}
