// COIN-OR CBC engine adapter through good_lp

use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use tracing::error;

use crate::domain::{EngineFamily, Result, SolverError, SolverParameters, SolverResultStatus};

use super::engine::{guard_native, EngineOutcome, LinearEngine};
use super::flat_model::FlatModel;
use super::normalize::{map_status, NativeStatus, RawSolution};

/// What CBC reports back through good_lp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbcOutcome {
    ProvenOptimal,
    StoppedWithSolution,
    Infeasible,
    Unbounded,
}

impl NativeStatus for CbcOutcome {
    const ENGINE: &'static str = "COIN-OR CBC";

    fn to_result_status(&self) -> std::result::Result<SolverResultStatus, String> {
        Ok(match self {
            CbcOutcome::ProvenOptimal => SolverResultStatus::Optimal,
            CbcOutcome::StoppedWithSolution => SolverResultStatus::Feasible,
            CbcOutcome::Infeasible => SolverResultStatus::Infeasible,
            CbcOutcome::Unbounded => SolverResultStatus::Unbounded,
        })
    }
}

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }

    fn run(model: &FlatModel, parameters: &SolverParameters) -> Result<EngineOutcome> {
        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = model
            .columns
            .iter()
            .map(|column| {
                let definition = variable().min(column.lower).max(column.upper);
                if column.kind.is_integral() {
                    vars.add(definition.integer())
                } else {
                    vars.add(definition)
                }
            })
            .collect();

        let mut objective: Expression = 0.into();
        for &(column, coefficient) in &model.objective {
            objective += coefficient * lp_variables[column];
        }

        let mut problem = if model.maximize {
            vars.maximise(objective).using(coin_cbc::coin_cbc)
        } else {
            vars.minimise(objective).using(coin_cbc::coin_cbc)
        };

        for row in &model.rows {
            let mut lhs: Expression = 0.into();
            for &(column, coefficient) in &row.terms {
                lhs += coefficient * lp_variables[column];
            }
            if row.lower == row.upper {
                problem = problem.with(lhs.eq(row.upper));
                continue;
            }
            if row.lower.is_finite() {
                problem = problem.with(lhs.clone().geq(row.lower));
            }
            if row.upper.is_finite() {
                problem = problem.with(lhs.leq(row.upper));
            }
        }

        problem.set_parameter("log", if parameters.enable_solver_output { "1" } else { "0" });
        for (key, value) in parameters.to_solver_specific_parameters(EngineFamily::CoinCbc) {
            problem.set_parameter(&key, &value);
        }

        let native = match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = lp_variables.iter().map(|&v| solution.value(v)).collect();
                let raw_model = solution.model();
                let objective_value = model.objective_value(&values);
                let (outcome, best_bound) = if raw_model.is_proven_optimal() {
                    (CbcOutcome::ProvenOptimal, Some(objective_value))
                } else {
                    (
                        CbcOutcome::StoppedWithSolution,
                        Some(raw_model.best_possible_value() + model.offset),
                    )
                };
                let raw = RawSolution {
                    objective_value: Some(objective_value),
                    best_bound,
                    values,
                };
                return Ok(EngineOutcome::new(map_status(&outcome)?, Some(raw)));
            }
            Err(ResolutionError::Infeasible) => CbcOutcome::Infeasible,
            Err(ResolutionError::Unbounded) => CbcOutcome::Unbounded,
            Err(e) => {
                error!(engine = CbcOutcome::ENGINE, error = %e, "CBC failed");
                return Err(SolverError::ProgramNotSolved(e.to_string()));
            }
        };
        Ok(EngineOutcome::without_solution(map_status(&native)?))
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearEngine for CoinCbcSolver {
    fn family(&self) -> EngineFamily {
        EngineFamily::CoinCbc
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn solve_flat(&self, model: &FlatModel, parameters: &SolverParameters) -> Result<EngineOutcome> {
        guard_native(self.name(), || Self::run(model, parameters))
    }
}
