// HiGHS engine adapter
// Translates the flattened model into a HiGHS row problem and maps its model status

use highs::{HighsModelStatus, Model, RowProblem, Sense};
use tracing::{debug, warn};

use crate::domain::{
    parameter_key, EngineFamily, ParameterKey, Result, SolverError, SolverParameters,
    SolverResultStatus,
};

use super::engine::{guard_native, EngineOutcome, LinearEngine};
use super::flat_model::FlatModel;
use super::normalize::{map_status, NativeStatus, RawSolution};

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }

    fn build(model: &FlatModel, parameters: &SolverParameters, presolve: bool) -> Model {
        let mut pb = RowProblem::default();
        let objective = model.objective_coefficients();

        let cols: Vec<_> = model
            .columns
            .iter()
            .zip(&objective)
            .map(|(column, &cost)| {
                if column.kind.is_integral() {
                    pb.add_integer_column(cost, column.lower..=column.upper)
                } else {
                    pb.add_column(cost, column.lower..=column.upper)
                }
            })
            .collect();

        for row in &model.rows {
            let terms: Vec<_> = row
                .terms
                .iter()
                .map(|&(column, coefficient)| (cols[column], coefficient))
                .collect();
            pb.add_row(row.lower..=row.upper, &terms);
        }

        let sense = if model.maximize {
            Sense::Maximise
        } else {
            Sense::Minimise
        };
        let mut highs = pb.optimise(sense);

        highs.set_option("output_flag", parameters.enable_solver_output);
        if let Some(seconds) = parameters.time_limit_seconds() {
            highs.set_option(highs_key(ParameterKey::TimeLimit), seconds);
        }
        if let Some(threads) = parameters.threads() {
            highs.set_option(highs_key(ParameterKey::NumberOfThreads), threads as i32);
        }
        if let Some(gap) = parameters.relative_gap {
            highs.set_option(highs_key(ParameterKey::RelativeGap), gap);
        }
        if !presolve {
            highs.set_option("presolve", "off");
        }
        for (key, value) in &parameters.additional_solver_specific_parameters {
            set_raw_option(&mut highs, key, value);
        }
        highs
    }

    fn run(model: &FlatModel, parameters: &SolverParameters, presolve: bool) -> Result<EngineOutcome> {
        let solved = Self::build(model, parameters, presolve)
            .try_solve()
            .map_err(|status| SolverError::ProgramNotSolved(format!("HiGHS failed: {status:?}")))?;

        let native = solved.status();
        let status = map_status(&native)?;
        if !status.has_solution() {
            return Ok(EngineOutcome::without_solution(status));
        }

        let values = solved.get_solution().columns().to_vec();
        let objective_value = model.objective_value(&values);
        let best_bound = if model.has_integer_columns() {
            // HiGHS never sees the offset, so its gap is relative to the objective without it
            let gap = solved.mip_gap();
            debug!(mip_gap = gap, "HiGHS MIP gap");
            bound_from_gap(objective_value - model.offset, gap, model.maximize)
                .map(|bound| bound + model.offset)
        } else if status == SolverResultStatus::Optimal {
            Some(objective_value)
        } else {
            None
        };
        Ok(EngineOutcome::new(
            status,
            Some(RawSolution {
                values,
                objective_value: Some(objective_value),
                best_bound,
            }),
        ))
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearEngine for HighsSolver {
    fn family(&self) -> EngineFamily {
        EngineFamily::Highs
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn solve_flat(&self, model: &FlatModel, parameters: &SolverParameters) -> Result<EngineOutcome> {
        guard_native(self.name(), || {
            let outcome = Self::run(model, parameters, true)?;
            if outcome.status != SolverResultStatus::InfOrUnbound {
                return Ok(outcome);
            }
            // Presolve cannot always tell the two apart; the plain solve can.
            debug!("re-solving without presolve to separate infeasible from unbounded");
            Self::run(model, parameters, false)
        })
    }
}

fn highs_key(key: ParameterKey) -> &'static str {
    parameter_key(EngineFamily::Highs, key)
}

/// Dual bound implied by a relative MIP gap `|bound − objective| / |objective|`.
///
/// `None` when HiGHS reports no usable gap.
fn bound_from_gap(objective: f64, gap: f64, maximize: bool) -> Option<f64> {
    if gap.is_nan() || gap < 0.0 {
        return None;
    }
    if gap.is_infinite() {
        return Some(if maximize { f64::INFINITY } else { f64::NEG_INFINITY });
    }
    let slack = gap * objective.abs();
    Some(if maximize { objective + slack } else { objective - slack })
}

/// Typed option from its textual form
fn set_raw_option(highs: &mut Model, key: &str, value: &str) {
    if let Ok(flag) = value.parse::<bool>() {
        highs.set_option(key, flag);
    } else if let Ok(int) = value.parse::<i32>() {
        highs.set_option(key, int);
    } else if let Ok(float) = value.parse::<f64>() {
        highs.set_option(key, float);
    } else {
        highs.set_option(key, value);
    }
}

impl NativeStatus for HighsModelStatus {
    const ENGINE: &'static str = "HiGHS";

    fn to_result_status(&self) -> std::result::Result<SolverResultStatus, String> {
        #[allow(unreachable_patterns)]
        let status = match self {
            HighsModelStatus::NotSet => SolverResultStatus::NotSolved,
            HighsModelStatus::LoadError | HighsModelStatus::ModelError => {
                SolverResultStatus::ModelInvalid
            }
            HighsModelStatus::PresolveError
            | HighsModelStatus::SolveError
            | HighsModelStatus::PostsolveError => SolverResultStatus::Abnormal,
            HighsModelStatus::ModelEmpty => SolverResultStatus::Optimal,
            HighsModelStatus::Infeasible => SolverResultStatus::Infeasible,
            HighsModelStatus::UnboundedOrInfeasible => SolverResultStatus::InfOrUnbound,
            HighsModelStatus::Unbounded => SolverResultStatus::Unbounded,
            HighsModelStatus::Optimal => SolverResultStatus::Optimal,
            HighsModelStatus::ObjectiveBound | HighsModelStatus::ObjectiveTarget => {
                SolverResultStatus::Feasible
            }
            HighsModelStatus::ReachedTimeLimit => SolverResultStatus::Timelimit,
            HighsModelStatus::ReachedIterationLimit => SolverResultStatus::NotSolved,
            HighsModelStatus::Unknown => SolverResultStatus::UnknownStatus,
            other => {
                warn!(status = ?other, "HiGHS status outside the mapping table");
                return Err(format!("{other:?}"));
            }
        };
        Ok(status)
    }
}
