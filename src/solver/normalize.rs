// Result normalization shared by every adapter

use tracing::{debug, error};

use crate::domain::{
    Result, Scalar, SolutionValues, SolverError, SolverResult, SolverResultStatus, Variable,
};

/// Native status of one engine, mapped onto the uniform status set.
///
/// `Err` carries the native status name and means the mapping table is out of date.
pub trait NativeStatus: std::fmt::Debug {
    const ENGINE: &'static str;

    fn to_result_status(&self) -> std::result::Result<SolverResultStatus, String>;
}

/// Raw outcome reported by an engine
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    /// Value per column, same order as the flattened variables
    pub values: Vec<f64>,
    pub objective_value: Option<f64>,
    pub best_bound: Option<f64>,
}

/// Relative gap `|bound − objective| / |objective|`.
///
/// Zero when both are zero, infinite when only the objective is zero.
pub fn optimality_gap(objective_value: f64, best_bound: f64) -> f64 {
    if objective_value == 0.0 && best_bound == 0.0 {
        return 0.0;
    }
    if objective_value == 0.0 {
        return f64::INFINITY;
    }
    (best_bound - objective_value).abs() / objective_value.abs()
}

pub fn map_status<N: NativeStatus>(native: &N) -> Result<SolverResultStatus> {
    let status = native.to_result_status().map_err(|status| {
        error!(engine = N::ENGINE, status = %status, "unmapped solver status");
        SolverError::UnmappedStatus {
            engine: N::ENGINE,
            status,
        }
    })?;
    debug!(engine = N::ENGINE, native = ?native, status = %status, "mapped solver status");
    Ok(status)
}

/// Builds the uniform result. Only optimal and feasible outcomes keep values.
pub fn normalize<S: Scalar, V: Scalar, N: NativeStatus>(
    native: &N,
    raw: Option<RawSolution>,
    variables: &[Variable<S>],
) -> Result<SolverResult<S, V>> {
    let status = map_status(native)?;
    into_result(status, raw, variables)
}

/// Builds the uniform result from an already mapped status.
///
/// The gap is only reported when the engine supplied a bound.
pub fn into_result<S: Scalar, V: Scalar>(
    status: SolverResultStatus,
    raw: Option<RawSolution>,
    variables: &[Variable<S>],
) -> Result<SolverResult<S, V>> {
    if !status.has_solution() {
        return Ok(SolverResult::unsolved(status));
    }

    let raw = raw.ok_or_else(not_solved)?;
    let objective_value = raw.objective_value.ok_or_else(not_solved)?;
    let gap = raw
        .best_bound
        .map(|best_bound| optimality_gap(objective_value, best_bound));

    let values: SolutionValues<S, V> = variables
        .iter()
        .cloned()
        .zip(raw.values.iter().map(|&v| V::from_f64(v)))
        .collect();

    Ok(SolverResult::solved(status, values, objective_value, gap))
}

fn not_solved() -> SolverError {
    SolverError::ProgramNotSolved("Mathematical program could not be solved.".to_string())
}
