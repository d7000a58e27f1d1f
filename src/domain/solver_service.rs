// Domain service interface for solving optimization models
// Adapters implement it; callers only see the completed model and the normalized result

use super::errors::SolverError;
use super::models::CompletedOptimizationModel;
use super::parameters::SolverParameters;
use super::scalar::Scalar;
use super::solution::SolverResult;

pub type Result<T> = std::result::Result<T, SolverError>;

/// Contract every solver adapter follows.
///
/// A call is blocking and owns whatever native engine handle it acquires until it returns.
/// Non-optimal outcomes (infeasible, unbounded, time limit) are `Ok` results; only engine
/// failures and configuration errors are `Err`.
pub trait OptimizationSolver<S: Scalar, C: Scalar> {
    /// Domain of the reported solution values
    type Value: Scalar;

    fn solve(
        &self,
        model: &CompletedOptimizationModel<S, C>,
        parameters: &SolverParameters,
    ) -> Result<SolverResult<S, Self::Value>>;

    /// Name of the engine that will run
    fn name(&self) -> &str;
}
