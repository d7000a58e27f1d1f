use std::sync::Arc;

use tracing::warn;

use crate::domain::{Result, SolverError, SolverType};

use super::cp_solver::ConstraintProgrammingSolver;
use super::engine::LinearEngine;
use super::linear_solver::LinearProgramSolver;

/// Engine used when the requested one is not available
pub const FALLBACK_SOLVER: SolverType = SolverType::Highs;

/// Factory for creating solver instances
pub struct SolverFactory;

impl SolverFactory {
    /// Linear/MIP solver for `solver_type`
    pub fn linear(solver_type: SolverType) -> LinearProgramSolver {
        LinearProgramSolver::new(solver_type)
    }

    /// Constraint programming solver for integer models
    pub fn constraint_programming() -> ConstraintProgrammingSolver {
        ConstraintProgrammingSolver::new()
    }

    /// Whether an engine for `solver_type` is linked into this build
    pub fn is_available(solver_type: SolverType) -> bool {
        Self::engine_for(solver_type).is_some()
    }

    fn engine_for(solver_type: SolverType) -> Option<Arc<dyn LinearEngine>> {
        match solver_type {
            #[cfg(feature = "highs")]
            SolverType::Highs => Some(Arc::new(super::highs_solver::HighsSolver::new())),
            #[cfg(feature = "coin_cbc")]
            SolverType::CoinCbc => Some(Arc::new(super::coin_cbc_solver::CoinCbcSolver::new())),
            _ => None,
        }
    }

    /// Engine for `requested`, or the fallback engine.
    ///
    /// The flag is true when the fallback was substituted. Only one substitution is tried.
    pub fn resolve(requested: SolverType) -> Result<(Arc<dyn LinearEngine>, bool)> {
        if let Some(engine) = Self::engine_for(requested) {
            return Ok((engine, false));
        }
        match Self::engine_for(FALLBACK_SOLVER) {
            Some(engine) => {
                warn!(
                    expected = %requested,
                    fallback = %FALLBACK_SOLVER,
                    "requested solver unavailable, switching to default solver"
                );
                Ok((engine, true))
            }
            None => Err(SolverError::SolverNotSupported {
                expected: requested.to_string(),
                fallback: FALLBACK_SOLVER.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commercial_engines_are_never_linked() {
        assert!(!SolverFactory::is_available(SolverType::Gurobi));
        assert!(!SolverFactory::is_available(SolverType::Scip));
    }

    #[cfg(feature = "highs")]
    #[test]
    fn unavailable_engine_falls_back_once() {
        let (engine, switched) = SolverFactory::resolve(SolverType::Gurobi).unwrap();
        assert!(switched);
        assert_eq!(engine.name(), "HiGHS");

        let (_, switched) = SolverFactory::resolve(SolverType::Highs).unwrap();
        assert!(!switched);
    }

    #[cfg(not(feature = "highs"))]
    #[test]
    fn missing_fallback_names_both_engines() {
        let err = SolverFactory::resolve(SolverType::Gurobi).err().unwrap();
        assert!(matches!(
            err,
            SolverError::SolverNotSupported { ref expected, ref fallback }
                if expected == "Gurobi" && fallback == "HiGHS"
        ));
    }
}
