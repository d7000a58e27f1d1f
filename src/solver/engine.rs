// Seam between the typed adapters and the concrete engines
// Engines only see the flattened model and report a mapped status plus raw values

use crate::domain::{EngineFamily, Result, SolverParameters, SolverResultStatus};

use super::flat_model::FlatModel;
use super::normalize::RawSolution;

/// Mapped status and, when the engine produced one, the raw solution
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutcome {
    pub status: SolverResultStatus,
    pub raw: Option<RawSolution>,
}

impl EngineOutcome {
    pub fn new(status: SolverResultStatus, raw: Option<RawSolution>) -> Self {
        Self { status, raw }
    }

    pub fn without_solution(status: SolverResultStatus) -> Self {
        Self { status, raw: None }
    }
}

/// Linear / mixed-integer engine.
///
/// Implementations acquire their native handle inside `solve_flat` and release it before
/// returning, on every path.
pub trait LinearEngine: Send + Sync {
    fn family(&self) -> EngineFamily;

    fn name(&self) -> &str;

    fn solve_flat(&self, model: &FlatModel, parameters: &SolverParameters) -> Result<EngineOutcome>;
}

/// Runs `f`, turning a panic from native bindings into an error
pub(crate) fn guard_native<T>(engine: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
                .unwrap_or_else(|| "native engine panicked".to_string());
            tracing::error!(engine, error = %message, "native engine failure");
            Err(crate::domain::SolverError::ProgramNotSolved(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SolverError;

    #[test]
    fn panics_become_program_not_solved() {
        let result: Result<()> = guard_native("test", || panic!("boom"));
        match result {
            Err(SolverError::ProgramNotSolved(message)) => assert_eq!(message, "boom"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(guard_native("test", || Ok(3)).unwrap(), 3);
    }
}
