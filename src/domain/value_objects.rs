// Domain value objects shared by the model, the adapters and the wire mapping

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parameter_keys::EngineFamily;

/// Kind of decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    /// Continuous real number (x ∈ ℝ)
    Continuous,
    /// Integer number (x ∈ ℤ)
    Integer,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

impl VariableKind {
    pub fn is_integral(self) -> bool {
        matches!(self, VariableKind::Integer | VariableKind::Binary)
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Continuous => write!(f, "Continuous"),
            VariableKind::Integer => write!(f, "Integer"),
            VariableKind::Binary => write!(f, "Binary"),
        }
    }
}

/// Engine requested for linear and mixed-integer models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverType {
    /// HiGHS, also the fallback engine
    Highs,
    /// COIN-OR CBC
    CoinCbc,
    Scip,
    Gurobi,
}

impl SolverType {
    pub fn family(self) -> EngineFamily {
        match self {
            SolverType::Highs => EngineFamily::Highs,
            SolverType::CoinCbc => EngineFamily::CoinCbc,
            SolverType::Scip => EngineFamily::Scip,
            SolverType::Gurobi => EngineFamily::Gurobi,
        }
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family())
    }
}

/// Uniform result status every engine status is mapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverResultStatus {
    /// Proven optimal solution found
    Optimal,
    /// Feasible solution found, optimality not proven
    Feasible,
    Infeasible,
    Unbounded,
    /// Engine stopped abnormally
    Abnormal,
    NotSolved,
    ModelIsValid,
    CancelledByUser,
    UnknownStatus,
    ModelInvalid,
    InvalidSolverParameters,
    SolverTypeUnavailable,
    IncompatibleOptions,
    /// Infeasible or unbounded, the engine could not tell which
    InfOrUnbound,
    /// Time limit reached without a solution
    Timelimit,
}

impl SolverResultStatus {
    pub const ALL: [SolverResultStatus; 15] = [
        SolverResultStatus::Optimal,
        SolverResultStatus::Feasible,
        SolverResultStatus::Infeasible,
        SolverResultStatus::Unbounded,
        SolverResultStatus::Abnormal,
        SolverResultStatus::NotSolved,
        SolverResultStatus::ModelIsValid,
        SolverResultStatus::CancelledByUser,
        SolverResultStatus::UnknownStatus,
        SolverResultStatus::ModelInvalid,
        SolverResultStatus::InvalidSolverParameters,
        SolverResultStatus::SolverTypeUnavailable,
        SolverResultStatus::IncompatibleOptions,
        SolverResultStatus::InfOrUnbound,
        SolverResultStatus::Timelimit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SolverResultStatus::Optimal => "Optimal",
            SolverResultStatus::Feasible => "Feasible",
            SolverResultStatus::Infeasible => "Infeasible",
            SolverResultStatus::Unbounded => "Unbounded",
            SolverResultStatus::Abnormal => "Abnormal",
            SolverResultStatus::NotSolved => "NotSolved",
            SolverResultStatus::ModelIsValid => "ModelIsValid",
            SolverResultStatus::CancelledByUser => "CancelledByUser",
            SolverResultStatus::UnknownStatus => "UnknownStatus",
            SolverResultStatus::ModelInvalid => "ModelInvalid",
            SolverResultStatus::InvalidSolverParameters => "InvalidSolverParameters",
            SolverResultStatus::SolverTypeUnavailable => "SolverTypeUnavailable",
            SolverResultStatus::IncompatibleOptions => "IncompatibleOptions",
            SolverResultStatus::InfOrUnbound => "InfOrUnbound",
            SolverResultStatus::Timelimit => "Timelimit",
        }
    }

    /// Statuses that carry solution values and an objective value
    pub fn has_solution(self) -> bool {
        matches!(self, SolverResultStatus::Optimal | SolverResultStatus::Feasible)
    }
}

impl fmt::Display for SolverResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status name does not match any variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown solver result status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for SolverResultStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverResultStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_round_trip() {
        for status in SolverResultStatus::ALL {
            assert_eq!(status.to_string().parse::<SolverResultStatus>(), Ok(status));
        }
        assert_eq!("optimal".parse(), Ok(SolverResultStatus::Optimal));
        assert!("Solved".parse::<SolverResultStatus>().is_err());
    }

    #[test]
    fn only_optimal_and_feasible_carry_solutions() {
        let with_solution: Vec<_> = SolverResultStatus::ALL
            .into_iter()
            .filter(|s| s.has_solution())
            .collect();
        assert_eq!(
            with_solution,
            vec![SolverResultStatus::Optimal, SolverResultStatus::Feasible]
        );
    }

    #[test]
    fn binary_and_integer_are_integral() {
        assert!(VariableKind::Binary.is_integral());
        assert!(VariableKind::Integer.is_integral());
        assert!(!VariableKind::Continuous.is_integral());
    }
}
