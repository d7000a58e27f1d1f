use std::collections::BTreeMap;
use std::fmt;

use super::scalar::Scalar;
use super::value_objects::SolverResultStatus;
use super::variable::Variable;

/// Solution values keyed by the model's variables
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionValues<S: Scalar, V: Scalar> {
    values: BTreeMap<Variable<S>, V>,
}

impl<S: Scalar, V: Scalar> SolutionValues<S, V> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, variable: Variable<S>, value: V) {
        self.values.insert(variable, value);
    }

    pub fn get(&self, variable: &Variable<S>) -> Option<V> {
        self.values.get(variable).copied()
    }

    /// Lookup by name, for variables that were reconstructed from text
    pub fn get_by_name(&self, name: &str) -> Option<V> {
        self.values
            .iter()
            .find(|(variable, _)| variable.name() == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable<S>, &V)> {
        self.values.iter()
    }
}

impl<S: Scalar, V: Scalar> Default for SolutionValues<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar, V: Scalar> FromIterator<(Variable<S>, V)> for SolutionValues<S, V> {
    fn from_iter<I: IntoIterator<Item = (Variable<S>, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Normalized outcome of one solve call
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult<S: Scalar, V: Scalar> {
    solution_values: SolutionValues<S, V>,
    objective_value: Option<f64>,
    is_feasible: bool,
    is_optimal: bool,
    optimality_gap: Option<f64>,
    status: SolverResultStatus,
    switched_to_default_solver: bool,
}

impl<S: Scalar, V: Scalar> SolverResult<S, V> {
    /// Optimal or feasible outcome carrying values. The gap is `None` when no bound is known.
    pub(crate) fn solved(
        status: SolverResultStatus,
        solution_values: SolutionValues<S, V>,
        objective_value: f64,
        optimality_gap: Option<f64>,
    ) -> Self {
        Self {
            solution_values,
            objective_value: Some(objective_value),
            is_feasible: true,
            is_optimal: status == SolverResultStatus::Optimal,
            optimality_gap,
            status,
            switched_to_default_solver: false,
        }
    }

    /// Outcome without a solution
    pub(crate) fn unsolved(status: SolverResultStatus) -> Self {
        Self {
            solution_values: SolutionValues::new(),
            objective_value: None,
            is_feasible: false,
            is_optimal: false,
            optimality_gap: None,
            status,
            switched_to_default_solver: false,
        }
    }

    /// Raw record as received over the wire
    pub(crate) fn from_parts(
        solution_values: SolutionValues<S, V>,
        objective_value: Option<f64>,
        is_feasible: bool,
        is_optimal: bool,
        optimality_gap: Option<f64>,
        status: SolverResultStatus,
    ) -> Self {
        Self {
            solution_values,
            objective_value,
            is_feasible,
            is_optimal,
            optimality_gap,
            status,
            switched_to_default_solver: false,
        }
    }

    pub(crate) fn with_switched_to_default_solver(mut self, switched: bool) -> Self {
        self.switched_to_default_solver = switched;
        self
    }

    pub fn solution_values(&self) -> &SolutionValues<S, V> {
        &self.solution_values
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    pub fn is_feasible(&self) -> bool {
        self.is_feasible
    }

    pub fn is_optimal(&self) -> bool {
        self.is_optimal
    }

    pub fn optimality_gap(&self) -> Option<f64> {
        self.optimality_gap
    }

    pub fn status(&self) -> SolverResultStatus {
        self.status
    }

    pub fn switched_to_default_solver(&self) -> bool {
        self.switched_to_default_solver
    }
}

impl<S: Scalar, V: Scalar> fmt::Display for SolverResult<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objective = self
            .objective_value
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        let gap = self
            .optimality_gap
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(
            f,
            "Status: {}, ObjectiveValue: {}, IsFeasible: {}, IsOptimal: {}, OptimalityGap: {}",
            self.status, objective, self.is_feasible, self.is_optimal, gap
        )?;
        if self.switched_to_default_solver {
            write!(f, ", SwitchedToDefaultSolver: true")?;
        }
        if !self.solution_values.is_empty() {
            write!(f, "\nVariable Values: ")?;
            for (i, (variable, value)) in self.solution_values.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}", variable.name(), value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interval::Interval;
    use crate::domain::scalar::{Integer, Real};
    use crate::domain::value_objects::VariableKind;

    #[test]
    fn unsolved_results_are_empty() {
        let result = SolverResult::<Integer, Real>::unsolved(SolverResultStatus::Infeasible);
        assert!(!result.is_feasible());
        assert!(!result.is_optimal());
        assert!(result.solution_values().is_empty());
        assert_eq!(result.objective_value(), None);
        assert_eq!(result.optimality_gap(), None);
        assert!(!result.switched_to_default_solver());
    }

    #[test]
    fn values_can_be_read_by_name() {
        let x = Variable::new(
            "x",
            Interval::new(Integer(0), Integer(3)).unwrap(),
            VariableKind::Integer,
        );
        let values: SolutionValues<Integer, Real> = [(x.clone(), Real(2.0))].into_iter().collect();
        let result = SolverResult::solved(SolverResultStatus::Feasible, values, 4.0, Some(0.5));

        assert!(result.is_feasible());
        assert!(!result.is_optimal());
        assert_eq!(result.solution_values().get(&x), Some(Real(2.0)));
        assert_eq!(result.solution_values().get_by_name("x"), Some(Real(2.0)));
        assert_eq!(result.solution_values().get_by_name("y"), None);
        assert!(result.to_string().contains("x=2"));
    }
}
