// Builders composing terms and weighted sums into constraints and objectives

use super::errors::{ModelError, ModelResult};
use super::interval::Interval;
use super::models::{Constraint, ObjectiveFunction};
use super::scalar::Scalar;
use super::variable::Variable;
use super::weighted_sum::WeightedSum;

/// Accumulates single terms and whole sums, merged on [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct WeightedSumBuilder<S: Scalar, C: Scalar> {
    terms: Vec<(C, Variable<S>)>,
    sums: Vec<WeightedSum<S, C>>,
}

impl<S: Scalar, C: Scalar> WeightedSumBuilder<S, C> {
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            sums: Vec::new(),
        }
    }

    pub fn add_term(mut self, coefficient: C, variable: &Variable<S>) -> Self {
        self.terms.push((coefficient, variable.clone()));
        self
    }

    /// Adds `Σ weights[i] · variables[i]`; both slices must have the same length
    pub fn add_terms(mut self, variables: &[Variable<S>], weights: &[C]) -> ModelResult<Self> {
        if variables.len() != weights.len() {
            return Err(ModelError::NumberOfWeightsNotEqualToNumberOfVariables {
                variables: variables.len(),
                weights: weights.len(),
            });
        }
        self.terms.extend(
            weights
                .iter()
                .copied()
                .zip(variables.iter().cloned()),
        );
        Ok(self)
    }

    pub fn add_weighted_sum(mut self, sum: WeightedSum<S, C>) -> Self {
        self.sums.push(sum);
        self
    }

    /// Folds the single terms first, then every accumulated sum
    pub fn build(self) -> WeightedSum<S, C> {
        let mut result = WeightedSum::new();
        for (coefficient, variable) in self.terms {
            result.add(variable, coefficient);
        }
        for sum in &self.sums {
            result.add_sum(sum);
        }
        result
    }
}

impl<S: Scalar, C: Scalar> Default for WeightedSumBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`Constraint`] `lower ≤ Σ terms ≤ upper`
#[derive(Debug, Clone)]
pub struct ConstraintBuilder<S: Scalar, C: Scalar> {
    sum: WeightedSumBuilder<S, C>,
    name: Option<String>,
}

impl<S: Scalar, C: Scalar> ConstraintBuilder<S, C> {
    pub fn new() -> Self {
        Self {
            sum: WeightedSumBuilder::new(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_term(mut self, coefficient: C, variable: &Variable<S>) -> Self {
        self.sum = self.sum.add_term(coefficient, variable);
        self
    }

    /// Fails when the number of weights differs from the number of variables
    pub fn add_terms(mut self, variables: &[Variable<S>], weights: &[C]) -> ModelResult<Self> {
        self.sum = self.sum.add_terms(variables, weights)?;
        Ok(self)
    }

    pub fn add_weighted_sum(mut self, sum: WeightedSum<S, C>) -> Self {
        self.sum = self.sum.add_weighted_sum(sum);
        self
    }

    pub fn build(self, interval: Interval<C>) -> Constraint<S, C> {
        Constraint::new(self.sum.build(), interval, self.name)
    }
}

impl<S: Scalar, C: Scalar> Default for ConstraintBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an [`ObjectiveFunction`]. Maximizes without offset unless told otherwise.
#[derive(Debug, Clone)]
pub struct ObjectiveFunctionBuilder<S: Scalar, C: Scalar> {
    sum: WeightedSumBuilder<S, C>,
    maximize: bool,
    offset: Option<C>,
}

impl<S: Scalar, C: Scalar> ObjectiveFunctionBuilder<S, C> {
    pub fn new() -> Self {
        Self {
            sum: WeightedSumBuilder::new(),
            maximize: true,
            offset: None,
        }
    }

    pub fn add_term(mut self, coefficient: C, variable: &Variable<S>) -> Self {
        self.sum = self.sum.add_term(coefficient, variable);
        self
    }

    pub fn add_terms(mut self, variables: &[Variable<S>], weights: &[C]) -> ModelResult<Self> {
        self.sum = self.sum.add_terms(variables, weights)?;
        Ok(self)
    }

    pub fn add_weighted_sum(mut self, sum: WeightedSum<S, C>) -> Self {
        self.sum = self.sum.add_weighted_sum(sum);
        self
    }

    pub fn maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    pub fn minimize(self) -> Self {
        self.maximize(false)
    }

    pub fn with_offset(mut self, offset: C) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn build(self) -> ObjectiveFunction<S, C> {
        ObjectiveFunction::new(self.sum.build(), self.maximize, self.offset)
    }
}

impl<S: Scalar, C: Scalar> Default for ObjectiveFunctionBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::OptimizationModel;
    use crate::domain::scalar::{Integer, Real};

    fn model_with_three() -> (OptimizationModel<Integer, Real>, Vec<Variable<Integer>>) {
        let mut model = OptimizationModel::new();
        let vars = ["a", "b", "c"]
            .iter()
            .map(|name| {
                model
                    .new_integer_variable(Interval::new(Integer(0), Integer(5)).unwrap(), *name)
                    .unwrap()
            })
            .collect();
        (model, vars)
    }

    #[test]
    fn mismatched_weights_report_both_lengths() {
        let (model, vars) = model_with_three();
        let err = model
            .create_constraint_builder()
            .add_terms(&vars, &[Real(1.0), Real(2.0)])
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::NumberOfWeightsNotEqualToNumberOfVariables {
                variables: 3,
                weights: 2
            }
        );
        let message = err.to_string();
        assert!(message.contains('3') && message.contains('2'));
    }

    #[test]
    fn pairs_and_sums_are_merged() {
        let (model, vars) = model_with_three();
        let inner = model
            .create_weighted_sum_builder()
            .add_terms(&vars, &[Real(1.0), Real(2.0), Real(3.0)])
            .unwrap()
            .build();
        let sum = model
            .create_weighted_sum_builder()
            .add_term(Real(2.0), &vars[0])
            .add_term(Real(2.0), &vars[1])
            .add_term(Real(2.0), &vars[2])
            .add_weighted_sum(inner)
            .build();

        assert_eq!(sum.coefficient(&vars[0]), Some(Real(3.0)));
        assert_eq!(sum.coefficient(&vars[1]), Some(Real(4.0)));
        assert_eq!(sum.coefficient(&vars[2]), Some(Real(5.0)));
    }

    #[test]
    fn objective_defaults_to_maximize_without_offset() {
        let (model, vars) = model_with_three();
        let objective = model
            .create_objective_function_builder()
            .add_term(Real(1.0), &vars[0])
            .build();
        assert!(objective.maximize());
        assert_eq!(objective.offset(), None);

        let objective = model
            .create_objective_function_builder()
            .add_term(Real(1.0), &vars[0])
            .minimize()
            .with_offset(Real(4.0))
            .build();
        assert!(!objective.maximize());
        assert_eq!(objective.offset(), Some(Real(4.0)));
    }

    #[test]
    fn constraint_keeps_name_and_interval() {
        let (model, vars) = model_with_three();
        let interval = Interval::new(Real(0.0), Real::INFINITY).unwrap();
        let constraint = model
            .create_constraint_builder()
            .with_name("c0")
            .add_term(Real(1.0), &vars[0])
            .add_term(Real(-1.0), &vars[1])
            .build(interval);
        assert_eq!(constraint.name(), Some("c0"));
        assert_eq!(constraint.interval(), interval);
        assert_eq!(constraint.weighted_sum().len(), 2);
    }
}
