use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::builders::{ConstraintBuilder, ObjectiveFunctionBuilder, WeightedSumBuilder};
use super::errors::{ModelError, ModelResult};
use super::interval::Interval;
use super::scalar::Scalar;
use super::value_objects::VariableKind;
use super::variable::Variable;
use super::weighted_sum::WeightedSum;

/// Linear constraint `lower ≤ Σ coefficient · variable ≤ upper`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint<S: Scalar, C: Scalar> {
    weighted_sum: WeightedSum<S, C>,
    interval: Interval<C>,
    name: Option<String>,
}

impl<S: Scalar, C: Scalar> Constraint<S, C> {
    pub fn new(weighted_sum: WeightedSum<S, C>, interval: Interval<C>, name: Option<String>) -> Self {
        Self {
            weighted_sum,
            interval,
            name,
        }
    }

    pub fn weighted_sum(&self) -> &WeightedSum<S, C> {
        &self.weighted_sum
    }

    pub fn interval(&self) -> Interval<C> {
        self.interval
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<S: Scalar, C: Scalar> fmt::Display for Constraint<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        write!(
            f,
            "{} <= {} <= {}",
            self.interval.lower(),
            self.weighted_sum,
            self.interval.upper()
        )
    }
}

/// Objective `max/min offset + Σ coefficient · variable`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectiveFunction<S: Scalar, C: Scalar> {
    weighted_sum: WeightedSum<S, C>,
    maximize: bool,
    offset: Option<C>,
}

impl<S: Scalar, C: Scalar> ObjectiveFunction<S, C> {
    pub fn new(weighted_sum: WeightedSum<S, C>, maximize: bool, offset: Option<C>) -> Self {
        Self {
            weighted_sum,
            maximize,
            offset,
        }
    }

    pub fn weighted_sum(&self) -> &WeightedSum<S, C> {
        &self.weighted_sum
    }

    pub fn maximize(&self) -> bool {
        self.maximize
    }

    pub fn offset(&self) -> Option<C> {
        self.offset
    }
}

impl<S: Scalar, C: Scalar> fmt::Display for ObjectiveFunction<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sense = if self.maximize { "max" } else { "min" };
        match self.offset {
            Some(offset) => write!(f, "{sense} {offset} + {}", self.weighted_sum),
            None => write!(f, "{sense} {}", self.weighted_sum),
        }
    }
}

/// Mutable model under construction.
///
/// Variable names are unique within a model. [`set_objective`](Self::set_objective) consumes
/// the builder and returns the immutable [`CompletedOptimizationModel`].
#[derive(Debug, Clone)]
pub struct OptimizationModel<S: Scalar, C: Scalar> {
    variables: Vec<Variable<S>>,
    names: HashSet<Arc<str>>,
    constraints: Vec<Constraint<S, C>>,
}

impl<S: Scalar, C: Scalar> OptimizationModel<S, C> {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            names: HashSet::new(),
            constraints: Vec::new(),
        }
    }

    /// Creates and registers a variable; fails if the name is taken
    pub fn new_variable(
        &mut self,
        kind: VariableKind,
        interval: Interval<S>,
        name: &str,
    ) -> ModelResult<Variable<S>> {
        if self.names.contains(name) {
            return Err(ModelError::VariableAlreadyExists {
                name: name.to_string(),
            });
        }
        let name: Arc<str> = Arc::from(name);
        let variable = Variable::new(name.clone(), interval, kind);
        self.names.insert(name);
        self.variables.push(variable.clone());
        Ok(variable)
    }

    pub fn new_continuous_variable(
        &mut self,
        interval: Interval<S>,
        name: &str,
    ) -> ModelResult<Variable<S>> {
        self.new_variable(VariableKind::Continuous, interval, name)
    }

    pub fn new_integer_variable(
        &mut self,
        interval: Interval<S>,
        name: &str,
    ) -> ModelResult<Variable<S>> {
        self.new_variable(VariableKind::Integer, interval, name)
    }

    /// Binary variable over `[0, 1]`
    pub fn new_binary_variable(&mut self, name: &str) -> ModelResult<Variable<S>> {
        self.new_variable(VariableKind::Binary, Interval::binary(), name)
    }

    /// Constraints are not checked against the registered variables here;
    /// the solver adapters reject unknown variables.
    pub fn add_constraint(&mut self, constraint: Constraint<S, C>) {
        self.constraints.push(constraint);
    }

    pub fn add_constraints(&mut self, constraints: impl IntoIterator<Item = Constraint<S, C>>) {
        self.constraints.extend(constraints);
    }

    pub fn variables(&self) -> &[Variable<S>] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint<S, C>] {
        &self.constraints
    }

    pub fn create_weighted_sum_builder(&self) -> WeightedSumBuilder<S, C> {
        WeightedSumBuilder::new()
    }

    pub fn create_constraint_builder(&self) -> ConstraintBuilder<S, C> {
        ConstraintBuilder::new()
    }

    pub fn create_objective_function_builder(&self) -> ObjectiveFunctionBuilder<S, C> {
        ObjectiveFunctionBuilder::new()
    }

    /// Seals the model
    pub fn set_objective(self, objective: ObjectiveFunction<S, C>) -> CompletedOptimizationModel<S, C> {
        CompletedOptimizationModel {
            variables: self.variables,
            constraints: self.constraints,
            objective,
        }
    }
}

impl<S: Scalar, C: Scalar> Default for OptimizationModel<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable, solve-ready model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedOptimizationModel<S: Scalar, C: Scalar> {
    variables: Vec<Variable<S>>,
    constraints: Vec<Constraint<S, C>>,
    objective: ObjectiveFunction<S, C>,
}

impl<S: Scalar, C: Scalar> CompletedOptimizationModel<S, C> {
    pub fn variables(&self) -> &[Variable<S>] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint<S, C>] {
        &self.constraints
    }

    pub fn objective(&self) -> &ObjectiveFunction<S, C> {
        &self.objective
    }

    pub fn variable(&self, name: &str) -> Option<&Variable<S>> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.kind().is_integral()).count()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.num_integer_variables() > 0
    }
}

impl<S: Scalar, C: Scalar> fmt::Display for CompletedOptimizationModel<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Variables:")?;
        for variable in &self.variables {
            writeln!(f, " {variable}")?;
        }
        writeln!(f, "Constraints:")?;
        for constraint in &self.constraints {
            writeln!(f, " {constraint}")?;
        }
        writeln!(f, "Objective function:")?;
        write!(f, " {}", self.objective)
    }
}
