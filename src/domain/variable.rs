use std::fmt;
use std::sync::Arc;

use super::interval::Interval;
use super::scalar::Scalar;
use super::value_objects::VariableKind;

/// Decision variable of an optimization model.
///
/// Variables are created by [`OptimizationModel`](super::models::OptimizationModel) and never
/// mutated. Two variables are equal when name, interval and kind are equal; ordering is by
/// name first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable<S: Scalar> {
    name: Arc<str>,
    interval: Interval<S>,
    kind: VariableKind,
}

impl<S: Scalar> Variable<S> {
    pub(crate) fn new(name: impl Into<Arc<str>>, interval: Interval<S>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            interval,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> Interval<S> {
        self.interval
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn lower_bound(&self) -> S {
        self.interval.lower()
    }

    pub fn upper_bound(&self) -> S {
        self.interval.upper()
    }
}

impl<S: Scalar> fmt::Display for Variable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ∈ {}", self.name, self.interval)
    }
}
