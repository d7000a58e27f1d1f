use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use super::scalar::Scalar;
use super::variable::Variable;

/// Linear expression `Σ coefficient · variable` with one entry per variable.
///
/// Adding a term for a variable that is already present adds the coefficients, so the
/// result never depends on insertion order. Equality compares the set of terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightedSum<S: Scalar, C: Scalar> {
    terms: BTreeMap<Variable<S>, C>,
}

impl<S: Scalar, C: Scalar> WeightedSum<S, C> {
    pub fn new() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    /// Adds `coefficient · variable`, merging with an existing term
    pub fn add(&mut self, variable: Variable<S>, coefficient: C) {
        match self.terms.entry(variable) {
            btree_map::Entry::Occupied(mut entry) => {
                let merged = coefficient + *entry.get();
                entry.insert(merged);
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(coefficient);
            }
        }
    }

    /// Adds every term of `other`
    pub fn add_sum(&mut self, other: &WeightedSum<S, C>) {
        for (variable, coefficient) in other.iter() {
            self.add(variable.clone(), *coefficient);
        }
    }

    pub fn with_term(mut self, variable: Variable<S>, coefficient: C) -> Self {
        self.add(variable, coefficient);
        self
    }

    pub fn coefficient(&self, variable: &Variable<S>) -> Option<C> {
        self.terms.get(variable).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable<S>, &C)> {
        self.terms.iter()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable<S>> {
        self.terms.keys()
    }
}

impl<S: Scalar, C: Scalar> Default for WeightedSum<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar, C: Scalar> FromIterator<(Variable<S>, C)> for WeightedSum<S, C> {
    fn from_iter<I: IntoIterator<Item = (Variable<S>, C)>>(iter: I) -> Self {
        let mut sum = Self::new();
        for (variable, coefficient) in iter {
            sum.add(variable, coefficient);
        }
        sum
    }
}

impl<S: Scalar, C: Scalar> fmt::Display for WeightedSum<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (variable, coefficient)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{} {}", coefficient, variable.name())?;
        }
        Ok(())
    }
}
