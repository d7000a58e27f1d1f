use std::fmt;

use super::errors::{ModelError, ModelResult};
use super::scalar::{Real, Scalar};

/// Closed range `[lower, upper]` over one scalar domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval<S: Scalar> {
    lower: S,
    upper: S,
}

impl<S: Scalar> Interval<S> {
    /// Fails when `lower > upper` or either bound is not a number
    pub fn new(lower: S, upper: S) -> ModelResult<Self> {
        if lower > upper || lower.to_f64().is_nan() || upper.to_f64().is_nan() {
            return Err(ModelError::InadmissibleBounds {
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Degenerate interval `[value, value]`
    pub fn point(value: S) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// The fixed `[0, 1]` interval of binary variables
    pub fn binary() -> Self {
        Self {
            lower: S::ZERO,
            upper: S::ONE,
        }
    }

    pub fn lower(&self) -> S {
        self.lower
    }

    pub fn upper(&self) -> S {
        self.upper
    }

    pub fn contains(&self, value: S) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl Interval<Real> {
    /// `[0, ∞)`
    pub fn non_negative() -> Self {
        Self {
            lower: Real(0.0),
            upper: Real::INFINITY,
        }
    }

    /// `(-∞, ∞)`
    pub fn unbounded() -> Self {
        Self {
            lower: Real::NEG_INFINITY,
            upper: Real::INFINITY,
        }
    }
}

impl<S: Scalar> fmt::Display for Interval<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
