// Scalar domains: real, integer and binary values with their own addition rules

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Numeric domain usable for bounds, coefficients and solution values.
///
/// The algebra of each domain lives in its `Add`/`Sub` implementations. Reals and
/// integers follow ordinary arithmetic, binaries add modulo 2.
pub trait Scalar:
    Copy
    + Debug
    + Display
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    /// Value as a float, the representation handed to the engines
    fn to_f64(self) -> f64;

    /// Nearest representable value of this domain
    fn from_f64(value: f64) -> Self;

    /// Value as an engine bound. Integer extremes stand for an open side.
    fn to_bound(self) -> f64 {
        self.to_f64()
    }
}

/// Real scalar.
///
/// Equality, ordering and hashing are total: `-0.0 == 0.0` and NaN equals itself.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Real(pub f64);

impl Real {
    pub const INFINITY: Real = Real(f64::INFINITY);
    pub const NEG_INFINITY: Real = Real(f64::NEG_INFINITY);

    pub fn value(self) -> f64 {
        self.0
    }

    fn canonical(self) -> f64 {
        if self.0 == 0.0 {
            0.0
        } else {
            self.0
        }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical().total_cmp(&other.canonical())
    }
}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().to_bits().hash(state);
    }
}

impl Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Real(value)
    }
}

impl Scalar for Real {
    const ZERO: Self = Real(0.0);
    const ONE: Self = Real(1.0);

    fn to_f64(self) -> f64 {
        self.0
    }

    fn from_f64(value: f64) -> Self {
        Real(value)
    }
}

/// Integer scalar over the 64-bit range. Arithmetic wraps on overflow.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Integer(pub i64);

impl Integer {
    pub const MIN: Integer = Integer(i64::MIN);
    pub const MAX: Integer = Integer(i64::MAX);

    pub fn value(self) -> i64 {
        self.0
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer(value)
    }
}

impl Scalar for Integer {
    const ZERO: Self = Integer(0);
    const ONE: Self = Integer(1);

    fn to_f64(self) -> f64 {
        self.0 as f64
    }

    fn from_f64(value: f64) -> Self {
        // `as` saturates, so infinite bounds land on MIN/MAX
        Integer(value.round() as i64)
    }

    fn to_bound(self) -> f64 {
        match self.0 {
            i64::MIN => f64::NEG_INFINITY,
            i64::MAX => f64::INFINITY,
            v => v as f64,
        }
    }
}

/// Binary scalar. Addition and subtraction are both XOR, so `1 + 1 = 0`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Binary(pub bool);

impl Binary {
    pub const ZERO: Binary = Binary(false);
    pub const ONE: Binary = Binary(true);

    pub fn is_one(self) -> bool {
        self.0
    }

    pub fn value(self) -> i64 {
        i64::from(self.0)
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<bool> for Binary {
    fn from(value: bool) -> Self {
        Binary(value)
    }
}

impl Scalar for Binary {
    const ZERO: Self = Binary(false);
    const ONE: Self = Binary(true);

    fn to_f64(self) -> f64 {
        self.value() as f64
    }

    fn from_f64(value: f64) -> Self {
        Binary((value.round() as i64).rem_euclid(2) == 1)
    }
}

impl From<Binary> for Integer {
    fn from(value: Binary) -> Self {
        Integer(value.value())
    }
}

impl From<Binary> for Real {
    fn from(value: Binary) -> Self {
        Real(value.to_f64())
    }
}

impl From<Integer> for Real {
    fn from(value: Integer) -> Self {
        Real(value.0 as f64)
    }
}

impl Add for Real {
    type Output = Real;

    fn add(self, rhs: Real) -> Real {
        Real(self.0 + rhs.0)
    }
}

impl Sub for Real {
    type Output = Real;

    fn sub(self, rhs: Real) -> Real {
        Real(self.0 - rhs.0)
    }
}

impl Add for Integer {
    type Output = Integer;

    fn add(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Integer {
    type Output = Integer;

    fn sub(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_sub(rhs.0))
    }
}

impl Add for Binary {
    type Output = Binary;

    fn add(self, rhs: Binary) -> Binary {
        Binary(self.0 ^ rhs.0)
    }
}

impl Sub for Binary {
    type Output = Binary;

    fn sub(self, rhs: Binary) -> Binary {
        Binary(self.0 ^ rhs.0)
    }
}

// Binary against a wider domain stays modulo 2, for subtraction as well.

impl Add<Real> for Binary {
    type Output = Real;

    fn add(self, rhs: Real) -> Real {
        Real((self.to_f64() + rhs.0) % 2.0)
    }
}

impl Sub<Real> for Binary {
    type Output = Real;

    fn sub(self, rhs: Real) -> Real {
        Real((self.to_f64() + rhs.0) % 2.0)
    }
}

impl Add<Integer> for Binary {
    type Output = Integer;

    fn add(self, rhs: Integer) -> Integer {
        Integer(self.value().wrapping_add(rhs.0) % 2)
    }
}

impl Sub<Integer> for Binary {
    type Output = Integer;

    fn sub(self, rhs: Integer) -> Integer {
        Integer(self.value().wrapping_add(rhs.0) % 2)
    }
}

impl Add<Real> for Integer {
    type Output = Real;

    fn add(self, rhs: Real) -> Real {
        Real::from(self) + rhs
    }
}

impl Sub<Real> for Integer {
    type Output = Real;

    fn sub(self, rhs: Real) -> Real {
        Real::from(self) - rhs
    }
}

impl Add<Binary> for Integer {
    type Output = Integer;

    fn add(self, rhs: Binary) -> Integer {
        self + Integer::from(rhs)
    }
}

impl Sub<Binary> for Integer {
    type Output = Integer;

    fn sub(self, rhs: Binary) -> Integer {
        self - Integer::from(rhs)
    }
}

impl Add<Integer> for Real {
    type Output = Real;

    fn add(self, rhs: Integer) -> Real {
        self + Real::from(rhs)
    }
}

impl Sub<Integer> for Real {
    type Output = Real;

    fn sub(self, rhs: Integer) -> Real {
        self - Real::from(rhs)
    }
}

impl Add<Binary> for Real {
    type Output = Real;

    fn add(self, rhs: Binary) -> Real {
        self + Real::from(rhs)
    }
}

impl Sub<Binary> for Real {
    type Output = Real;

    fn sub(self, rhs: Binary) -> Real {
        self - Real::from(rhs)
    }
}
