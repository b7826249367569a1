//  TOLERANCE.rs
//    by Lut99
//
//  Created:
//    13 Oct 2026, 14:02:11
//  Last edited:
//    15 Oct 2026, 09:47:03
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the numeric policy for comparing fluent values.
//!
//!   Fluent values arrive from numeric simulation, so they are never
//!   compared exactly. Every comparator, hash skip-check and merge in this
//!   crate goes through the predicates defined here.
//

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FResult};


/***** CONSTANTS *****/
/// The tolerance within which two fluent values are considered equal.
pub const EPSILON: f64 = 0.0000001;





/***** LIBRARY FUNCTIONS *****/
/// Checks whether two values are equal up to [`EPSILON`].
#[inline]
pub fn double_is_equal(lhs: f64, rhs: f64) -> bool { (lhs - rhs).abs() < EPSILON }

/// Checks whether `lhs` is smaller than `rhs` by more than [`EPSILON`].
///
/// # Arguments
/// - `lhs`: The value that should be smaller.
/// - `rhs`: The value that should be larger.
///
/// # Returns
/// True if `lhs + EPSILON < rhs`, false otherwise.
#[inline]
pub fn double_is_smaller(lhs: f64, rhs: f64) -> bool { lhs + EPSILON < rhs }

/// Checks whether `lhs` is greater than `rhs` by more than [`EPSILON`].
///
/// # Arguments
/// - `lhs`: The value that should be larger.
/// - `rhs`: The value that should be smaller.
///
/// # Returns
/// True if `lhs - EPSILON > rhs`, false otherwise.
#[inline]
pub fn double_is_greater(lhs: f64, rhs: f64) -> bool { lhs - EPSILON > rhs }

#[inline]
pub fn double_is_smaller_or_equal(lhs: f64, rhs: f64) -> bool { !double_is_greater(lhs, rhs) }

#[inline]
pub fn double_is_greater_or_equal(lhs: f64, rhs: f64) -> bool { !double_is_smaller(lhs, rhs) }

/// Compares two values with tolerance.
///
/// Values within [`EPSILON`] of each other are [`Ordering::Equal`].
#[inline]
pub fn double_cmp(lhs: f64, rhs: f64) -> Ordering {
    if double_is_smaller(lhs, rhs) {
        Ordering::Less
    } else if double_is_smaller(rhs, lhs) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Compares two sequences of values lexicographically with tolerance.
///
/// Returns at the first position where the values differ by more than [`EPSILON`].
///
/// # Panics
/// This function panics if the sequences have different lengths. Both are expected to come from
/// states over the same layout.
#[inline]
#[track_caller]
pub fn lexicographic_cmp(lhs: &[f64], rhs: &[f64]) -> Ordering {
    assert_eq!(lhs.len(), rhs.len(), "Cannot compare fluent vectors of different lengths");
    lhs.iter().zip(rhs).map(|(l, r)| double_cmp(*l, *r)).find(|o| o.is_ne()).unwrap_or(Ordering::Equal)
}





/***** LIBRARY *****/
/// A fluent value with a total order, so that it can live in ordered sets.
///
/// Sets of possible values are compared exactly (two slots hold the same set iff they hold the
/// same bits), which is what [`f64::total_cmp()`] gives us. Use the `double_is_*()`-functions
/// whenever values should be compared with tolerance instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct FluentValue(pub f64);

// Constructors
impl From<f64> for FluentValue {
    #[inline]
    fn from(value: f64) -> Self { Self(value) }
}
impl From<FluentValue> for f64 {
    #[inline]
    fn from(value: FluentValue) -> Self { value.0 }
}

// Accessors
impl FluentValue {
    /// Returns the wrapped value.
    #[inline]
    pub const fn get(self) -> f64 { self.0 }

    /// Returns the value as an index into a per-value table.
    ///
    /// Fluent values of enumerable fluents are small non-negative integers stored as reals; the
    /// fractional part (if any) is truncated.
    ///
    /// # Panics
    /// This function panics if the value is negative or not finite, since it cannot index a table.
    #[inline]
    #[track_caller]
    pub fn as_index(self) -> usize { value_as_index(self.0) }
}

// Standard traits
impl Eq for FluentValue {}
impl PartialEq for FluentValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool { self.0.total_cmp(&other.0).is_eq() }
}
impl Ord for FluentValue {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering { self.0.total_cmp(&other.0) }
}
impl PartialOrd for FluentValue {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

// Formatting
impl Display for FluentValue {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{}", self.0) }
}



/// Turns a fluent value into an index into a per-value table.
///
/// # Panics
/// This function panics if the value is negative or not finite.
#[inline]
#[track_caller]
pub fn value_as_index(value: f64) -> usize {
    if !value.is_finite() || value < 0.0 {
        panic!("Fluent value {value} cannot be used as a table index (expected a small non-negative integer)");
    }
    value as usize
}





/***** TESTS *****/
