//  DISTRIBUTION.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 13:41:09
//  Last edited:
//    15 Oct 2026, 14:18:33
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines what [`PDState`](crate::pd_state::PDState)s need from the
//!   distributions they hold, and provides [`DiscretePD`] as the default
//!   one.
//

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FResult};

use itertools::Itertools as _;

use crate::tolerance::{double_is_equal, double_is_smaller, lexicographic_cmp};


/***** INTERFACES *****/
/// A probability distribution over the values of a single fluent.
///
/// Distributions are opaque to the states holding them; all they need is a total order (through
/// [`PartialOrd`]) and a way to go back to the neutral, unset distribution.
pub trait Distribution: Clone + Default + PartialOrd {
    /// Resets this distribution to its unset state.
    ///
    /// By default replaces it with [`Default::default()`].
    #[inline]
    fn reset(&mut self) { *self = Self::default(); }
}





/***** LIBRARY *****/
/// A discrete probability distribution, given as parallel lists of values and their
/// probabilities.
///
/// The default DiscretePD is _undefined_, i.e., it has no values at all.
#[derive(Clone, Debug, Default)]
pub struct DiscretePD {
    /// The values with a non-zero probability, in increasing order.
    values: Vec<f64>,
    /// The probability of every value.
    probabilities: Vec<f64>,
}

// Constructors
impl DiscretePD {
    /// Constructor for an undefined DiscretePD.
    #[inline]
    pub const fn new() -> Self { Self { values: Vec::new(), probabilities: Vec::new() } }

    /// Constructor for a DiscretePD that assigns all probability to one value.
    #[inline]
    pub fn deterministic(value: f64) -> Self { Self { values: vec![value], probabilities: vec![1.0] } }

    /// Constructor for a DiscretePD over `{0, 1}` where `1` has the given probability.
    ///
    /// Degenerate probabilities (zero or one) yield a deterministic distribution.
    pub fn bernoulli(truth_prob: f64) -> Self {
        if double_is_equal(truth_prob, 1.0) {
            Self::deterministic(1.0)
        } else if double_is_equal(truth_prob, 0.0) {
            Self::deterministic(0.0)
        } else {
            Self { values: vec![0.0, 1.0], probabilities: vec![1.0 - truth_prob, truth_prob] }
        }
    }

    /// Constructor for a DiscretePD from `(value, probability)`-pairs.
    ///
    /// Pairs are sorted by value; this does not check whether the result is
    /// [well-defined](DiscretePD::is_well_defined()).
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (values, probabilities): (Vec<f64>, Vec<f64>) = pairs.into_iter().sorted_by(|(l, _), (r, _)| l.total_cmp(r)).unzip();
        Self { values, probabilities }
    }
}

// Accessors
impl DiscretePD {
    #[inline]
    pub fn values(&self) -> &[f64] { &self.values }

    #[inline]
    pub fn probabilities(&self) -> &[f64] { &self.probabilities }

    /// Returns the probability of the given value (zero if it does not occur).
    #[inline]
    pub fn probability_of(&self, value: f64) -> f64 {
        self.values.iter().position(|v| double_is_equal(*v, value)).map(|i| self.probabilities[i]).unwrap_or(0.0)
    }

    /// Whether this distribution has no values at all.
    #[inline]
    pub fn is_undefined(&self) -> bool { self.values.is_empty() }

    /// Whether this distribution has exactly one value.
    #[inline]
    pub fn is_deterministic(&self) -> bool { self.values.len() == 1 }

    /// Checks whether this is a proper distribution.
    ///
    /// # Returns
    /// True if there is a probability for every value, values are strictly increasing,
    /// probabilities are in `(0, 1]` and they sum to one (all with tolerance).
    pub fn is_well_defined(&self) -> bool {
        if self.values.is_empty() || self.values.len() != self.probabilities.len() {
            return false;
        }
        if self.values.iter().tuple_windows().any(|(l, r)| !double_is_smaller(*l, *r)) {
            return false;
        }
        if self.probabilities.iter().any(|p| !(double_is_smaller(0.0, *p) && !double_is_smaller(1.0, *p))) {
            return false;
        }
        double_is_equal(self.probabilities.iter().sum(), 1.0)
    }
}

// Standard traits
impl Distribution for DiscretePD {
    #[inline]
    fn reset(&mut self) {
        self.values.clear();
        self.probabilities.clear();
    }
}
impl PartialEq for DiscretePD {
    #[inline]
    fn eq(&self, other: &Self) -> bool { self.partial_cmp(other) == Some(Ordering::Equal) }
}
impl PartialOrd for DiscretePD {
    /// Orders distributions by their number of values first, and then lexicographically by their
    /// values and probabilities (with tolerance).
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.values
                .len()
                .cmp(&other.values.len())
                .then_with(|| lexicographic_cmp(&self.values, &other.values))
                .then_with(|| lexicographic_cmp(&self.probabilities, &other.probabilities)),
        )
    }
}

// Formatting
impl Display for DiscretePD {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "[{}]", self.values.iter().zip(&self.probabilities).map(|(v, p)| format!("{v}:{p}")).join(" "))
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_discrete_pd_constructors() {
        let pd = DiscretePD::bernoulli(0.3);
        assert!(pd.is_well_defined());
        assert_eq!(pd.values(), &[0.0, 1.0]);
        assert!((pd.probability_of(0.0) - 0.7).abs() < 1e-12);
        assert_eq!(pd.probability_of(2.0), 0.0);

        assert!(DiscretePD::bernoulli(1.0).is_deterministic());
        assert_eq!(DiscretePD::bernoulli(0.0), DiscretePD::deterministic(0.0));

        let pd = DiscretePD::from_pairs([(2.0, 0.5), (1.0, 0.5)]);
        assert_eq!(pd.values(), &[1.0, 2.0]);
        assert!(pd.is_well_defined());

        assert!(!DiscretePD::from_pairs([(1.0, 0.5), (2.0, 0.4)]).is_well_defined());
        assert!(!DiscretePD::from_pairs([(1.0, 0.5), (1.0, 0.5)]).is_well_defined());
        assert!(!DiscretePD::new().is_well_defined());
    }

    #[test]
    fn test_discrete_pd_order() {
        let undefined = DiscretePD::new();
        let det = DiscretePD::deterministic(1.0);
        let coin = DiscretePD::bernoulli(0.5);
        let biased = DiscretePD::bernoulli(0.6);

        // Fewer values first
        assert!(undefined < det);
        assert!(det < coin);
        // Then by values, then by probabilities
        assert!(DiscretePD::deterministic(0.0) < det);
        assert!(biased < coin);
        assert_eq!(coin, DiscretePD::from_pairs([(0.0, 0.5), (1.0, 0.5 + 1e-9)]));
    }

    #[test]
    fn test_discrete_pd_reset() {
        let mut pd = DiscretePD::bernoulli(0.25);
        pd.reset();
        assert!(pd.is_undefined());
        assert_eq!(pd, DiscretePD::default());
        assert_eq!(pd.to_string(), "[]");
        assert_eq!(DiscretePD::bernoulli(0.25).to_string(), "[0:0.75 1:0.25]");
    }
}
