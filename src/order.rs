//  ORDER.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 09:12:48
//  Last edited:
//    15 Oct 2026, 17:58:20
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the orderings with which states are deduplicated in search
//!   containers (transposition tables, visited sets, ...).
//!
//!   Orders are zero-sized marker types implementing [`StateOrder`]. Wrap a
//!   state in an [`Ordered`] to use it as a key in a `BTreeMap` or
//!   `BTreeSet`.
//

use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter, Result as FResult};
use std::marker::PhantomData;

use crate::state::State;
use crate::tolerance::lexicographic_cmp;


/***** HELPER FUNCTIONS *****/
/// Compares two states by their fluents only.
///
/// Uses the full hash keys if both states have them, or else compares the deterministic and then
/// the probabilistic fluents lexicographically with tolerance.
#[inline]
#[track_caller]
fn cmp_fluents(lhs: &State, rhs: &State) -> Ordering {
    if let (Some(lhs), Some(rhs)) = (lhs.full_hash_key(), rhs.full_hash_key()) {
        return lhs.cmp(&rhs);
    }
    lexicographic_cmp(lhs.deterministic_fluents(), rhs.deterministic_fluents())
        .then_with(|| lexicographic_cmp(lhs.probabilistic_fluents(), rhs.probabilistic_fluents()))
}





/***** INTERFACES *****/
/// Defines a strict weak ordering over some kind of state.
pub trait StateOrder<S: ?Sized> {
    /// Checks whether `lhs` sorts strictly before `rhs`.
    fn less(lhs: &S, rhs: &S) -> bool;

    /// Compares two states.
    ///
    /// # Returns
    /// [`Ordering::Equal`] iff neither state is [less](StateOrder::less()) than the other.
    #[inline]
    fn cmp(lhs: &S, rhs: &S) -> Ordering {
        if Self::less(lhs, rhs) {
            Ordering::Less
        } else if Self::less(rhs, lhs) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Checks whether two states are equivalent under this order.
    #[inline]
    fn equivalent(lhs: &S, rhs: &S) -> bool { Self::cmp(lhs, rhs).is_eq() }
}





/***** LIBRARY *****/
/// Orders [`State`]s by their fluents only, regardless of how many steps they have left.
///
/// Used where a state's value does not depend on the steps-to-go, e.g., in infinite-horizon
/// problems.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct IgnoringRemainingSteps;
impl<'l> StateOrder<State<'l>> for IgnoringRemainingSteps {
    #[inline]
    fn less(lhs: &State<'l>, rhs: &State<'l>) -> bool { cmp_fluents(lhs, rhs).is_lt() }

    #[inline]
    fn cmp(lhs: &State<'l>, rhs: &State<'l>) -> Ordering { cmp_fluents(lhs, rhs) }
}

/// Orders [`State`]s by their remaining steps first (fewer steps first), and then by their
/// fluents.
///
/// Used in depth-sensitive caches of finite-horizon problems, where the same fluents at a
/// different depth are a different planning state.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ConsideringRemainingSteps;
impl<'l> StateOrder<State<'l>> for ConsideringRemainingSteps {
    #[inline]
    fn less(lhs: &State<'l>, rhs: &State<'l>) -> bool { Self::cmp(lhs, rhs).is_lt() }

    #[inline]
    fn cmp(lhs: &State<'l>, rhs: &State<'l>) -> Ordering {
        lhs.remaining_steps().cmp(&rhs.remaining_steps()).then_with(|| cmp_fluents(lhs, rhs))
    }
}



/// Owns a state and orders it by `O`, so it can be used as a key in ordered containers.
pub struct Ordered<S, O> {
    /// The wrapped state.
    state:  S,
    /// The order we sort by.
    _order: PhantomData<fn() -> O>,
}

// Constructors
impl<S, O> Ordered<S, O> {
    /// Wraps a state.
    #[inline]
    pub const fn new(state: S) -> Self { Self { state, _order: PhantomData } }

    /// Returns the wrapped state.
    #[inline]
    pub fn into_inner(self) -> S { self.state }
}
impl<S, O> From<S> for Ordered<S, O> {
    #[inline]
    fn from(value: S) -> Self { Self::new(value) }
}

// Accessors
impl<S, O> Ordered<S, O> {
    #[inline]
    pub const fn get(&self) -> &S { &self.state }
}
impl<S, O> AsRef<S> for Ordered<S, O> {
    #[inline]
    fn as_ref(&self) -> &S { &self.state }
}

// Standard traits
impl<S: Clone, O> Clone for Ordered<S, O> {
    #[inline]
    fn clone(&self) -> Self { Self::new(self.state.clone()) }
}
impl<S: Debug, O> Debug for Ordered<S, O> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.debug_tuple("Ordered").field(&self.state).finish() }
}
impl<S: Display, O> Display for Ordered<S, O> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { self.state.fmt(f) }
}
impl<S, O: StateOrder<S>> Eq for Ordered<S, O> {}
impl<S, O: StateOrder<S>> Ord for Ordered<S, O> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering { O::cmp(&self.state, &other.state) }
}
impl<S, O: StateOrder<S>> PartialEq for Ordered<S, O> {
    #[inline]
    fn eq(&self, other: &Self) -> bool { O::equivalent(&self.state, &other.state) }
}
impl<S, O: StateOrder<S>> PartialOrd for Ordered<S, O> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}





/***** TESTS *****/
