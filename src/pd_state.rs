//  PD STATE.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 14:30:52
//  Last edited:
//    15 Oct 2026, 17:47:10
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`PDState`], a [`State`] where every probabilistic
//!   fluent holds a probability distribution instead of a single value.
//

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FResult};
use std::ptr;

use itertools::Itertools as _;

use crate::distribution::{DiscretePD, Distribution};
use crate::layout::FluentLayout;
use crate::order::StateOrder;
use crate::state::State;
use crate::tolerance::lexicographic_cmp;


/***** LIBRARY *****/
/// A planning state in which the probabilistic fluents are not yet sampled.
///
/// The deterministic part and the remaining steps live in an ordinary [`State`]. Its
/// probabilistic values are not used; every probabilistic fluent is given by a distribution `D`
/// instead.
///
/// Hash keys are not supported for PDStates. There is no encoding of distributions into integers,
/// so [`PDState::compute_full_hash_key()`] and [`PDState::compute_fluent_hash_keys()`] panic.
#[derive(Clone, Debug)]
pub struct PDState<'l, D = DiscretePD> {
    /// The scalar part of the state.
    state: State<'l>,
    /// One distribution per probabilistic fluent.
    pds:   Vec<D>,
}

// Constructors
impl<'l, D: Distribution> PDState<'l, D> {
    /// Constructor for a PDState with all deterministic fluents zero and all distributions unset.
    ///
    /// # Arguments
    /// - `layout`: The [`FluentLayout`] that determines the number of fluents.
    /// - `remaining_steps`: The number of steps until the horizon.
    ///
    /// # Returns
    /// A new PDState.
    #[inline]
    pub fn new(layout: &'l FluentLayout, remaining_steps: i32) -> Self {
        Self { state: State::new(layout, remaining_steps), pds: vec![D::default(); layout.num_probabilistic()] }
    }

    /// Constructor for a PDState that copies the given state as its scalar part.
    ///
    /// All distributions start out unset.
    #[inline]
    pub fn from_state(state: &State<'l>) -> Self {
        Self { state: state.clone(), pds: vec![D::default(); state.layout().num_probabilistic()] }
    }
}

// Reuse
impl<'l, D: Distribution> PDState<'l, D> {
    /// Makes this state a copy of another one, reusing this state's memory where the
    /// distribution allows it.
    ///
    /// # Panics
    /// This function panics if the other state is over a different layout.
    #[track_caller]
    pub fn set_to(&mut self, other: &Self) {
        assert!(ptr::eq(self.state.layout(), other.state.layout()), "Cannot set a PD state to a PD state of a different layout");
        self.state.set_to(&other.state);
        self.pds.clone_from_slice(&other.pds);
    }

    /// Clears this state for reuse.
    ///
    /// Next to what [`State::reset()`] does, resets every distribution to its unset value.
    pub fn reset(&mut self, remaining_steps: i32) {
        self.state.reset(remaining_steps);
        for pd in &mut self.pds {
            pd.reset();
        }
    }

    /// Exchanges the contents of this state with another one in constant time.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) { std::mem::swap(self, other) }
}

// Hashing
impl<'l, D> PDState<'l, D> {
    /// Not supported for PDStates.
    ///
    /// # Panics
    /// This function always panics.
    #[track_caller]
    pub fn compute_full_hash_key(&mut self) { panic!("Computing the full hash key of a PD state is not supported") }

    /// Not supported for PDStates.
    ///
    /// # Panics
    /// This function always panics.
    #[track_caller]
    pub fn compute_fluent_hash_keys(&mut self) { panic!("Computing the fluent hash keys of a PD state is not supported") }
}

// Accessors
impl<'l, D> PDState<'l, D> {
    /// Returns the distribution of the probabilistic fluent with the given index.
    ///
    /// # Panics
    /// This function panics if `index` is out-of-range.
    #[inline]
    #[track_caller]
    pub fn probabilistic_fluent_as_pd(&self, index: usize) -> &D {
        match self.pds.get(index) {
            Some(pd) => pd,
            None => panic!("Index {index} is out-of-range for a PD state with {} probabilistic fluent(s)", self.pds.len()),
        }
    }

    /// Returns a mutable reference to the distribution of the probabilistic fluent with the
    /// given index.
    ///
    /// # Panics
    /// This function panics if `index` is out-of-range.
    #[inline]
    #[track_caller]
    pub fn probabilistic_fluent_as_pd_mut(&mut self, index: usize) -> &mut D {
        let len: usize = self.pds.len();
        match self.pds.get_mut(index) {
            Some(pd) => pd,
            None => panic!("Index {index} is out-of-range for a PD state with {len} probabilistic fluent(s)"),
        }
    }

    /// Returns all distributions, in order.
    #[inline]
    pub fn probabilistic_fluents_as_pds(&self) -> &[D] { &self.pds }

    /// Returns the value of the deterministic fluent with the given index.
    ///
    /// # Panics
    /// This function panics if `index` is out-of-range.
    #[inline]
    #[track_caller]
    pub fn deterministic_fluent(&self, index: usize) -> f64 { self.state.deterministic_fluent(index) }

    /// Returns a mutable reference to the value of the deterministic fluent with the given index.
    ///
    /// # Panics
    /// This function panics if `index` is out-of-range.
    #[inline]
    #[track_caller]
    pub fn deterministic_fluent_mut(&mut self, index: usize) -> &mut f64 { self.state.deterministic_fluent_mut(index) }

    #[inline]
    pub fn deterministic_fluents(&self) -> &[f64] { self.state.deterministic_fluents() }

    #[inline]
    pub const fn remaining_steps(&self) -> i32 { self.state.remaining_steps() }

    #[inline]
    pub fn remaining_steps_mut(&mut self) -> &mut i32 { self.state.remaining_steps_mut() }

    /// Checks whether this state is at the horizon.
    ///
    /// # Panics
    /// This function panics if the state is not bound to a horizon.
    #[inline]
    #[track_caller]
    pub fn is_terminal(&self) -> bool { self.state.is_terminal() }

    /// The scalar part of this state.
    #[inline]
    pub const fn state(&self) -> &State<'l> { &self.state }

    /// The layout of this state.
    #[inline]
    pub const fn layout(&self) -> &'l FluentLayout { self.state.layout() }
}

// Formatting
impl<'l, D: Display> Display for PDState<'l, D> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "[{}] [{}] ({})", self.state.deterministic_fluents().iter().join(" "), self.pds.iter().join(" "), self.state.remaining_steps())
    }
}



/// Orders [`PDState`]s by their deterministic fluents (with tolerance), and then by their
/// distributions.
///
/// The remaining steps are ignored, so this recognizes the same predicted successor regardless
/// of the depth at which it was predicted.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct PdStateOrder;
impl PdStateOrder {
    /// Compares two distributions, treating incomparable ones as equal.
    #[inline]
    fn cmp_pds<D: PartialOrd>(lhs: &[D], rhs: &[D]) -> Ordering {
        lhs.iter().zip(rhs).map(|(l, r)| l.partial_cmp(r).unwrap_or(Ordering::Equal)).find(|ord| ord.is_ne()).unwrap_or(Ordering::Equal)
    }
}
impl<'l, D: PartialOrd> StateOrder<PDState<'l, D>> for PdStateOrder {
    #[inline]
    fn less(lhs: &PDState<'l, D>, rhs: &PDState<'l, D>) -> bool { Self::cmp(lhs, rhs).is_lt() }

    #[inline]
    #[track_caller]
    fn cmp(lhs: &PDState<'l, D>, rhs: &PDState<'l, D>) -> Ordering {
        lexicographic_cmp(lhs.deterministic_fluents(), rhs.deterministic_fluents()).then_with(|| Self::cmp_pds(&lhs.pds, &rhs.pds))
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::order::Ordered;
    use crate::tests::example_layout;


    #[test]
    fn test_pd_state_construction() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let layout = example_layout();
        let state = State::with_values(&layout, vec![1.0, 2.0], vec![1.0], 3);
        let pd: PDState = PDState::from_state(&state);
        assert_eq!(pd.deterministic_fluents(), &[1.0, 2.0]);
        assert_eq!(pd.remaining_steps(), 3);
        assert!(pd.probabilistic_fluent_as_pd(0).is_undefined());
        assert_eq!(pd.state().probabilistic_fluents(), &[1.0]);
        assert_eq!(pd.to_string(), "[1 2] [[]] (3)");
    }

    #[test]
    fn test_pd_state_reset_and_set_to() {
        let layout = example_layout();
        let mut a: PDState = PDState::new(&layout, 4);
        *a.deterministic_fluent_mut(1) = 2.0;
        *a.probabilistic_fluent_as_pd_mut(0) = DiscretePD::bernoulli(0.5);

        let mut b: PDState = PDState::new(&layout, 0);
        b.set_to(&a);
        assert_eq!(b.deterministic_fluents(), &[0.0, 2.0]);
        assert_eq!(b.probabilistic_fluent_as_pd(0), &DiscretePD::bernoulli(0.5));
        assert_eq!(b.remaining_steps(), 4);

        a.reset(1);
        assert_eq!(a.deterministic_fluents(), &[0.0, 0.0]);
        assert!(a.probabilistic_fluent_as_pd(0).is_undefined());
        assert_eq!(a.remaining_steps(), 1);
        // `b` is a copy
        assert!(b.probabilistic_fluent_as_pd(0).is_well_defined());

        a.swap(&mut b);
        assert_eq!(a.remaining_steps(), 4);
        assert!(b.probabilistic_fluent_as_pd(0).is_undefined());
    }

    #[test]
    fn test_pd_state_swap_twice() {
        let layout = example_layout();
        let mut a: PDState = PDState::new(&layout, 3);
        *a.deterministic_fluent_mut(0) = 1.0;
        *a.probabilistic_fluent_as_pd_mut(0) = DiscretePD::bernoulli(0.25);
        let mut b: PDState = PDState::new(&layout, 5);
        *b.deterministic_fluent_mut(1) = 2.0;
        *b.probabilistic_fluent_as_pd_mut(0) = DiscretePD::deterministic(1.0);

        a.swap(&mut b);
        assert_eq!(a.deterministic_fluents(), &[0.0, 2.0]);
        assert_eq!(a.probabilistic_fluent_as_pd(0), &DiscretePD::deterministic(1.0));
        assert_eq!(a.remaining_steps(), 5);
        assert_eq!(b.deterministic_fluents(), &[1.0, 0.0]);
        assert_eq!(b.probabilistic_fluent_as_pd(0), &DiscretePD::bernoulli(0.25));
        assert_eq!(b.remaining_steps(), 3);

        // And back again
        a.swap(&mut b);
        assert_eq!(a.deterministic_fluents(), &[1.0, 0.0]);
        assert_eq!(a.probabilistic_fluent_as_pd(0), &DiscretePD::bernoulli(0.25));
        assert_eq!(a.remaining_steps(), 3);
        assert_eq!(b.deterministic_fluents(), &[0.0, 2.0]);
        assert_eq!(b.probabilistic_fluent_as_pd(0), &DiscretePD::deterministic(1.0));
        assert_eq!(b.remaining_steps(), 5);
    }

    #[test]
    #[should_panic]
    fn test_pd_state_out_of_range() {
        let layout = example_layout();
        let pd: PDState = PDState::new(&layout, 0);
        pd.probabilistic_fluent_as_pd(1);
    }

    #[test]
    #[should_panic]
    fn test_pd_state_full_hash_key_unsupported() {
        let layout = example_layout();
        let mut pd: PDState = PDState::new(&layout, 0);
        pd.compute_full_hash_key();
    }

    #[test]
    #[should_panic]
    fn test_pd_state_fluent_hash_keys_unsupported() {
        let layout = example_layout();
        let mut pd: PDState = PDState::new(&layout, 0);
        pd.compute_fluent_hash_keys();
    }

    #[test]
    fn test_pd_state_order() {
        let layout = example_layout();
        let make = |det: f64, pd: DiscretePD, steps: i32| {
            let mut res: PDState = PDState::new(&layout, steps);
            *res.deterministic_fluent_mut(0) = det;
            *res.probabilistic_fluent_as_pd_mut(0) = pd;
            res
        };

        // Deterministic fluents first
        assert!(PdStateOrder::less(&make(0.0, DiscretePD::bernoulli(0.5), 1), &make(1.0, DiscretePD::deterministic(0.0), 1)));
        // Then the distributions
        assert!(PdStateOrder::less(&make(1.0, DiscretePD::deterministic(1.0), 1), &make(1.0, DiscretePD::bernoulli(0.5), 1)));
        // Never the remaining steps
        assert!(PdStateOrder::equivalent(&make(1.0, DiscretePD::bernoulli(0.5), 1), &make(1.0, DiscretePD::bernoulli(0.5), 7)));

        let mut predicted: BTreeSet<Ordered<PDState, PdStateOrder>> = BTreeSet::new();
        assert!(predicted.insert(Ordered::new(make(1.0, DiscretePD::bernoulli(0.5), 2))));
        assert!(!predicted.insert(Ordered::new(make(1.0, DiscretePD::bernoulli(0.5), 1))));
        assert!(predicted.insert(Ordered::new(make(1.0, DiscretePD::bernoulli(0.25), 1))));
        assert_eq!(predicted.len(), 2);
    }
}
