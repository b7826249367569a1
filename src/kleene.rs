//  KLEENE.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 15:22:38
//  Last edited:
//    15 Oct 2026, 18:01:26
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`KleeneState`], which holds a _set_ of possible values
//!   per fluent instead of one.
//!
//!   Kleene states are seeded from a concrete [`State`] and then grown by
//!   merging (set union) the states reachable from them, which
//!   over-approximates everything reachable under nondeterminism.
//

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FResult};
use std::ops::{BitOr, BitOrAssign, Index, IndexMut};
use std::ptr;

use itertools::Itertools as _;

use crate::layout::{FluentLayout, IncrementalKey, KleeneHashing};
use crate::log::trace;
use crate::state::{State, NO_HASH_KEY};
use crate::tolerance::{double_is_greater, FluentValue};


/***** HELPER FUNCTIONS *****/
/// Computes the multiplier of one Kleene slot.
///
/// Sets bit `v` for every value `v` in the slot and subtracts one. A singleton `{v}` thus yields
/// `2^v - 1`, and the empty set yields `-1`.
///
/// # Panics
/// This function panics if any value cannot be used as a bit index in an `i64`.
#[track_caller]
fn slot_multiplier(values: &BTreeSet<FluentValue>) -> i64 {
    let mut mask: i64 = 0;
    for value in values {
        let bit: usize = value.as_index();
        match u32::try_from(bit).ok().and_then(|bit| 1i64.checked_shl(bit)).filter(|bit| *bit > 0) {
            Some(bit) => mask |= bit,
            None => panic!("Fluent value {value} is too large to be hashed in a Kleene state"),
        }
    }
    mask - 1
}





/***** LIBRARY *****/
/// An abstract state that holds, for every fluent, all values it may have.
///
/// Slots are laid out as in the [`FluentLayout`]: first the deterministic fluents, then the
/// probabilistic ones. Kleene states are hashed with the layout's separate [`KleeneHashing`]
/// tables.
///
/// Kleene states cannot be cloned. Use [`KleeneState::merged()`] (or `&a | &b`) to get a new
/// one.
#[derive(Debug)]
pub struct KleeneState<'l> {
    /// The layout of this state.
    layout: &'l FluentLayout,
    /// The possible values of every fluent.
    slots: Vec<BTreeSet<FluentValue>>,
    /// One accumulated key per dependent formula.
    fluent_hash_keys: Vec<i64>,
    /// The full hash key, or [`NO_HASH_KEY`] if not computed.
    hash_key: i64,
}

// Constructors
impl<'l> KleeneState<'l> {
    /// Constructor for a KleeneState with no possible values at all.
    ///
    /// # Arguments
    /// - `layout`: The [`FluentLayout`] that determines the number of slots and hash keys.
    ///
    /// # Returns
    /// A new KleeneState with all slots empty and no hash keys computed.
    #[inline]
    pub fn new(layout: &'l FluentLayout) -> Self {
        Self {
            layout,
            slots: vec![BTreeSet::new(); layout.state_size()],
            fluent_hash_keys: vec![0; layout.kleene().num_hashed_fluent_keys()],
            hash_key: NO_HASH_KEY,
        }
    }

    /// Constructor for a KleeneState that only holds the values of the given concrete state.
    ///
    /// # Arguments
    /// - `origin`: The [`State`] to seed from.
    ///
    /// # Returns
    /// A new KleeneState where every slot is the singleton of the matching fluent in `origin`.
    pub fn from_state(origin: &State<'l>) -> Self {
        let mut res: Self = Self::new(origin.layout());
        for (slot, value) in res.slots.iter_mut().zip(origin.deterministic_fluents().iter().chain(origin.probabilistic_fluents())) {
            slot.insert(FluentValue(*value));
        }
        res
    }

    /// Copies this state, hash keys included.
    ///
    /// Not public, since Kleene states are only ever copied to be merged into.
    #[inline]
    fn duplicate(&self) -> Self {
        Self { layout: self.layout, slots: self.slots.clone(), fluent_hash_keys: self.fluent_hash_keys.clone(), hash_key: self.hash_key }
    }
}

// Merging
impl<'l> KleeneState<'l> {
    /// Adds all possible values of another state to this one.
    ///
    /// Forgets the full hash key, since it no longer matches the slots.
    ///
    /// # Panics
    /// This function panics if the other state is over a different layout.
    #[track_caller]
    pub fn merge_into(&mut self, other: &Self) {
        assert!(ptr::eq(self.layout, other.layout), "Cannot merge Kleene states of different layouts");
        for (slot, values) in self.slots.iter_mut().zip(&other.slots) {
            slot.extend(values.iter().copied());
        }
        self.hash_key = NO_HASH_KEY;
        trace!("Merged Kleene state into {self}");
    }

    /// Returns a new state with the possible values of this state and another one.
    ///
    /// # Panics
    /// This function panics if the other state is over a different layout.
    #[inline]
    #[track_caller]
    pub fn merged(&self, other: &Self) -> Self {
        let mut res: Self = self.duplicate();
        res.merge_into(other);
        res
    }
}
impl<'l, 'o> BitOrAssign<&'o KleeneState<'l>> for KleeneState<'l> {
    #[inline]
    #[track_caller]
    fn bitor_assign(&mut self, rhs: &'o KleeneState<'l>) { self.merge_into(rhs) }
}
impl<'l, 'a, 'b> BitOr<&'b KleeneState<'l>> for &'a KleeneState<'l> {
    type Output = KleeneState<'l>;

    #[inline]
    #[track_caller]
    fn bitor(self, rhs: &'b KleeneState<'l>) -> Self::Output { self.merged(rhs) }
}

// Hashing
impl<'l> KleeneState<'l> {
    /// Computes the full hash key of this state.
    ///
    /// Every slot contributes `(mask - 1) * base`, where `mask` has bit `v` set for every value
    /// `v` in the slot. Note that this makes empty slots contribute negatively, so a state with
    /// empty slots may end up without a valid key.
    ///
    /// # Panics
    /// This function panics if the layout says Kleene state hashing is infeasible, or if a value
    /// is not a small non-negative integer.
    #[track_caller]
    pub fn compute_full_hash_key(&mut self) {
        let hashing: &KleeneHashing = self.layout.kleene();
        if !hashing.hashing_feasible() {
            debug_assert_eq!(self.hash_key, NO_HASH_KEY);
            panic!("Cannot compute the full hash key of a Kleene state when Kleene state hashing is infeasible");
        }

        self.hash_key = self.slots.iter().enumerate().map(|(i, values)| slot_multiplier(values) * hashing.hash_base(i)).sum();
        trace!("Computed full hash key {} for Kleene state {}", self.hash_key, self);
    }

    /// Computes the fluent hash keys of this state.
    ///
    /// Like [`State::compute_fluent_hash_keys()`], but with the slot multiplier (see
    /// [`KleeneState::compute_full_hash_key()`]) in place of the fluent value. Keys wrap around
    /// on overflow.
    ///
    /// # Panics
    /// This function panics if a value is not a small non-negative integer, or if the layout
    /// refers to a fluent hash key that does not exist.
    #[track_caller]
    pub fn compute_fluent_hash_keys(&mut self) {
        let hashing: &'l KleeneHashing = self.layout.kleene();
        for (i, values) in self.slots.iter().enumerate() {
            let multiplier: i64 = slot_multiplier(values);
            if !double_is_greater(multiplier as f64, 0.0) {
                continue;
            }
            let keys: &[IncrementalKey] = hashing.incremental_keys(i);
            for key in keys {
                let slot: &mut i64 = &mut self.fluent_hash_keys[key.slot];
                *slot = slot.wrapping_add(multiplier.wrapping_mul(key.coefficient));
            }
        }
        trace!("Computed fluent hash keys [{}] for Kleene state {}", self.fluent_hash_keys.iter().join(", "), self);
    }

    /// Returns the full hash key of this state, if it has been computed (and is valid).
    #[inline]
    pub fn full_hash_key(&self) -> Option<i64> { if self.hash_key >= 0 { Some(self.hash_key) } else { None } }

    /// Returns the fluent hash key of the given formula.
    ///
    /// # Panics
    /// This function panics if `slot` is out-of-range.
    #[inline]
    #[track_caller]
    pub fn fluent_hash_key(&self, slot: usize) -> i64 {
        match self.fluent_hash_keys.get(slot) {
            Some(key) => *key,
            None => panic!("Fluent hash key {slot} is out-of-range for a Kleene state with {} fluent hash key(s)", self.fluent_hash_keys.len()),
        }
    }

    /// Returns all fluent hash keys, in order.
    #[inline]
    pub fn fluent_hash_keys(&self) -> &[i64] { &self.fluent_hash_keys }
}

// Accessors
impl<'l> KleeneState<'l> {
    /// The number of slots, i.e., fluents.
    #[inline]
    pub fn len(&self) -> usize { self.slots.len() }

    /// Whether there are no fluents at all.
    #[inline]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Iterates over the possible values of every fluent.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, BTreeSet<FluentValue>> { self.slots.iter() }

    /// The layout of this state.
    #[inline]
    pub const fn layout(&self) -> &'l FluentLayout { self.layout }
}
impl<'l> Index<usize> for KleeneState<'l> {
    type Output = BTreeSet<FluentValue>;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        match self.slots.get(index) {
            Some(values) => values,
            None => panic!("Index {index} is out-of-range for a Kleene state with {} fluent(s)", self.slots.len()),
        }
    }
}
impl<'l> IndexMut<usize> for KleeneState<'l> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len: usize = self.slots.len();
        match self.slots.get_mut(index) {
            Some(values) => values,
            None => panic!("Index {index} is out-of-range for a Kleene state with {len} fluent(s)"),
        }
    }
}

// Standard traits
impl<'l> PartialEq for KleeneState<'l> {
    /// Compares the full hash keys if both states have one, or else every slot as a set.
    #[inline]
    #[track_caller]
    fn eq(&self, other: &Self) -> bool {
        assert_eq!(self.slots.len(), other.slots.len(), "Cannot compare Kleene states with different numbers of fluents");
        if let (Some(lhs), Some(rhs)) = (self.full_hash_key(), other.full_hash_key()) {
            return lhs == rhs;
        }
        self.slots == other.slots
    }
}

// Formatting
impl<'l> Display for KleeneState<'l> {
    /// Writes every slot as a set on one line, or (with `{:#}`) one slot per line together with
    /// the hash keys.
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        if !f.alternate() {
            return write!(f, "{}", self.slots.iter().map(|values| format!("{{{}}}", values.iter().join(", "))).join(" "));
        }

        writeln!(f, "KleeneState {{")?;
        for (i, values) in self.slots.iter().enumerate() {
            writeln!(f, "    [{i}]: {{{}}}", values.iter().join(", "))?;
        }
        match self.full_hash_key() {
            Some(key) => writeln!(f, "    hash key: {key}")?,
            None => writeln!(f, "    hash key: <none>")?,
        }
        writeln!(f, "    fluent hash keys: [{}]", self.fluent_hash_keys.iter().join(", "))?;
        writeln!(f, "}}")
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::tests::example_layout;


    /// Builds a Kleene state over the example layout with the given possible values per slot.
    fn make_kleene<'l>(layout: &'l FluentLayout, slots: [&[f64]; 3]) -> KleeneState<'l> {
        let mut state = KleeneState::new(layout);
        for (i, values) in slots.into_iter().enumerate() {
            state[i].extend(values.iter().copied().map(FluentValue));
        }
        state
    }


    #[test]
    fn test_kleene_from_state() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let layout = example_layout();
        let state = State::with_values(&layout, vec![1.0, 2.0], vec![1.0], 3);
        let kleene = KleeneState::from_state(&state);
        assert_eq!(kleene.len(), 3);
        for (i, value) in [1.0, 2.0, 1.0].into_iter().enumerate() {
            assert_eq!(kleene[i].len(), 1);
            assert!(kleene[i].contains(&FluentValue(value)));
        }
        assert_eq!(kleene.full_hash_key(), None);
        assert_eq!(kleene.to_string(), "{1} {2} {1}");
    }

    #[test]
    #[should_panic]
    fn test_kleene_out_of_range() {
        let layout = example_layout();
        let kleene = KleeneState::new(&layout);
        let _ = &kleene[3];
    }

    #[test]
    fn test_kleene_merge() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let layout = example_layout();
        let mut a = make_kleene(&layout, [&[0.0, 1.0], &[0.0], &[0.0]]);
        let b = make_kleene(&layout, [&[1.0, 2.0], &[1.0], &[0.0]]);
        a.compute_full_hash_key();
        assert!(a.full_hash_key().is_some());

        a |= &b;
        assert_eq!(a[0].iter().map(|v| v.get()).collect::<Vec<f64>>(), vec![0.0, 1.0, 2.0]);
        assert_eq!(a[1].len(), 2);
        assert_eq!(a[2].len(), 1);
        assert_eq!(a.full_hash_key(), None);
        assert_eq!(a.to_string(), "{0, 1, 2} {0, 1} {0}");

        // Non-mutating merges leave both sides alone
        let c = make_kleene(&layout, [&[1.0], &[2.0], &[1.0]]);
        let merged = &b | &c;
        assert_eq!(merged.to_string(), "{1, 2} {1, 2} {0, 1}");
        assert_eq!(b.to_string(), "{1, 2} {1} {0}");
        assert_eq!(c.to_string(), "{1} {2} {1}");
    }

    #[test]
    #[should_panic]
    fn test_kleene_merge_other_layout() {
        let layout = example_layout();
        let other = example_layout();
        let mut a = KleeneState::new(&layout);
        a.merge_into(&KleeneState::new(&other));
    }

    #[test]
    fn test_kleene_full_hash_key() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        // Bases are 21, 3 and 1, a singleton {v} contributes (2^v - 1) * base
        let layout = example_layout();
        let state = State::with_values(&layout, vec![1.0, 2.0], vec![1.0], 3);
        let mut kleene = KleeneState::from_state(&state);
        kleene.compute_full_hash_key();
        assert_eq!(kleene.full_hash_key(), Some(21 + 3 * 3 + 1));

        // Sets contribute their whole mask
        let mut kleene = make_kleene(&layout, [&[0.0, 1.0], &[0.0, 1.0, 2.0], &[0.0]]);
        kleene.compute_full_hash_key();
        assert_eq!(kleene.full_hash_key(), Some(2 * 21 + 6 * 3));

        // Empty slots make the key negative
        let mut kleene = KleeneState::new(&layout);
        kleene.compute_full_hash_key();
        assert_eq!(kleene.full_hash_key(), None);

        // Every non-empty combination gets its own key
        let subsets = |size: u32| (1u32..(1 << size)).map(|mask| (0..size).filter(|v| (mask >> *v) & 1 == 1).map(f64::from).collect::<Vec<f64>>()).collect::<Vec<Vec<f64>>>();
        let mut keys: Vec<i64> = Vec::new();
        for (s0, s1, s2) in itertools::iproduct!(subsets(2), subsets(3), subsets(2)) {
            let mut kleene = make_kleene(&layout, [&s0, &s1, &s2]);
            kleene.compute_full_hash_key();
            keys.extend(kleene.full_hash_key());
        }
        keys.sort();
        assert_eq!(keys, (0..3 * 7 * 3).collect::<Vec<i64>>());
    }

    #[test]
    #[should_panic]
    fn test_kleene_full_hash_key_infeasible() {
        let layout = FluentLayout::unhashed(2, 1);
        let state = State::new(&layout, 0);
        KleeneState::from_state(&state).compute_full_hash_key();
    }

    #[test]
    fn test_kleene_fluent_hash_keys() {
        // Slot 0 depends on fluent 0 (coefficient 1) and fluent 1 (coefficient 4)
        let layout = example_layout();
        let state = State::with_values(&layout, vec![1.0, 2.0], vec![1.0], 3);
        let mut kleene = KleeneState::from_state(&state);
        kleene.compute_fluent_hash_keys();
        assert_eq!(kleene.fluent_hash_keys(), &[1 + 3 * 4]);

        // {0} has multiplier 0 and is skipped, as are empty slots
        let mut kleene = make_kleene(&layout, [&[0.0], &[], &[1.0]]);
        kleene.compute_fluent_hash_keys();
        assert_eq!(kleene.fluent_hash_key(0), 0);
    }

    #[test]
    fn test_kleene_fluent_hash_keys_wrap() {
        let layout = FluentLayout::builder(1, 0).kleene_hashed_fluent_keys(1).kleene_incremental_keys([vec![(0, i64::MAX)]]).build().unwrap();
        let mut kleene = KleeneState::new(&layout);
        kleene[0].insert(FluentValue(2.0));
        kleene.compute_fluent_hash_keys();
        assert_eq!(kleene.fluent_hash_key(0), i64::MAX.wrapping_mul(3));
    }

    #[test]
    fn test_kleene_eq() {
        let layout = example_layout();
        let mut a = make_kleene(&layout, [&[0.0, 1.0], &[2.0], &[1.0]]);
        let mut b = make_kleene(&layout, [&[1.0, 0.0], &[2.0], &[1.0]]);
        let c = make_kleene(&layout, [&[0.0], &[2.0], &[1.0]]);
        assert!(a == b);
        assert!(a != c);

        // Same sets, same keys
        a.compute_full_hash_key();
        b.compute_full_hash_key();
        assert_eq!(a.full_hash_key(), b.full_hash_key());
        assert!(a == b);

        // One-sided keys fall back to the sets
        assert!(a != c);
    }

    proptest! {
        #[test]
        fn test_kleene_merge_laws(
            a in proptest::collection::vec(proptest::collection::btree_set(0u8..3, 0..3), 3),
            b in proptest::collection::vec(proptest::collection::btree_set(0u8..3, 0..3), 3),
        ) {
            let layout = example_layout();
            let make = |sets: &[BTreeSet<u8>]| {
                let mut state = KleeneState::new(&layout);
                for (i, set) in sets.iter().enumerate() {
                    state[i].extend(set.iter().map(|v| FluentValue(f64::from(*v))));
                }
                state
            };
            let (a, b) = (make(a.as_slice()), make(b.as_slice()));

            let ab = &a | &b;
            prop_assert!(ab == &b | &a);
            prop_assert!(&a | &ab == ab);
            prop_assert!(&ab | &ab == ab);
            for i in 0..ab.len() {
                prop_assert!(a[i].is_subset(&ab[i]) && b[i].is_subset(&ab[i]));
            }
        }
    }
}
