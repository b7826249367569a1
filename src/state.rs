//  STATE.rs
//    by Lut99
//
//  Created:
//    13 Oct 2026, 16:05:37
//  Last edited:
//    15 Oct 2026, 17:30:12
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the scalar [`State`], i.e., one concrete assignment of
//!   values to all fluents plus the number of steps left to the horizon.
//!
//!   Next to the values themselves, a State caches two kinds of hash keys:
//!   - A _full_ hash key, which identifies the whole state with a single
//!     integer (only if the layout says the state space is small enough);
//!     and
//!   - _Fluent_ hash keys, one per formula that depends on the state, which
//!     identify the sub-vector of fluents that formula actually reads.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::ptr;

use enum_debug::EnumDebug;
use itertools::Itertools as _;

use crate::layout::{FluentKind, FluentLayout, IncrementalKey};
use crate::log::trace;
use crate::tolerance::{double_is_greater, value_as_index};


/***** CONSTANTS *****/
/// The value of a hash key that has not been computed (yet).
pub const NO_HASH_KEY: i64 = -1;

/// The value of the remaining steps of a state that has not been bound to a horizon.
pub const NO_HORIZON: i32 = -1;





/***** ERRORS *****/
/// Defines errors that occur when building a [`State`] from given values.
#[derive(Debug, EnumDebug)]
pub enum StateError {
    /// The number of given values did not match the number of fluents in the layout.
    FluentCount { kind: FluentKind, expected: usize, got: usize },
}
impl Display for StateError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::FluentCount { kind, expected, got } => write!(f, "Expected values for {expected} {kind} fluent(s), got {got}"),
        }
    }
}
impl error::Error for StateError {}





/***** HELPER MACROS *****/
/// Implements the bounds-checked accessor pair for one kind of fluent.
macro_rules! fluent_accessors {
    ($kind:ident, $field:ident) => {
        paste::paste! {
            #[doc = concat!("Returns the value of the ", stringify!($kind), " fluent with the given index.\n\n# Panics\nThis function panics if `index` is out-of-range.")]
            #[inline]
            #[track_caller]
            pub fn [<$kind _fluent>](&self, index: usize) -> f64 {
                match self.$field.get(index) {
                    Some(value) => *value,
                    None => panic!(concat!("Index {} is out-of-range for a state with {} ", stringify!($kind), " fluent(s)"), index, self.$field.len()),
                }
            }

            #[doc = concat!("Returns a mutable reference to the value of the ", stringify!($kind), " fluent with the given index.\n\nNote that this does not invalidate any hash keys computed before.\n\n# Panics\nThis function panics if `index` is out-of-range.")]
            #[inline]
            #[track_caller]
            pub fn [<$kind _fluent_mut>](&mut self, index: usize) -> &mut f64 {
                let len: usize = self.$field.len();
                match self.$field.get_mut(index) {
                    Some(value) => value,
                    None => panic!(concat!("Index {} is out-of-range for a state with {} ", stringify!($kind), " fluent(s)"), index, len),
                }
            }

            #[doc = concat!("Returns all ", stringify!($kind), " fluent values, in order.")]
            #[inline]
            pub fn [<$kind _fluents>](&self) -> &[f64] { &self.$field }
        }
    };
}





/***** LIBRARY *****/
/// A concrete planning state.
///
/// Holds one real value per deterministic and probabilistic fluent of its [`FluentLayout`], the
/// number of steps remaining until the horizon and the (cached) hash keys.
///
/// States are meant to be reused: a search loop keeps a handful of them around and uses
/// [`State::reset()`], [`State::set_to()`] and [`State::swap()`] instead of allocating new ones.
#[derive(Clone, Debug)]
pub struct State<'l> {
    /// The layout of this state.
    layout: &'l FluentLayout,
    /// The values of the deterministic fluents.
    det: Vec<f64>,
    /// The values of the probabilistic fluents.
    prob: Vec<f64>,
    /// The number of steps until the horizon, or [`NO_HORIZON`] if unbound.
    remaining_steps: i32,
    /// One accumulated key per dependent formula.
    fluent_hash_keys: Vec<i64>,
    /// The full hash key, or [`NO_HASH_KEY`] if not computed.
    hash_key: i64,
}

// Constructors
impl<'l> State<'l> {
    /// Constructor for a State that has all fluents set to zero.
    ///
    /// # Arguments
    /// - `layout`: The [`FluentLayout`] that determines the number of fluents and hash keys.
    /// - `remaining_steps`: The number of steps until the horizon. Use [`NO_HORIZON`] if the state
    ///   is not yet bound to one.
    ///
    /// # Returns
    /// A new State with all fluents zero and no hash keys computed.
    #[inline]
    pub fn new(layout: &'l FluentLayout, remaining_steps: i32) -> Self {
        Self {
            layout,
            det: vec![0.0; layout.num_deterministic()],
            prob: vec![0.0; layout.num_probabilistic()],
            remaining_steps,
            fluent_hash_keys: vec![0; layout.num_hashed_fluent_keys()],
            hash_key: NO_HASH_KEY,
        }
    }

    /// Constructor for a State with the given fluent values.
    ///
    /// # Arguments
    /// - `layout`: The [`FluentLayout`] that determines the number of fluents and hash keys.
    /// - `det`: The values of the deterministic fluents.
    /// - `prob`: The values of the probabilistic fluents.
    /// - `remaining_steps`: The number of steps until the horizon.
    ///
    /// # Returns
    /// A new State with the given values and no hash keys computed.
    ///
    /// # Errors
    /// This function errors if the number of values given does not match the layout.
    pub fn try_with_values(layout: &'l FluentLayout, det: Vec<f64>, prob: Vec<f64>, remaining_steps: i32) -> Result<Self, StateError> {
        if det.len() != layout.num_deterministic() {
            return Err(StateError::FluentCount { kind: FluentKind::Deterministic, expected: layout.num_deterministic(), got: det.len() });
        }
        if prob.len() != layout.num_probabilistic() {
            return Err(StateError::FluentCount { kind: FluentKind::Probabilistic, expected: layout.num_probabilistic(), got: prob.len() });
        }
        Ok(Self { layout, det, prob, remaining_steps, fluent_hash_keys: vec![0; layout.num_hashed_fluent_keys()], hash_key: NO_HASH_KEY })
    }

    /// Constructor for a State with the given fluent values.
    ///
    /// Like [`State::try_with_values()`], but treats a mismatch as the bug it is.
    ///
    /// # Panics
    /// This function panics if the number of values given does not match the layout.
    #[inline]
    #[track_caller]
    pub fn with_values(layout: &'l FluentLayout, det: Vec<f64>, prob: Vec<f64>, remaining_steps: i32) -> Self {
        match Self::try_with_values(layout, det, prob, remaining_steps) {
            Ok(state) => state,
            Err(err) => panic!("Cannot create state: {err}"),
        }
    }
}

// Reuse
impl<'l> State<'l> {
    /// Makes this state a copy of another one, reusing this state's memory.
    ///
    /// # Panics
    /// This function panics if the other state is over a different layout.
    #[track_caller]
    pub fn set_to(&mut self, other: &Self) {
        assert!(ptr::eq(self.layout, other.layout), "Cannot set a state to a state of a different layout");
        self.det.copy_from_slice(&other.det);
        self.prob.copy_from_slice(&other.prob);
        self.remaining_steps = other.remaining_steps;
        self.fluent_hash_keys.copy_from_slice(&other.fluent_hash_keys);
        self.hash_key = other.hash_key;
    }

    /// Clears this state for reuse.
    ///
    /// Sets all fluents and fluent hash keys to zero, forgets the full hash key and binds the
    /// state to a new horizon. No memory is released or allocated.
    ///
    /// # Arguments
    /// - `remaining_steps`: The new number of steps until the horizon.
    pub fn reset(&mut self, remaining_steps: i32) {
        self.det.fill(0.0);
        self.prob.fill(0.0);
        self.remaining_steps = remaining_steps;
        self.fluent_hash_keys.fill(0);
        self.hash_key = NO_HASH_KEY;
    }

    /// Exchanges the contents of this state with another one.
    ///
    /// Only swaps the internal buffers, so this runs in constant time.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) { std::mem::swap(self, other) }
}

// Hashing
impl<'l> State<'l> {
    /// Computes the full hash key of this state.
    ///
    /// The key is the sum, over all fluents, of the layout's hash base for that fluent's current
    /// value. Fluent values are used as indices in those tables, so they must be small
    /// non-negative integers.
    ///
    /// # Panics
    /// This function panics if the layout says state hashing is infeasible, or if a fluent value
    /// is not a valid index in the fluent's table.
    #[track_caller]
    pub fn compute_full_hash_key(&mut self) {
        if !self.layout.hashing_feasible() {
            debug_assert_eq!(self.hash_key, NO_HASH_KEY);
            panic!("Cannot compute the full hash key of a state when state hashing is infeasible");
        }

        let det: i64 = self.det.iter().enumerate().map(|(i, v)| self.layout.hash_base_det(i, value_as_index(*v))).sum();
        let prob: i64 = self.prob.iter().enumerate().map(|(i, v)| self.layout.hash_base_prob(i, value_as_index(*v))).sum();
        self.hash_key = det + prob;
        trace!("Computed full hash key {} for state {}", self.hash_key, self);
    }

    /// Computes the fluent hash keys of this state.
    ///
    /// For every fluent with a value greater than zero, adds `value * coefficient` to every
    /// fluent hash key the layout says it updates. Contributions are _added_ to the current keys,
    /// which [`State::new()`] and [`State::reset()`] set to zero. Keys wrap around on overflow.
    ///
    /// # Panics
    /// This function panics if the layout refers to a fluent hash key that does not exist.
    #[track_caller]
    pub fn compute_fluent_hash_keys(&mut self) {
        // Borrow the layout separately from the keys
        let layout: &'l FluentLayout = self.layout;
        for (values, det) in [(&self.det, true), (&self.prob, false)] {
            for (i, value) in values.iter().enumerate() {
                if !double_is_greater(*value, 0.0) {
                    continue;
                }
                let keys: &[IncrementalKey] = if det { layout.incremental_keys_det(i) } else { layout.incremental_keys_prob(i) };
                for key in keys {
                    let slot: &mut i64 = &mut self.fluent_hash_keys[key.slot];
                    *slot = slot.wrapping_add((*value as i64).wrapping_mul(key.coefficient));
                }
            }
        }
        trace!("Computed fluent hash keys [{}] for state {}", self.fluent_hash_keys.iter().join(", "), self);
    }

    /// Returns the full hash key of this state, if it has been computed.
    #[inline]
    pub fn full_hash_key(&self) -> Option<i64> { if self.hash_key >= 0 { Some(self.hash_key) } else { None } }

    /// Returns the raw full hash key, which is [`NO_HASH_KEY`] if it has not been computed.
    #[inline]
    pub const fn raw_hash_key(&self) -> i64 { self.hash_key }

    /// Returns the fluent hash key of the given formula.
    ///
    /// # Panics
    /// This function panics if `slot` is out-of-range.
    #[inline]
    #[track_caller]
    pub fn fluent_hash_key(&self, slot: usize) -> i64 {
        match self.fluent_hash_keys.get(slot) {
            Some(key) => *key,
            None => panic!("Fluent hash key {slot} is out-of-range for a state with {} fluent hash key(s)", self.fluent_hash_keys.len()),
        }
    }

    /// Returns all fluent hash keys, in order.
    #[inline]
    pub fn fluent_hash_keys(&self) -> &[i64] { &self.fluent_hash_keys }
}

// Accessors
impl<'l> State<'l> {
    fluent_accessors!(deterministic, det);

    fluent_accessors!(probabilistic, prob);

    /// The number of steps until the horizon, or [`NO_HORIZON`].
    #[inline]
    pub const fn remaining_steps(&self) -> i32 { self.remaining_steps }

    #[inline]
    pub fn remaining_steps_mut(&mut self) -> &mut i32 { &mut self.remaining_steps }

    /// Checks whether this state is at the horizon.
    ///
    /// # Panics
    /// This function panics if the state is not bound to a horizon.
    #[inline]
    #[track_caller]
    pub fn is_terminal(&self) -> bool {
        assert!(self.remaining_steps >= 0, "Cannot check whether a state that is not bound to a horizon is terminal");
        self.remaining_steps == 0
    }

    /// The layout of this state.
    #[inline]
    pub const fn layout(&self) -> &'l FluentLayout { self.layout }
}

// Formatting
impl<'l> Display for State<'l> {
    /// Writes the state compactly on one line, or (with `{:#}`) one fluent per line together with
    /// its hash keys.
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        if !f.alternate() {
            return write!(f, "[{}] [{}] ({})", self.det.iter().join(" "), self.prob.iter().join(" "), self.remaining_steps);
        }

        writeln!(f, "State {{")?;
        for (i, value) in self.det.iter().enumerate() {
            writeln!(f, "    det[{i}]: {value}")?;
        }
        for (i, value) in self.prob.iter().enumerate() {
            writeln!(f, "    prob[{i}]: {value}")?;
        }
        writeln!(f, "    remaining steps: {}", self.remaining_steps)?;
        match self.full_hash_key() {
            Some(key) => writeln!(f, "    hash key: {key}")?,
            None => writeln!(f, "    hash key: <none>")?,
        }
        writeln!(f, "    fluent hash keys: [{}]", self.fluent_hash_keys.iter().join(", "))?;
        writeln!(f, "}}")
    }
}





/***** TESTS *****/
