//  LAYOUT.rs
//    by Lut99
//
//  Created:
//    13 Oct 2026, 14:40:52
//  Last edited:
//    15 Oct 2026, 16:12:30
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the [`FluentLayout`], the immutable configuration shared by all
//!   states of a single planning task.
//!
//!   The domain loader fills in the fluent counts and hash tables once,
//!   before any state is created. Afterwards, every state holds a shared
//!   reference to it and only ever reads it.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use enum_debug::EnumDebug;

use crate::log::{debug, warn};


/***** ERRORS *****/
/// Defines errors found when validating a [`FluentLayout`].
///
/// These are all inconsistencies in the tables provided by the domain loader, and should be
/// treated as fatal at setup time.
#[derive(Debug, EnumDebug)]
pub enum LayoutError {
    /// The number of per-fluent hash base tables did not match the number of fluents.
    HashBasesCount { kind: FluentKind, expected: usize, got: usize },
    /// A fluent had no hash bases even though state hashing is feasible.
    EmptyHashBases { kind: FluentKind, fluent: usize },
    /// The number of per-fluent incremental key lists did not match the number of fluents.
    IncrementalKeysCount { kind: FluentKind, expected: usize, got: usize },
    /// An incremental key referred to a slot that does not exist.
    SlotOutOfRange { kind: FluentKind, fluent: usize, slot: usize, slots: usize },
}
impl Display for LayoutError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::HashBasesCount { kind, expected, got } => {
                write!(f, "Expected hash bases for {expected} {kind} fluent(s), got {got}")
            },
            Self::EmptyHashBases { kind, fluent } => {
                write!(f, "{kind} fluent {fluent} has no hash bases, but state hashing is marked as feasible")
            },
            Self::IncrementalKeysCount { kind, expected, got } => {
                write!(f, "Expected incremental keys for {expected} {kind} fluent(s), got {got}")
            },
            Self::SlotOutOfRange { kind, fluent, slot, slots } => {
                write!(f, "{kind} fluent {fluent} updates fluent hash key slot {slot}, but there are only {slots} slot(s)")
            },
        }
    }
}
impl error::Error for LayoutError {}





/***** AUXILLARY *****/
/// Which set of fluents a table describes.
#[derive(Clone, Copy, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum FluentKind {
    /// The deterministic fluents of a [`State`](crate::state::State).
    Deterministic,
    /// The probabilistic fluents of a [`State`](crate::state::State).
    Probabilistic,
    /// The combined fluents of a [`KleeneState`](crate::kleene::KleeneState).
    Kleene,
}
impl Display for FluentKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Deterministic => write!(f, "deterministic"),
            Self::Probabilistic => write!(f, "probabilistic"),
            Self::Kleene => write!(f, "Kleene"),
        }
    }
}

/// A single entry in an incremental key map.
///
/// States with a fluent set to `v` add `v * coefficient` to the fluent hash key in `slot`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IncrementalKey {
    /// The index of the fluent hash key (i.e., dependent formula) that is updated.
    pub slot: usize,
    /// The coefficient with which the fluent's value is multiplied.
    pub coefficient: i64,
}
impl From<(usize, i64)> for IncrementalKey {
    #[inline]
    fn from((slot, coefficient): (usize, i64)) -> Self { Self { slot, coefficient } }
}





/***** HELPER FUNCTIONS *****/
/// Checks that every key in the given map refers to an existing slot.
fn check_slots(kind: FluentKind, map: &[Vec<IncrementalKey>], slots: usize) -> Result<(), LayoutError> {
    for (fluent, keys) in map.iter().enumerate() {
        if let Some(key) = keys.iter().find(|k| k.slot >= slots) {
            return Err(LayoutError::SlotOutOfRange { kind, fluent, slot: key.slot, slots });
        }
    }
    Ok(())
}

/// Checks that a per-fluent table has one entry per fluent.
fn check_count<T>(table: &[T], expected: usize, err: impl FnOnce(usize) -> LayoutError) -> Result<(), LayoutError> {
    if table.len() != expected { Err(err(table.len())) } else { Ok(()) }
}





/***** LIBRARY *****/
/// The hashing configuration of [`KleeneState`](crate::kleene::KleeneState)s.
///
/// This is configured independently from the scalar tables in the [`FluentLayout`], even though
/// it describes the same fluents (deterministic ones first, then probabilistic ones).
#[derive(Clone, Debug)]
pub struct KleeneHashing {
    /// Whether full Kleene state hash keys fit in an `i64`.
    pub(crate) hashing_feasible: bool,
    /// One base per fluent with which the fluent's value mask is multiplied.
    pub(crate) hash_bases: Vec<i64>,
    /// Per fluent, which fluent hash keys it updates.
    pub(crate) incremental_keys: Vec<Vec<IncrementalKey>>,
    /// The number of fluent hash key slots.
    pub(crate) num_hashed_fluent_keys: usize,
}
impl KleeneHashing {
    /// Whether full hash keys can be computed for Kleene states.
    #[inline]
    pub const fn hashing_feasible(&self) -> bool { self.hashing_feasible }

    /// The base of the given fluent.
    #[inline]
    #[track_caller]
    pub fn hash_base(&self, fluent: usize) -> i64 { self.hash_bases[fluent] }

    /// The fluent hash keys updated by the given fluent.
    #[inline]
    #[track_caller]
    pub fn incremental_keys(&self, fluent: usize) -> &[IncrementalKey] { &self.incremental_keys[fluent] }

    /// The number of fluent hash key slots.
    #[inline]
    pub const fn num_hashed_fluent_keys(&self) -> usize { self.num_hashed_fluent_keys }
}



/// The layout of all states in one planning task.
///
/// Describes how many fluents there are, and how their values map to hash keys. There is no
/// global instance; the domain loader builds one with a [`FluentLayoutBuilder`] and hands out
/// shared references to it.
#[derive(Clone, Debug)]
pub struct FluentLayout {
    /// The number of deterministic fluents.
    num_deterministic: usize,
    /// The number of probabilistic fluents.
    num_probabilistic: usize,
    /// The number of fluent hash key slots (one per formula that depends on the state).
    num_hashed_fluent_keys: usize,

    /// Whether full state hash keys fit in an `i64`.
    hashing_feasible: bool,
    /// Per deterministic fluent, per value, what it adds to the full hash key.
    hash_bases_det: Vec<Vec<i64>>,
    /// Per probabilistic fluent, per value, what it adds to the full hash key.
    hash_bases_prob: Vec<Vec<i64>>,

    /// Per deterministic fluent, which fluent hash keys it updates.
    incremental_keys_det: Vec<Vec<IncrementalKey>>,
    /// Per probabilistic fluent, which fluent hash keys it updates.
    incremental_keys_prob: Vec<Vec<IncrementalKey>>,

    /// The separate hashing configuration for Kleene states.
    kleene: KleeneHashing,
}

// Constructors
impl FluentLayout {
    /// Starts building a new FluentLayout.
    ///
    /// # Arguments
    /// - `num_deterministic`: The number of deterministic fluents.
    /// - `num_probabilistic`: The number of probabilistic fluents.
    ///
    /// # Returns
    /// A [`FluentLayoutBuilder`] for a layout without any hashing.
    #[inline]
    pub fn builder(num_deterministic: usize, num_probabilistic: usize) -> FluentLayoutBuilder {
        FluentLayoutBuilder::new(num_deterministic, num_probabilistic)
    }

    /// Creates a layout without any hashing.
    ///
    /// States over this layout always compare by value.
    #[inline]
    pub fn unhashed(num_deterministic: usize, num_probabilistic: usize) -> Self {
        Self {
            num_deterministic,
            num_probabilistic,
            num_hashed_fluent_keys: 0,
            hashing_feasible: false,
            hash_bases_det: Vec::new(),
            hash_bases_prob: Vec::new(),
            incremental_keys_det: vec![Vec::new(); num_deterministic],
            incremental_keys_prob: vec![Vec::new(); num_probabilistic],
            kleene: KleeneHashing {
                hashing_feasible: false,
                hash_bases: Vec::new(),
                incremental_keys: vec![Vec::new(); num_deterministic + num_probabilistic],
                num_hashed_fluent_keys: 0,
            },
        }
    }
}

// Accessors
impl FluentLayout {
    #[inline]
    pub const fn num_deterministic(&self) -> usize { self.num_deterministic }

    #[inline]
    pub const fn num_probabilistic(&self) -> usize { self.num_probabilistic }

    /// The total number of fluents, i.e., the number of slots in a
    /// [`KleeneState`](crate::kleene::KleeneState).
    #[inline]
    pub const fn state_size(&self) -> usize { self.num_deterministic + self.num_probabilistic }

    #[inline]
    pub const fn num_hashed_fluent_keys(&self) -> usize { self.num_hashed_fluent_keys }

    /// Whether full state hash keys can be computed.
    ///
    /// This is decided once for the whole task, never per state.
    #[inline]
    pub const fn hashing_feasible(&self) -> bool { self.hashing_feasible }

    /// What the given deterministic fluent adds to the full hash key when it has the given value.
    ///
    /// # Panics
    /// This function panics if hashing is infeasible, or if either index is out-of-range.
    #[inline]
    #[track_caller]
    pub fn hash_base_det(&self, fluent: usize, value: usize) -> i64 {
        assert!(self.hashing_feasible, "Cannot get hash bases of a layout for which state hashing is infeasible");
        self.hash_bases_det[fluent][value]
    }

    /// What the given probabilistic fluent adds to the full hash key when it has the given value.
    ///
    /// # Panics
    /// This function panics if hashing is infeasible, or if either index is out-of-range.
    #[inline]
    #[track_caller]
    pub fn hash_base_prob(&self, fluent: usize, value: usize) -> i64 {
        assert!(self.hashing_feasible, "Cannot get hash bases of a layout for which state hashing is infeasible");
        self.hash_bases_prob[fluent][value]
    }

    /// The fluent hash keys updated by the given deterministic fluent.
    #[inline]
    #[track_caller]
    pub fn incremental_keys_det(&self, fluent: usize) -> &[IncrementalKey] { &self.incremental_keys_det[fluent] }

    /// The fluent hash keys updated by the given probabilistic fluent.
    #[inline]
    #[track_caller]
    pub fn incremental_keys_prob(&self, fluent: usize) -> &[IncrementalKey] { &self.incremental_keys_prob[fluent] }

    /// The hashing configuration of Kleene states over this layout.
    #[inline]
    pub const fn kleene(&self) -> &KleeneHashing { &self.kleene }
}



/// Builds a [`FluentLayout`].
///
/// Everything not given defaults to "no hashing": no full hash keys and no fluent hash keys.
#[derive(Clone, Debug)]
pub struct FluentLayoutBuilder {
    num_deterministic: usize,
    num_probabilistic: usize,
    num_hashed_fluent_keys: usize,
    hash_bases: Option<(Vec<Vec<i64>>, Vec<Vec<i64>>)>,
    incremental_keys_det: Vec<Vec<IncrementalKey>>,
    incremental_keys_prob: Vec<Vec<IncrementalKey>>,
    kleene_num_hashed_fluent_keys: usize,
    kleene_hash_bases: Option<Vec<i64>>,
    kleene_incremental_keys: Vec<Vec<IncrementalKey>>,
}

// Constructors
impl FluentLayoutBuilder {
    /// Constructor for the FluentLayoutBuilder.
    ///
    /// # Arguments
    /// - `num_deterministic`: The number of deterministic fluents.
    /// - `num_probabilistic`: The number of probabilistic fluents.
    ///
    /// # Returns
    /// A new builder that would produce a layout without any hashing.
    #[inline]
    pub fn new(num_deterministic: usize, num_probabilistic: usize) -> Self {
        Self {
            num_deterministic,
            num_probabilistic,
            num_hashed_fluent_keys: 0,
            hash_bases: None,
            incremental_keys_det: vec![Vec::new(); num_deterministic],
            incremental_keys_prob: vec![Vec::new(); num_probabilistic],
            kleene_num_hashed_fluent_keys: 0,
            kleene_hash_bases: None,
            kleene_incremental_keys: vec![Vec::new(); num_deterministic + num_probabilistic],
        }
    }

    /// Constructor for a FluentLayoutBuilder that derives positional hash bases from the domain
    /// size of every fluent.
    ///
    /// Every fluent `i` with domain size `d_i` gets `base_i = d_{i+1} * ... * d_{n-1}`
    /// (deterministic fluents first), and contributes `v * base_i` for value `v`. The first fluent
    /// is thus the most significant one, so full hash keys order states the same way as comparing
    /// their values lexicographically does. Kleene bases use a radix of `2^d_i - 1` instead, which
    /// is the number of non-empty value sets of that fluent. If the product overflows an `i64`,
    /// the respective hashing is marked infeasible.
    ///
    /// # Arguments
    /// - `det_domains`: The domain size of every deterministic fluent.
    /// - `prob_domains`: The domain size of every probabilistic fluent.
    ///
    /// # Returns
    /// A new builder with both kinds of full state hashing configured (if feasible).
    ///
    /// # Panics
    /// This function panics if any of the domains is empty.
    #[track_caller]
    pub fn mixed_radix(det_domains: &[usize], prob_domains: &[usize]) -> Self {
        if det_domains.iter().chain(prob_domains).any(|d| *d == 0) {
            panic!("Fluent domains must contain at least one value");
        }
        let mut builder = Self::new(det_domains.len(), prob_domains.len());
        let state_size: usize = det_domains.len() + prob_domains.len();

        // Scalar bases, `v * base` per value, built from the least significant fluent up
        let mut tables: Vec<Vec<i64>> = Vec::with_capacity(state_size);
        let mut base: Option<i64> = Some(1);
        for &size in det_domains.iter().chain(prob_domains).rev() {
            let Some(b) = base else { break };
            base = i64::try_from(size).ok().and_then(|radix| b.checked_mul(radix));
            if base.is_some() {
                tables.push((0..size as i64).map(|v| v * b).collect());
            }
        }
        if base.is_some() {
            tables.reverse();
            let prob: Vec<Vec<i64>> = tables.split_off(det_domains.len());
            builder = builder.hash_bases(tables, prob);
        } else {
            warn!("State space of {state_size} fluent(s) is too large to hash; states will be compared by value");
        }

        // Kleene bases, one per fluent and in the same significance order
        let mut kleene_bases: Vec<i64> = Vec::with_capacity(state_size);
        let mut kleene_base: Option<i64> = Some(1);
        for &size in det_domains.iter().chain(prob_domains).rev() {
            let Some(b) = kleene_base else { break };
            kleene_bases.push(b);
            kleene_base = u32::try_from(size).ok().and_then(|s| 1i64.checked_shl(s)).filter(|r| *r > 0).and_then(|r| b.checked_mul(r - 1));
        }
        if kleene_base.is_some() {
            kleene_bases.reverse();
            builder = builder.kleene_hash_bases(kleene_bases);
        } else {
            warn!("Kleene state space of {state_size} fluent(s) is too large to hash");
        }

        builder
    }
}

// Building
impl FluentLayoutBuilder {
    /// Sets the number of fluent hash key slots of scalar states.
    #[inline]
    pub fn hashed_fluent_keys(mut self, slots: usize) -> Self {
        self.num_hashed_fluent_keys = slots;
        self
    }

    /// Makes full state hashing feasible by giving the per-value bases of every fluent.
    ///
    /// # Arguments
    /// - `det`: For every deterministic fluent, what each of its values adds to the hash key.
    /// - `prob`: For every probabilistic fluent, what each of its values adds to the hash key.
    #[inline]
    pub fn hash_bases(mut self, det: Vec<Vec<i64>>, prob: Vec<Vec<i64>>) -> Self {
        self.hash_bases = Some((det, prob));
        self
    }

    /// Sets which fluent hash keys every fluent updates.
    ///
    /// # Arguments
    /// - `det`: For every deterministic fluent, a list of `(slot, coefficient)`-pairs.
    /// - `prob`: For every probabilistic fluent, a list of `(slot, coefficient)`-pairs.
    pub fn incremental_keys(
        mut self,
        det: impl IntoIterator<Item = impl IntoIterator<Item = (usize, i64)>>,
        prob: impl IntoIterator<Item = impl IntoIterator<Item = (usize, i64)>>,
    ) -> Self {
        self.incremental_keys_det = det.into_iter().map(|keys| keys.into_iter().map(IncrementalKey::from).collect::<Vec<IncrementalKey>>()).collect();
        self.incremental_keys_prob = prob.into_iter().map(|keys| keys.into_iter().map(IncrementalKey::from).collect::<Vec<IncrementalKey>>()).collect();
        self
    }

    /// Sets the number of fluent hash key slots of Kleene states.
    #[inline]
    pub fn kleene_hashed_fluent_keys(mut self, slots: usize) -> Self {
        self.kleene_num_hashed_fluent_keys = slots;
        self
    }

    /// Makes full Kleene state hashing feasible by giving one base per fluent.
    #[inline]
    pub fn kleene_hash_bases(mut self, bases: Vec<i64>) -> Self {
        self.kleene_hash_bases = Some(bases);
        self
    }

    /// Sets which Kleene fluent hash keys every fluent updates (deterministic fluents first).
    pub fn kleene_incremental_keys(mut self, keys: impl IntoIterator<Item = impl IntoIterator<Item = (usize, i64)>>) -> Self {
        self.kleene_incremental_keys = keys.into_iter().map(|keys| keys.into_iter().map(IncrementalKey::from).collect::<Vec<IncrementalKey>>()).collect();
        self
    }

    /// Validates the tables and builds the [`FluentLayout`].
    ///
    /// # Returns
    /// A new FluentLayout that can be shared with every state of the task.
    ///
    /// # Errors
    /// This function errors if any of the tables does not have one entry per fluent, if a fluent
    /// has no hash bases while hashing is feasible, or if an incremental key refers to a slot
    /// that does not exist.
    pub fn build(self) -> Result<FluentLayout, LayoutError> {
        let Self {
            num_deterministic,
            num_probabilistic,
            num_hashed_fluent_keys,
            hash_bases,
            incremental_keys_det,
            incremental_keys_prob,
            kleene_num_hashed_fluent_keys,
            kleene_hash_bases,
            kleene_incremental_keys,
        } = self;
        let state_size: usize = num_deterministic + num_probabilistic;

        // Scalar tables
        let hashing_feasible: bool = hash_bases.is_some();
        let (hash_bases_det, hash_bases_prob) = hash_bases.unwrap_or_default();
        if hashing_feasible {
            for (kind, bases, expected) in
                [(FluentKind::Deterministic, &hash_bases_det, num_deterministic), (FluentKind::Probabilistic, &hash_bases_prob, num_probabilistic)]
            {
                check_count(bases, expected, |got| LayoutError::HashBasesCount { kind, expected, got })?;
                if let Some(fluent) = bases.iter().position(Vec::is_empty) {
                    return Err(LayoutError::EmptyHashBases { kind, fluent });
                }
            }
        }
        check_count(&incremental_keys_det, num_deterministic, |got| LayoutError::IncrementalKeysCount {
            kind: FluentKind::Deterministic,
            expected: num_deterministic,
            got,
        })?;
        check_count(&incremental_keys_prob, num_probabilistic, |got| LayoutError::IncrementalKeysCount {
            kind: FluentKind::Probabilistic,
            expected: num_probabilistic,
            got,
        })?;
        check_slots(FluentKind::Deterministic, &incremental_keys_det, num_hashed_fluent_keys)?;
        check_slots(FluentKind::Probabilistic, &incremental_keys_prob, num_hashed_fluent_keys)?;

        // Kleene tables
        let kleene_hashing_feasible: bool = kleene_hash_bases.is_some();
        let kleene_hash_bases: Vec<i64> = kleene_hash_bases.unwrap_or_default();
        if kleene_hashing_feasible {
            check_count(&kleene_hash_bases, state_size, |got| LayoutError::HashBasesCount { kind: FluentKind::Kleene, expected: state_size, got })?;
        }
        check_count(&kleene_incremental_keys, state_size, |got| LayoutError::IncrementalKeysCount {
            kind: FluentKind::Kleene,
            expected: state_size,
            got,
        })?;
        check_slots(FluentKind::Kleene, &kleene_incremental_keys, kleene_num_hashed_fluent_keys)?;

        debug!(
            "Built fluent layout with {num_deterministic} deterministic and {num_probabilistic} probabilistic fluent(s), {num_hashed_fluent_keys} \
             fluent hash key(s) (state hashing {}, Kleene hashing {})",
            if hashing_feasible { "feasible" } else { "infeasible" },
            if kleene_hashing_feasible { "feasible" } else { "infeasible" },
        );
        Ok(FluentLayout {
            num_deterministic,
            num_probabilistic,
            num_hashed_fluent_keys,
            hashing_feasible,
            hash_bases_det,
            hash_bases_prob,
            incremental_keys_det,
            incremental_keys_prob,
            kleene: KleeneHashing {
                hashing_feasible: kleene_hashing_feasible,
                hash_bases: kleene_hash_bases,
                incremental_keys: kleene_incremental_keys,
                num_hashed_fluent_keys: kleene_num_hashed_fluent_keys,
            },
        })
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_mixed_radix_bases() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let layout: FluentLayout = FluentLayoutBuilder::mixed_radix(&[2, 3], &[2]).build().unwrap();
        assert!(layout.hashing_feasible());
        // The first fluent is the most significant one
        assert_eq!(layout.hash_base_det(0, 1), 6);
        assert_eq!(layout.hash_base_det(1, 1), 2);
        assert_eq!(layout.hash_base_det(1, 2), 4);
        assert_eq!(layout.hash_base_prob(0, 1), 1);

        // Kleene radices are `2^d - 1`: 3, 7 and 3
        assert!(layout.kleene().hashing_feasible());
        assert_eq!(layout.kleene().hash_base(0), 21);
        assert_eq!(layout.kleene().hash_base(1), 3);
        assert_eq!(layout.kleene().hash_base(2), 1);
    }

    #[test]
    fn test_mixed_radix_overflow() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let layout: FluentLayout = FluentLayoutBuilder::mixed_radix(&[1 << 20; 4], &[]).build().unwrap();
        assert!(!layout.hashing_feasible());
        assert!(!layout.kleene().hashing_feasible());
        assert_eq!(layout.num_deterministic(), 4);
    }

    #[test]
    fn test_unhashed() {
        let layout: FluentLayout = FluentLayout::unhashed(2, 1);
        assert!(!layout.hashing_feasible());
        assert!(!layout.kleene().hashing_feasible());
        assert_eq!(layout.state_size(), 3);
        assert!(layout.incremental_keys_det(1).is_empty());
        assert!(layout.kleene().incremental_keys(2).is_empty());
    }

    #[test]
    #[should_panic]
    fn test_hash_base_infeasible() { FluentLayout::unhashed(1, 0).hash_base_det(0, 0); }

    #[test]
    fn test_build_errors() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let err = FluentLayout::builder(2, 1).hash_bases(vec![vec![0, 1]], vec![vec![0, 2]]).build().unwrap_err();
        assert!(matches!(err, LayoutError::HashBasesCount { kind: FluentKind::Deterministic, expected: 2, got: 1 }));

        let err = FluentLayout::builder(1, 1).hash_bases(vec![vec![0, 1]], vec![vec![]]).build().unwrap_err();
        assert!(matches!(err, LayoutError::EmptyHashBases { kind: FluentKind::Probabilistic, fluent: 0 }));

        let err = FluentLayout::builder(1, 1).hashed_fluent_keys(1).incremental_keys([vec![(0, 1)]], [vec![(1, 1)]]).build().unwrap_err();
        assert!(matches!(err, LayoutError::SlotOutOfRange { kind: FluentKind::Probabilistic, fluent: 0, slot: 1, slots: 1 }));

        let err = FluentLayout::builder(1, 1).incremental_keys([Vec::<(usize, i64)>::new()], Vec::<Vec<(usize, i64)>>::new()).build().unwrap_err();
        assert!(matches!(err, LayoutError::IncrementalKeysCount { kind: FluentKind::Probabilistic, expected: 1, got: 0 }));

        let err = FluentLayout::builder(1, 1).kleene_hash_bases(vec![1]).build().unwrap_err();
        assert!(matches!(err, LayoutError::HashBasesCount { kind: FluentKind::Kleene, expected: 2, got: 1 }));
        assert_eq!(err.to_string(), "Expected hash bases for 2 Kleene fluent(s), got 1");
    }

    #[test]
    fn test_build_incremental_keys() {
        let layout: FluentLayout = FluentLayout::builder(2, 1)
            .hashed_fluent_keys(2)
            .incremental_keys([vec![(0, 1)], vec![(0, 2), (1, 1)]], [vec![(1, 3)]])
            .build()
            .unwrap();
        assert_eq!(layout.num_hashed_fluent_keys(), 2);
        assert_eq!(layout.incremental_keys_det(1), &[IncrementalKey { slot: 0, coefficient: 2 }, IncrementalKey { slot: 1, coefficient: 1 }]);
        assert_eq!(layout.incremental_keys_prob(0), &[IncrementalKey { slot: 1, coefficient: 3 }]);
    }
}
