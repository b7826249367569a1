//  ACTION.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 12:20:16
//  Last edited:
//    14 Oct 2026, 13:05:51
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`ActionState`], one assignment to all action fluents.
//

use std::fmt::{Display, Formatter, Result as FResult};
use std::ops::{Index, IndexMut};

use itertools::Itertools as _;


/***** LIBRARY *****/
/// Represents one action, i.e., an assignment of a value to every action fluent.
///
/// The action fluents and preconditions are owned by the domain; this only refers to them.
/// Actions are enumerated once from the domain and identified by their `index` afterwards.
#[derive(Clone, Debug)]
pub struct ActionState<'d, A, P> {
    /// The index of this action in the domain's list of actions.
    pub index: usize,
    /// The value of every action fluent.
    pub settings: Vec<i32>,
    /// The action fluents that are set (i.e., non-zero) in this action.
    pub scheduled_fluents: Vec<&'d A>,
    /// The preconditions that must hold for this action to be applicable.
    pub preconditions: Vec<&'d P>,
}

// Constructors
impl<'d, A, P> ActionState<'d, A, P> {
    /// Constructor for the ActionState.
    ///
    /// # Arguments
    /// - `index`: The index of this action in the domain.
    /// - `settings`: The value of every action fluent.
    /// - `scheduled_fluents`: The action fluents that this action sets.
    /// - `preconditions`: The preconditions of this action.
    ///
    /// # Returns
    /// A new ActionState.
    #[inline]
    pub fn new(
        index: usize,
        settings: Vec<i32>,
        scheduled_fluents: impl IntoIterator<Item = &'d A>,
        preconditions: impl IntoIterator<Item = &'d P>,
    ) -> Self {
        Self { index, settings, scheduled_fluents: scheduled_fluents.into_iter().collect(), preconditions: preconditions.into_iter().collect() }
    }
}

// Accessors
impl<'d, A, P> ActionState<'d, A, P> {
    /// Whether this action sets no action fluent at all.
    #[inline]
    pub fn is_noop(&self) -> bool { self.scheduled_fluents.is_empty() }
}

// Indexing
impl<'d, A, P> Index<usize> for ActionState<'d, A, P> {
    type Output = i32;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output { &self.settings[index] }
}
impl<'d, A, P> IndexMut<usize> for ActionState<'d, A, P> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output { &mut self.settings[index] }
}

// Formatting
impl<'d, A: Display, P> Display for ActionState<'d, A, P> {
    /// Writes the scheduled action fluents, or (with `{:#}`) the index and every setting.
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        if f.alternate() {
            write!(f, "{}: [{}]", self.index, self.settings.iter().join(" "))
        } else if self.is_noop() {
            write!(f, "noop")
        } else {
            write!(f, "{}", self.scheduled_fluents.iter().join(" "))
        }
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_action_state() {
        let fluents: [&str; 2] = ["move(up)", "move(down)"];
        let preconds: [&str; 1] = ["not blocked"];

        let mut action: ActionState<&str, &str> = ActionState::new(1, vec![0, 1], [&fluents[1]], &preconds);
        assert_eq!(action[1], 1);
        assert!(!action.is_noop());
        assert!(std::ptr::eq(action.scheduled_fluents[0], &fluents[1]));
        assert_eq!(action.preconditions.len(), 1);
        assert_eq!(action.to_string(), "move(down)");
        assert_eq!(format!("{action:#}"), "1: [0 1]");

        action[0] = 1;
        assert_eq!(action.settings, vec![1, 1]);
    }

    #[test]
    fn test_action_state_noop() {
        let noop: ActionState<&str, &str> = ActionState::new(0, vec![0, 0], [], []);
        assert!(noop.is_noop());
        assert_eq!(noop.to_string(), "noop");
    }
}
