//  POOL.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 11:37:05
//  Last edited:
//    15 Oct 2026, 10:26:44
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements a [`StatePool`], which hands out recycled [`State`]s so a
//!   search loop does not allocate a new one for every node it visits.
//

use std::ptr;

use crate::layout::FluentLayout;
use crate::log::trace;
use crate::state::State;


/***** LIBRARY *****/
/// Keeps released [`State`]s around for reuse.
///
/// States are owned by whoever [acquired](StatePool::acquire()) them until they are
/// [released](StatePool::release()) again, so no two trajectories ever share one.
#[derive(Debug)]
pub struct StatePool<'l> {
    /// The layout of all states in this pool.
    layout: &'l FluentLayout,
    /// The states that are free to be handed out.
    free:   Vec<State<'l>>,
    /// How many states this pool ever allocated.
    allocated: usize,
}

// Constructors
impl<'l> StatePool<'l> {
    /// Constructor for an empty StatePool.
    ///
    /// # Arguments
    /// - `layout`: The [`FluentLayout`] of all states handed out by this pool.
    ///
    /// # Returns
    /// A new StatePool that will allocate states on demand.
    #[inline]
    pub const fn new(layout: &'l FluentLayout) -> Self { Self { layout, free: Vec::new(), allocated: 0 } }

    /// Constructor for a StatePool that pre-allocates a number of states.
    ///
    /// # Arguments
    /// - `layout`: The [`FluentLayout`] of all states handed out by this pool.
    /// - `capacity`: The number of states to allocate up front.
    ///
    /// # Returns
    /// A new StatePool with `capacity` free states.
    pub fn with_capacity(layout: &'l FluentLayout, capacity: usize) -> Self {
        let free: Vec<State<'l>> = (0..capacity).map(|_| State::new(layout, crate::state::NO_HORIZON)).collect();
        Self { layout, free, allocated: capacity }
    }
}

// Collection
impl<'l> StatePool<'l> {
    /// Takes a state out of the pool.
    ///
    /// # Arguments
    /// - `remaining_steps`: The horizon to bind the state to.
    ///
    /// # Returns
    /// A [`State`] with all fluents zero and no hash keys, which is only freshly allocated if
    /// the pool ran dry.
    pub fn acquire(&mut self, remaining_steps: i32) -> State<'l> {
        match self.free.pop() {
            Some(mut state) => {
                state.reset(remaining_steps);
                state
            },
            None => {
                self.allocated += 1;
                trace!("State pool ran dry; allocating state {}", self.allocated);
                State::new(self.layout, remaining_steps)
            },
        }
    }

    /// Takes a state out of the pool and makes it a copy of the given one.
    #[inline]
    pub fn acquire_copy(&mut self, origin: &State<'l>) -> State<'l> {
        let mut state: State<'l> = self.acquire(origin.remaining_steps());
        state.set_to(origin);
        state
    }

    /// Gives a state back to the pool.
    ///
    /// # Panics
    /// This function panics if the state was built for another layout.
    #[inline]
    #[track_caller]
    pub fn release(&mut self, state: State<'l>) {
        assert!(ptr::eq(self.layout, state.layout()), "Cannot release a state into a pool of a different layout");
        self.free.push(state);
    }
}

// Accessors
impl<'l> StatePool<'l> {
    /// The number of states that can be acquired without allocating.
    #[inline]
    pub fn available(&self) -> usize { self.free.len() }

    /// The number of states this pool has allocated in total.
    #[inline]
    pub const fn allocated(&self) -> usize { self.allocated }
}





/***** TESTS *****/
