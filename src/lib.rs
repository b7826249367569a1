//  LIB.rs
//    by Lut99
//
//  Created:
//    13 Oct 2026, 13:51:20
//  Last edited:
//    15 Oct 2026, 18:04:41
//  Auto updated?
//    Yes
//
//  Description:
//!   Compact, hashable representations of the states of a factored MDP,
//!   as used by a probabilistic planner.
//!
//!   There are three variants:
//!   - [`State`]s assign one value to every fluent;
//!   - [`PDState`]s assign a probability distribution to every
//!     probabilistic fluent instead; and
//!   - [`KleeneState`]s assign a _set_ of possible values to every fluent.
//!
//!   All of them are laid out according to a single [`FluentLayout`],
//!   built once by the domain loader.
//

// Declare modules
pub mod action;
pub mod distribution;
pub mod kleene;
pub mod layout;
mod log;
pub mod order;
pub mod pd_state;
pub mod pool;
pub mod state;
#[cfg(test)]
mod tests;
pub mod tolerance;

// Use some of it
pub use action::ActionState;
pub use distribution::{DiscretePD, Distribution};
pub use kleene::KleeneState;
pub use layout::{FluentLayout, FluentLayoutBuilder, LayoutError};
pub use order::{ConsideringRemainingSteps, IgnoringRemainingSteps, Ordered, StateOrder};
pub use pd_state::{PDState, PdStateOrder};
pub use pool::StatePool;
pub use state::State;
