//  INSPECT.rs
//    by Lut99
//
//  Created:
//    15 Oct 2026, 15:02:11
//  Last edited:
//    15 Oct 2026, 18:12:40
//  Auto updated?
//    Yes
//
//  Description:
//!   Builds a layout for fluents of the given domain sizes, enumerates
//!   every state in it and shows how they hash, compare and merge.
//

use std::collections::BTreeSet;

use clap::Parser;
use console::style;
use error_trace::toplevel;
use fluent_states::{FluentLayout, FluentLayoutBuilder, IgnoringRemainingSteps, KleeneState, Ordered, State, StatePool};
use humanlog::{DebugMode, HumanLogger};
use itertools::Itertools as _;
use log::{debug, error, info, warn};


/***** CONSTANTS *****/
/// The maximum number of states that are printed.
pub const MAX_PRINTED: usize = 16;





/***** ARGUMENTS *****/
/// Defines arguments to the inspector.
#[derive(Debug, Parser)]
pub struct Arguments {
    /// If given, enables more verbose logging.
    #[clap(long, global = true)]
    debug: bool,

    /// The domain size of every deterministic fluent, e.g., `2,3`.
    #[clap(short, long, value_delimiter = ',')]
    det:   Vec<usize>,
    /// The domain size of every probabilistic fluent, e.g., `2`.
    #[clap(short, long, value_delimiter = ',')]
    prob:  Vec<usize>,
    /// The number of steps to the horizon of every state.
    #[clap(short, long, default_value = "1")]
    steps: i32,
}





/***** ENTRYPOINT *****/
fn main() {
    // Parse the CLI arguments
    let args = Arguments::parse();

    // Setup the logger
    if let Err(err) = HumanLogger::terminal(if args.debug { DebugMode::Full } else { DebugMode::HumanFriendly }).init() {
        eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
    }
    info!("fluent-states {} - v{}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));

    // Early quit if there is nothing to enumerate
    if args.det.is_empty() && args.prob.is_empty() {
        println!("No fluents are given; nothing to do.");
        std::process::exit(0);
    }
    if let Some(i) = args.det.iter().chain(&args.prob).position(|d| *d == 0) {
        error!("Fluent {i} has an empty domain; every fluent needs at least one value");
        std::process::exit(1);
    }

    // Build the layout
    debug!("Building layout for domains {:?} and {:?}...", args.det, args.prob);
    let layout: FluentLayout = match FluentLayoutBuilder::mixed_radix(&args.det, &args.prob).build() {
        Ok(layout) => layout,
        Err(err) => {
            error!("{}", toplevel!(("Failed to build layout for {} fluent(s)", args.det.len() + args.prob.len()), err));
            std::process::exit(1);
        },
    };

    // Enumerate all states, reusing them through a pool
    let mut pool: StatePool = StatePool::new(&layout);
    let mut states: BTreeSet<Ordered<State, IgnoringRemainingSteps>> = BTreeSet::new();
    let mut keys: BTreeSet<i64> = BTreeSet::new();
    let mut kleene: Option<KleeneState> = None;
    for values in args.det.iter().chain(&args.prob).map(|d| 0..*d).multi_cartesian_product() {
        let mut state: State = pool.acquire(args.steps);
        for (i, value) in values.into_iter().enumerate() {
            if i < layout.num_deterministic() {
                *state.deterministic_fluent_mut(i) = value as f64;
            } else {
                *state.probabilistic_fluent_mut(i - layout.num_deterministic()) = value as f64;
            }
        }
        if layout.hashing_feasible() {
            state.compute_full_hash_key();
            if let Some(key) = state.full_hash_key() {
                if !keys.insert(key) {
                    warn!("Hash key {key} of state {state} is not unique");
                }
            }
        }

        // Grow the Kleene state with it
        let seed = KleeneState::from_state(&state);
        kleene = Some(match kleene.take() {
            Some(mut kleene) => {
                kleene |= &seed;
                kleene
            },
            None => seed,
        });

        if let Some(dup) = states.replace(Ordered::new(state)) {
            warn!("State {dup} was enumerated twice");
            pool.release(dup.into_inner());
        }
    }
    debug!("Pool allocated {} state(s)", pool.allocated());

    // Show what we found
    println!("{} {} state(s)", style("Enumerated").bold().green(), states.len());
    for state in states.iter().take(MAX_PRINTED) {
        match state.get().full_hash_key() {
            Some(key) => println!("  {} {state}", style(format!("#{key:<4}")).dim()),
            None => println!("  {} {state}", style("#-   ").dim()),
        }
    }
    if states.len() > MAX_PRINTED {
        println!("  {}", style(format!("... and {} more", states.len() - MAX_PRINTED)).dim());
    }
    if layout.hashing_feasible() {
        println!(
            "{} {} unique hash key(s) in [{}]",
            style("Hashed").bold().green(),
            keys.len(),
            [keys.first(), keys.last()].into_iter().flatten().join(", ")
        );
    } else {
        println!("{} state hashing is infeasible for this layout", style("Note").bold().yellow());
    }

    // The union of everything
    if let Some(mut kleene) = kleene {
        if layout.kleene().hashing_feasible() {
            kleene.compute_full_hash_key();
        }
        println!("{} {kleene:#}", style("Merged").bold().green());
    }
}
