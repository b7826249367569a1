//  TESTS.rs
//    by Lut99
//
//  Created:
//    03 Dec 2024, 14:32:43
//  Last edited:
//    15 Oct 2026, 11:02:57
//  Auto updated?
//    Yes
//
//  Description:
//!   Contains some common test functions.
//

#![allow(unused)]

use crate::layout::{FluentLayout, FluentLayoutBuilder};


/***** LIBRARY *****/
/// Sets up a logger if wanted.
#[cfg(feature = "log")]
pub fn setup_logger() {
    use humanlog::{DebugMode, HumanLogger};

    // Check if the envs tell us to
    if let Ok(logger) = std::env::var("LOGGER") {
        if logger == "1" || logger == "true" {
            // Create the logger
            if let Err(err) = HumanLogger::terminal(DebugMode::Full).init() {
                eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
            }
        }
    }
}



/// Makes the layout used throughout the tests.
///
/// It has two deterministic fluents with domain sizes 2 and 3 and one probabilistic fluent with
/// domain size 2, so full hash bases are 6, 2 and 1 respectively (and Kleene bases 21, 3 and 1).
///
/// There are two fluent hash keys:
/// - slot 0 depends on `det[0]` (coefficient 1) and `det[1]` (coefficient 2); and
/// - slot 1 depends on `det[1]` (coefficient 1) and `prob[0]` (coefficient 3).
///
/// Kleene states have one fluent hash key, which depends on fluent 0 (coefficient 1) and fluent 1
/// (coefficient 4).
#[track_caller]
pub fn example_layout() -> FluentLayout {
    match FluentLayoutBuilder::mixed_radix(&[2, 3], &[2])
        .hashed_fluent_keys(2)
        .incremental_keys([vec![(0, 1)], vec![(0, 2), (1, 1)]], [vec![(1, 3)]])
        .kleene_hashed_fluent_keys(1)
        .kleene_incremental_keys([vec![(0, 1)], vec![(0, 4)], vec![]])
        .build()
    {
        Ok(layout) => layout,
        Err(err) => panic!("Failed to build example layout: {err}"),
    }
}
