//  LOG.rs
//    by Lut99
//
//  Created:
//    22 Mar 2024, 16:09:22
//  Last edited:
//    14 Oct 2026, 10:21:40
//  Auto updated?
//    Yes
//
//  Description:
//!   Provides [`log`]-macro counterparts that only emit anything if the
//!   crate is compiled with the `log`-feature.
//!
//!   States are mutated in the innermost loop of a search, so by default
//!   none of this ends up in the binary.
//


/***** LIBRARY *****/
/// Mirrors the `warn!()`-macro from the [`log`](https://github.com/rust-lang/log)-crate.
///
/// Without the `log`-feature, the arguments are stripped before name resolution, so they may
/// refer to things that only exist when logging is enabled.
#[allow(unused)]
macro_rules! warning {
    ($($t:tt)*) => {{
        #[cfg(feature = "log")]
        {
            ::log::warn!($($t)*);
        }
    }};
}
#[allow(unused)]
pub(crate) use warning as warn;

/// Mirrors the `debug!()`-macro from the [`log`](https://github.com/rust-lang/log)-crate.
///
/// Without the `log`-feature, the arguments are stripped before name resolution.
#[allow(unused)]
macro_rules! debug {
    ($($t:tt)*) => {{
        #[cfg(feature = "log")]
        {
            ::log::debug!($($t)*);
        }
    }};
}
#[allow(unused)]
pub(crate) use debug;

/// Mirrors the `trace!()`-macro from the [`log`](https://github.com/rust-lang/log)-crate.
///
/// Used on the hashing and merging paths; only compiled in with the `log`-feature.
#[allow(unused)]
macro_rules! trace {
    ($($t:tt)*) => {{
        #[cfg(feature = "log")]
        {
            ::log::trace!($($t)*);
        }
    }};
}
#[allow(unused)]
pub(crate) use trace;
