//! Aggregation hooks that fan platform calls out concurrently and publish one combined
//! state per view.
//!
//! A hook fires all of its calls at once and writes its state exactly once, after every
//! call settled. A failed call is replaced by its fallback snapshot when one is configured;
//! otherwise the previous value stays on screen and the hook's `error` says why. Refreshes
//! never clear displayed data, and a hook that was unmounted ignores late results.

pub mod campaign;
pub mod marketing;

mod shared;

pub use campaign::*;
pub use marketing::*;
