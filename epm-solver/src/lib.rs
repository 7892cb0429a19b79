#![warn(missing_docs)]
//! Clearing and welfare analysis for a single-commodity electricity pool.
//!
//! The entry points are [`solve_equilibrium`] and [`compute_welfare`] for
//! discrete bid stacks, [`clear_market`] to do both at once, and
//! [`curve_point_analytics`] for the continuous linear curves. Every function
//! here is pure: stacks and curves are immutable, so the same inputs may be
//! shared freely across threads.

/**
 * Discrete market clearing over a pair of bid stacks.
 */
mod equilibrium;
pub use equilibrium::*;

/**
 * Surplus decomposition at an arbitrary price and quantity.
 */
mod welfare;
pub use welfare::*;

/**
 * Closed-form analytics for linear curves.
 */
mod curve;
pub use curve::*;

/**
 * Clearing and what-if analysis bundled as single units of work.
 */
mod market;
pub use market::*;

/// Random bid stacks for building teaching scenarios
#[cfg(feature = "generate")]
pub mod generate;

/// File formats for describing and solving a set of market scenarios
#[cfg(feature = "io")]
pub mod io;

pub use epm_core::models::*;

/// An insertion-ordered map, so that scenarios are reported in the order given
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
