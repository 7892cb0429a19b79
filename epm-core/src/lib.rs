#![warn(missing_docs)]
//! Core models for a single-commodity electricity pool.
//!
//! A pool is described by two [`BidStack`](models::BidStack)s, one per side of the
//! market, each a monotone step function of price against cumulative quantity.
//! The continuous counterpart used for teaching views is the
//! [`LinearCurve`](models::LinearCurve).
//!
//! Everything in this crate is validated on construction and immutable
//! afterwards, so downstream consumers can assume the invariants hold.

/// Core domain models for the pool market.
///
/// This module contains the data structures the clearing and analytics
/// routines operate on. They carry no business logic beyond what is needed to
/// enforce their own invariants and to answer simple point queries.
pub mod models;
