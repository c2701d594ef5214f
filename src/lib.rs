//! SIFL valuation engine for business aircraft
//!
//! This crate computes the IRS Standard Industry Fare Level (SIFL) imputed
//! income value of each passenger on each flight leg, applies control employee
//! multipliers, and allocates variable trip cost (SEC incremental cost) across
//! passengers. Cached values are recomputed whenever a classification, cost or
//! roster changes.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod reference;
pub mod reporting;
pub mod trip;
