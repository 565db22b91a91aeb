//! medcalc-core
//!
//! Shared vocabulary of the calculator catalog: specialties, severity tiers,
//! and the descriptive content attached to each calculator. No I/O.

pub mod error;
pub mod models;
