//! Core data models for lobby analytics.

mod aggregate;
mod keys;
mod match_record;
mod stats;

pub use aggregate::*;
pub use keys::*;
pub use match_record::*;
pub use stats::*;
