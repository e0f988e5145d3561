//! Shared data structures for towing-tank resistance analysis
//!
//! - `ResultsRow`: one run of the results table (named view of the positional schema)
//! - `HullConditionTable`: condition code → model geometry lookup
//! - `AveragedRow`: one averaged speed group with model- and full-scale results

mod averaged;
mod condition;
mod results;

pub use averaged::*;
pub use condition::*;
pub use results::*;
