//! Justification memoization.

pub mod justification;


pub use justification::{CacheStats, JustificationCache};
