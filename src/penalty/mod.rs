//! Input-quality penalties.
//!
//! One step decides both the multiplicative penalty and the exact text handed to the
//! summarizer, so the justification cache key always matches what was summarized.

pub mod policy;

#[cfg(test)]
mod tests;

pub use policy::{PenaltyNote, PenaltyOutcome, PenaltyPolicy, count_tokens, truncate_tokens};
