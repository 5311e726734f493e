//! Word-level Markov chain text generation.
//!
//! This module contains:
//! - The sliding context window (`Prefix`)
//! - The prefix -> suffixes table with its build and generate walks (`Chain`)
//! - The injectable randomness used by generation (`IndexSource`)
//! - Parallel corpus loading from files (`corpus`)

/// Word-level Markov chain.
///
/// Handles text ingestion, frequency-weighted generation,
/// and merging of chains built from separate documents.
pub mod chain;

/// Parallel construction of a chain from corpus files.
pub mod corpus;

/// Fixed-length window of the most recent words.
pub mod prefix;

/// Uniform index sources for generation.
///
/// Wraps `rand` generators and lets tests script every pick.
pub mod source;

/// Whitespace tokenizer over buffered readers.
///
/// This module is not exposed publicly.
mod tokens;

pub use chain::Chain;
pub use prefix::Prefix;
pub use source::{IndexSource, RngSource};
