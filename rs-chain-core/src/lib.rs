//! Markov-chain text generation library.
//!
//! This crate provides a word-level Markov chain:
//! - Training on whitespace-delimited text streams
//! - Frequency-weighted random generation with an injectable random source
//! - Parallel corpus loading from a folder of documents
//! - Sentence trimming of generated text
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rs_chain_core::model::{Chain, RngSource};
//!
//! let mut chain = Chain::new(1)?;
//! chain.build_str("a b");
//! let mut source = RngSource::new(StdRng::seed_from_u64(0));
//! assert_eq!(chain.generate(10, &mut source), "a b");
//! # Ok::<(), rs_chain_core::ChainError>(())
//! ```

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (folder listing, path helpers).
pub mod io;

/// Markov chain model, generation, and corpus loading.
pub mod model;

/// Post-processing of generated text.
pub mod text;

pub use error::ChainError;
