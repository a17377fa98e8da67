//! Weighted-transition state engines.
//!
//! This crate learns first-order transition statistics from example
//! sequences and replays them as weighted random walks, including:
//! - Keyed states with a distinguished undefined (start/end) sentinel
//! - A Markov chain engine with lazy compilation of its sampling tables
//! - Converters between domain entities (strings, token lists) and state sequences
//!
//! Typical use is building new names that look like a list of existing ones.

/// Crate error type.
pub mod error;

/// Engine states and the undefined sentinel.
pub mod state;

/// State engines: the shared registry contract and the Markov chain engine.
///
/// Transition counting and the compiled sampling tables are kept internal.
pub mod engine;

/// Converters between entities and state sequences.
pub mod converter;

pub use converter::{ChunkConfig, ChunkConverter, Converter, LetterConverter, TokenConverter};
pub use engine::{MarkovChainEngine, StateEngine, StateRegistry};
pub use error::{Error, Result};
pub use state::State;
