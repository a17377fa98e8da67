//! State engines.
//!
//! This module provides:
//! - The shared engine contract and allowed-states registry (`StateEngine`, `StateRegistry`)
//! - The weighted Markov chain engine (`MarkovChainEngine`)
//! - Internal transition counting and compiled sampling tables

/// Allowed-states registry, cursor and the `StateEngine` contract.
pub mod state_engine;

/// Markov chain engine: training, compilation and weighted random walks.
pub mod markov_chain;

/// Per-source transition counts.
///
/// Not exposed.
mod transitions;

/// Cumulative-weight buckets built from transition counts.
///
/// Not exposed.
mod compiled;

pub use markov_chain::MarkovChainEngine;
pub use state_engine::{StateEngine, StateRegistry};
