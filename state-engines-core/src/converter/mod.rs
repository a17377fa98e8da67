//! Converters between entities and state sequences.
//!
//! A converter defines two representations of the same thing: a domain
//! entity (a name, a list of words) and the path of states an engine walks
//! to produce it. Engines train on the state form and hand generated paths
//! back to the converter.
//!
//! - `LetterConverter`: one state per character
//! - `ChunkConverter`: fixed-width chunks with an optional lookback prefix
//! - `TokenConverter`: one state per token of a token list

/// Single-character states.
pub mod letter;

/// Fixed-width chunk states with lookback context.
pub mod chunk;

/// One state per token.
pub mod token;

pub use chunk::{ChunkConfig, ChunkConverter};
pub use letter::LetterConverter;
pub use token::TokenConverter;

use crate::error::Result;
use crate::state::State;

/// Bidirectional mapping between an entity and a sequence of states.
pub trait Converter {
	/// The entity type, borrowed when converting to states.
	type Entity: ?Sized + ToOwned;

	/// Converts `entity` into the ordered states representing it.
	///
	/// # Errors
	/// Returns [`crate::Error::InvalidInput`] if the entity cannot be
	/// represented. Nothing is trained in that case.
	fn to_state_representation(&self, entity: &Self::Entity) -> Result<Vec<State>>;

	/// Rebuilds an entity from a sequence of states.
	fn from_state_representation(&self, states: &[State]) -> <Self::Entity as ToOwned>::Owned;
}
