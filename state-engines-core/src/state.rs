use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Key of the undefined sentinel.
pub const UNDEFINED_KEY: &str = "";

/// A discrete state of an engine.
///
/// A state is identified by its key: two states are equal iff their keys are
/// equal. A `Value` state uses its representation as key, the `Undefined`
/// sentinel uses the empty string.
///
/// ## Invariants
/// - Keys must be unique within one engine. A `Value("")` has the same key as
///   `Undefined` and is merged with it by the engine registry, so callers must
///   not train on entities that produce empty representations.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum State {
	/// A state wrapping a printable representation (a letter, a chunk, a word).
	Value(String),
	/// No state: the start and the end of every sequence.
	Undefined,
}

impl State {
	/// Creates a value state from its representation.
	pub fn value(representation: impl Into<String>) -> Self {
		State::Value(representation.into())
	}

	/// Returns the undefined sentinel.
	pub fn undefined() -> Self {
		State::Undefined
	}

	/// Unique key of this state.
	pub fn key(&self) -> &str {
		match self {
			State::Value(representation) => representation,
			State::Undefined => UNDEFINED_KEY,
		}
	}

	/// Printable representation; empty for the sentinel.
	pub fn representation(&self) -> &str {
		self.key()
	}

	/// Returns `true` for the sentinel.
	pub fn is_undefined(&self) -> bool {
		matches!(self, State::Undefined)
	}

	/// Key equality.
	pub fn is_equal(&self, other: &State) -> bool {
		self.key() == other.key()
	}
}

impl PartialEq for State {
	fn eq(&self, other: &Self) -> bool {
		self.is_equal(other)
	}
}

impl Eq for State {}

impl Hash for State {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key().hash(state);
	}
}

impl fmt::Display for State {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			State::Value(representation) => f.write_str(representation),
			State::Undefined => f.write_str("<undefined>"),
		}
	}
}

impl From<&str> for State {
	fn from(representation: &str) -> Self {
		State::value(representation)
	}
}

impl From<String> for State {
	fn from(representation: String) -> Self {
		State::Value(representation)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn value_state_key_is_its_representation() {
		let state = State::value("na");
		assert_eq!(state.key(), "na");
		assert_eq!(state.representation(), "na");
		assert!(!state.is_undefined());
	}

	#[test]
	fn undefined_key_is_empty() {
		let state = State::undefined();
		assert_eq!(state.key(), "");
		assert!(state.is_undefined());
	}

	#[test]
	fn equality_follows_keys() {
		assert!(State::value("a").is_equal(&State::from("a")));
		assert_ne!(State::value("a"), State::value("b"));
		assert_eq!(State::Undefined, State::undefined());
	}

	#[test]
	fn empty_value_collides_with_sentinel() {
		assert_eq!(State::value(""), State::Undefined);
	}

	#[test]
	fn hashing_deduplicates_by_key() {
		let set: HashSet<State> = ["x", "y", "x"].into_iter().map(State::from).collect();
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn display_marks_the_sentinel() {
		assert_eq!(State::value("ab").to_string(), "ab");
		assert_eq!(State::Undefined.to_string(), "<undefined>");
	}
}
