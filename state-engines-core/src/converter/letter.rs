use serde::{Deserialize, Serialize};

use super::Converter;
use crate::error::Result;
use crate::state::State;

/// Converts a string into one state per character, and back.
///
/// `"name"` <=> `"n", "a", "m", "e"`
///
/// The round trip is exact for every string, the empty one included.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct LetterConverter;

impl LetterConverter {
	pub fn new() -> Self {
		Self
	}
}

impl Converter for LetterConverter {
	type Entity = str;

	fn to_state_representation(&self, entity: &str) -> Result<Vec<State>> {
		Ok(entity.chars().map(|c| State::Value(c.to_string())).collect())
	}

	fn from_state_representation(&self, states: &[State]) -> String {
		states.iter().map(State::representation).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn one_state_per_character() {
		let states = LetterConverter::new().to_state_representation("name").unwrap();
		let keys: Vec<_> = states.iter().map(State::key).collect();
		assert_eq!(keys, vec!["n", "a", "m", "e"]);
	}

	#[test]
	fn multibyte_characters_are_single_states() {
		let states = LetterConverter.to_state_representation("Zoë").unwrap();
		assert_eq!(states.len(), 3);
		assert_eq!(states[2].key(), "ë");
	}

	#[test]
	fn empty_string_round_trips() {
		let converter = LetterConverter;
		let states = converter.to_state_representation("").unwrap();
		assert!(states.is_empty());
		assert_eq!(converter.from_state_representation(&states), "");
	}

	#[test]
	fn sentinel_contributes_nothing() {
		let states = vec![State::value("a"), State::undefined(), State::value("b")];
		assert_eq!(LetterConverter.from_state_representation(&states), "ab");
	}
}
