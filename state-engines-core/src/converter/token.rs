use serde::{Deserialize, Serialize};

use super::Converter;
use crate::error::{Error, Result};
use crate::state::State;

/// Converts a list of tokens (words, syllables) into one state per token.
///
/// `["the", "cat", "sat"]` <=> `"the", "cat", "sat"`
///
/// Empty tokens are rejected: their key would be the one of the undefined
/// sentinel.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct TokenConverter;

impl TokenConverter {
	pub fn new() -> Self {
		Self
	}
}

impl Converter for TokenConverter {
	type Entity = [String];

	fn to_state_representation(&self, entity: &[String]) -> Result<Vec<State>> {
		entity
			.iter()
			.enumerate()
			.map(|(index, token)| {
				if token.is_empty() {
					Err(Error::InvalidInput(format!("token {index} is empty")))
				} else {
					Ok(State::Value(token.clone()))
				}
			})
			.collect()
	}

	fn from_state_representation(&self, states: &[State]) -> Vec<String> {
		states
			.iter()
			.filter(|state| !state.is_undefined())
			.map(|state| state.representation().to_owned())
			.collect()
	}
}
