use serde::{Deserialize, Serialize};

use super::Converter;
use crate::error::{Error, Result};
use crate::state::State;

/// Configuration of a [`ChunkConverter`].
///
/// # Invariants
/// - `length` is always >= 1
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "RawChunkConfig")]
pub struct ChunkConfig {
	/// Number of non-overlapping characters in a chunk.
	length: usize,
	/// Number of preceding characters stored in front of each chunk.
	lookback_length: usize,
}

/// Unvalidated form of [`ChunkConfig`], with defaults for missing fields.
#[derive(Deserialize)]
struct RawChunkConfig {
	#[serde(default = "default_length")]
	length: usize,
	#[serde(default, alias = "lookbackLength")]
	lookback_length: usize,
}

fn default_length() -> usize {
	1
}

impl TryFrom<RawChunkConfig> for ChunkConfig {
	type Error = Error;

	fn try_from(raw: RawChunkConfig) -> Result<Self> {
		ChunkConfig::new(raw.length, raw.lookback_length)
	}
}

impl Default for ChunkConfig {
	fn default() -> Self {
		Self { length: default_length(), lookback_length: 0 }
	}
}

impl ChunkConfig {
	/// Creates a configuration.
	///
	/// # Errors
	/// Returns an error if `length` is 0.
	pub fn new(length: usize, lookback_length: usize) -> Result<Self> {
		if length == 0 {
			return Err(Error::InvalidConfig { field: "length", reason: "must be >= 1" });
		}
		Ok(Self { length, lookback_length })
	}

	pub fn length(&self) -> usize {
		self.length
	}

	pub fn lookback_length(&self) -> usize {
		self.lookback_length
	}
}

/// Converts a string into fixed-width chunk states, and back.
///
/// The string is cut into consecutive chunks of `length` characters (the last
/// one may be shorter). Each state also stores up to `lookback_length`
/// characters preceding its chunk, fewer near the start of the string. The
/// lookback prefix only tells apart identical chunks seen in different
/// contexts; it is dropped on reconstruction.
///
/// With `length = 1` and `lookback_length = 1`:
///
/// `"name"` <=> `"n", "na", "am", "me"`
///
/// With `length = 1` and `lookback_length = 0`:
///
/// `"name"` <=> `"n", "a", "m", "e"`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct ChunkConverter {
	config: ChunkConfig,
}

impl ChunkConverter {
	pub fn new(config: ChunkConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &ChunkConfig {
		&self.config
	}
}

impl Converter for ChunkConverter {
	type Entity = str;

	fn to_state_representation(&self, entity: &str) -> Result<Vec<State>> {
		let chars: Vec<char> = entity.chars().collect();
		let length = self.config.length;
		let lookback = self.config.lookback_length;

		let states = (0..chars.len())
			.step_by(length)
			.map(|index| {
				// Lookback is clamped at the start of the string
				let start = index.saturating_sub(lookback);
				let end = (index + length).min(chars.len());
				State::Value(chars[start..end].iter().collect())
			})
			.collect();
		Ok(states)
	}

	/// Concatenates the chunks of `states`.
	///
	/// Each state keeps its trailing `length` characters once its lookback
	/// prefix is dropped. The prefix is as long as it was when the state was
	/// built: `lookback_length`, or fewer characters if less than that had
	/// been rebuilt so far. This keeps a shorter final chunk intact.
	fn from_state_representation(&self, states: &[State]) -> String {
		let mut entity = String::new();
		let mut rebuilt = 0;
		for state in states {
			let prefix = self.config.lookback_length.min(rebuilt);
			let rest: Vec<char> = state.representation().chars().skip(prefix).collect();
			let chunk = &rest[rest.len().saturating_sub(self.config.length)..];
			entity.extend(chunk);
			rebuilt += chunk.len();
		}
		entity
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn converter(length: usize, lookback_length: usize) -> ChunkConverter {
		ChunkConverter::new(ChunkConfig::new(length, lookback_length).unwrap())
	}

	fn keys(states: &[State]) -> Vec<&str> {
		states.iter().map(State::key).collect()
	}

	#[test]
	fn default_config_is_single_letters() {
		let config = ChunkConfig::default();
		assert_eq!(config.length(), 1);
		assert_eq!(config.lookback_length(), 0);

		let states = ChunkConverter::default().to_state_representation("name").unwrap();
		assert_eq!(keys(&states), vec!["n", "a", "m", "e"]);
	}

	#[test]
	fn zero_length_is_rejected() {
		assert_eq!(
			ChunkConfig::new(0, 2),
			Err(Error::InvalidConfig { field: "length", reason: "must be >= 1" })
		);
	}

	#[test]
	fn lookback_of_one_letter() {
		let converter = converter(1, 1);
		let states = converter.to_state_representation("name").unwrap();
		assert_eq!(keys(&states), vec!["n", "na", "am", "me"]);
		assert_eq!(converter.from_state_representation(&states), "name");
	}

	#[test]
	fn pairs_without_lookback() {
		let converter = converter(2, 0);
		let states = converter.to_state_representation("abcde").unwrap();
		assert_eq!(keys(&states), vec!["ab", "cd", "e"]);
		assert_eq!(converter.from_state_representation(&states), "abcde");
	}

	#[test]
	fn short_final_chunk_with_lookback() {
		let converter = converter(2, 1);
		let states = converter.to_state_representation("abcde").unwrap();
		assert_eq!(keys(&states), vec!["ab", "bcd", "de"]);
		assert_eq!(converter.from_state_representation(&states), "abcde");
	}

	#[test]
	fn lookback_longer_than_chunk() {
		let converter = converter(1, 3);
		let states = converter.to_state_representation("abcde").unwrap();
		assert_eq!(keys(&states), vec!["a", "ab", "abc", "abcd", "bcde"]);
		assert_eq!(converter.from_state_representation(&states), "abcde");
	}

	#[test]
	fn reconstruction_keeps_trailing_length_characters() {
		assert_eq!(converter(1, 0).from_state_representation(&[State::value("xyz")]), "z");

		let states = [State::value("n"), State::value("abc")];
		assert_eq!(converter(1, 1).from_state_representation(&states), "nc");

		let states = [State::value("ab"), State::value("wxyz")];
		assert_eq!(converter(2, 1).from_state_representation(&states), "abyz");
	}

	#[test]
	fn deserialize_valid_config() {
		let config: ChunkConfig = serde_json::from_str(r#"{"length":3,"lookback_length":2}"#).unwrap();
		assert_eq!(config, ChunkConfig::new(3, 2).unwrap());
	}

	#[test]
	fn deserialize_rejects_zero_length() {
		let error = serde_json::from_str::<ChunkConfig>(r#"{"length":0}"#).unwrap_err();
		let expected = Error::InvalidConfig { field: "length", reason: "must be >= 1" };
		assert!(error.to_string().contains(&expected.to_string()), "unexpected error: {error}");
	}

	#[test]
	fn deserialize_empty_map_uses_defaults() {
		let config: ChunkConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, ChunkConfig::default());
		assert_eq!((config.length(), config.lookback_length()), (1, 0));
	}

	#[test]
	fn deserialize_accepts_camel_case_lookback() {
		let config: ChunkConfig = serde_json::from_str(r#"{"length":2,"lookbackLength":1}"#).unwrap();
		assert_eq!(config, ChunkConfig::new(2, 1).unwrap());
	}

	#[test]
	fn empty_string_has_no_states() {
		let converter = converter(3, 2);
		assert!(converter.to_state_representation("").unwrap().is_empty());
		assert_eq!(converter.from_state_representation(&[]), "");
	}

	#[test]
	fn lookback_tells_identical_chunks_apart() {
		let states = converter(1, 1).to_state_representation("anna").unwrap();
		assert_eq!(keys(&states), vec!["a", "an", "nn", "na"]);
	}
}
