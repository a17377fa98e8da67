use thiserror::Error;

/// Errors raised by converters and their configuration.
///
/// Training and sampling themselves never fail: empty sequences are ignored
/// and a state without outgoing transitions ends the walk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
	/// The entity handed to a converter cannot be represented as states.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// A converter configuration value is outside its allowed range.
	#[error("invalid configuration: {field} {reason}")]
	InvalidConfig {
		field: &'static str,
		reason: &'static str,
	},
}

pub type Result<T> = std::result::Result<T, Error>;
