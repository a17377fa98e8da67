use std::collections::HashMap;

use crate::state::State;

/// Registry of the states an engine may take, plus its current-state cursor.
///
/// The registry is append-only and deduplicated by key. The undefined
/// sentinel is registered at construction and is the initial cursor.
///
/// ## Invariants
/// - The sentinel is always registered
/// - The cursor is always a registered state
#[derive(Clone, Debug)]
pub struct StateRegistry {
	/// Allowed states indexed by key.
	allowed: HashMap<String, State>,
	/// Current state of the engine.
	current: State,
}

impl Default for StateRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl StateRegistry {
	/// Creates a registry holding only the sentinel, with the cursor on it.
	pub fn new() -> Self {
		let undefined = State::undefined();
		let mut allowed = HashMap::new();
		allowed.insert(undefined.key().to_owned(), undefined.clone());
		Self { allowed, current: undefined }
	}

	/// Registers `state` unless a state with the same key already exists.
	///
	/// Returns `true` if the state was inserted.
	pub fn add(&mut self, state: State) -> bool {
		if self.allowed.contains_key(state.key()) {
			return false;
		}
		self.allowed.insert(state.key().to_owned(), state);
		true
	}

	/// Returns the registered state for `key`.
	pub fn get(&self, key: &str) -> Option<&State> {
		self.allowed.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.allowed.contains_key(key)
	}

	/// Number of registered states, sentinel included.
	pub fn len(&self) -> usize {
		self.allowed.len()
	}

	/// Always `false`: the sentinel is never removed.
	pub fn is_empty(&self) -> bool {
		self.allowed.is_empty()
	}

	/// Iterates over all registered states in arbitrary order.
	pub fn states(&self) -> impl Iterator<Item = &State> {
		self.allowed.values()
	}

	pub fn current(&self) -> &State {
		&self.current
	}

	/// Moves the cursor to the registered state with the key of `state`.
	///
	/// Unknown states reset the cursor to the sentinel.
	pub fn set_current(&mut self, state: &State) {
		self.current = match self.allowed.get(state.key()) {
			Some(registered) => registered.clone(),
			None => State::undefined(),
		};
	}

	pub fn set_current_to_undefined(&mut self) {
		self.current = State::undefined();
	}
}

/// Contract shared by state engines.
///
/// An engine owns a [`StateRegistry`] and defines how its cursor advances
/// through [`StateEngine::transition`]. Registry handling is provided.
pub trait StateEngine {
	fn registry(&self) -> &StateRegistry;

	fn registry_mut(&mut self) -> &mut StateRegistry;

	/// Moves the engine to its next state and returns it.
	///
	/// Returns the undefined sentinel when the engine halts.
	fn transition(&mut self) -> State;

	/// Adds an allowed state; duplicates (by key) are ignored.
	fn add_allowed_state(&mut self, state: State) {
		self.registry_mut().add(state);
	}

	fn current_state(&self) -> &State {
		self.registry().current()
	}

	/// Sets the current state if it is registered, the sentinel otherwise.
	fn set_current_state(&mut self, state: &State) {
		self.registry_mut().set_current(state);
	}

	fn set_current_state_to_undefined(&mut self) {
		self.registry_mut().set_current_to_undefined();
	}
}
