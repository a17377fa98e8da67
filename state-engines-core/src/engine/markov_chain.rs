use std::collections::HashMap;

use log::{debug, trace, warn};
use rand::Rng;
use rand::rngs::ThreadRng;

use super::compiled::CompiledDistribution;
use super::state_engine::{StateEngine, StateRegistry};
use super::transitions::Transitions;
use crate::converter::{Converter, LetterConverter};
use crate::error::Result;
use crate::state::{State, UNDEFINED_KEY};

/// A Markov chain state engine.
///
/// The next state depends only on the current one and is drawn from a
/// weighted list. Weights are learned from example paths: each time state
/// `A` is followed by `B` in a training sequence, the transition `A -> B`
/// gains one unit of weight. The start and the end of every sequence are
/// transitions from and to the undefined sentinel, so the engine also learns
/// how sequences begin and end.
///
/// Useful for building random names that look like a list of existing ones.
/// The output is raw material: filtering and deduplication are left to the
/// caller.
///
/// # Responsibilities
/// - Accumulate transition counts from state sequences or entities
/// - Compile counts into cumulative-weight buckets, lazily, after each change
/// - Walk the chain with an injected random source
/// - Merge with an engine trained elsewhere
///
/// # Invariants
/// - Every source key of the transition table is a registered state
/// - `compiled` reflects `transitions` whenever `is_compiled` is `true`
///
/// The engine is single-consumer: training and sampling both take
/// `&mut self`.
#[derive(Clone, Debug)]
pub struct MarkovChainEngine<C = LetterConverter, R = ThreadRng> {
	/// Allowed states and the current-state cursor.
	registry: StateRegistry,
	/// Converter between entities and state sequences.
	converter: C,
	/// Uniform random source used for every draw.
	rng: R,
	/// Observed transitions, indexed by source key.
	transitions: HashMap<String, Transitions>,
	/// Sampling tables built from `transitions`.
	compiled: CompiledDistribution,
	/// Whether `compiled` is up to date.
	is_compiled: bool,
	/// Optional cap on the number of states generated in one walk.
	max_sequence_length: Option<usize>,
}

impl Default for MarkovChainEngine {
	fn default() -> Self {
		Self::new(LetterConverter)
	}
}

impl<C: Converter> MarkovChainEngine<C, ThreadRng> {
	/// Creates an empty engine drawing from the thread-local generator.
	pub fn new(converter: C) -> Self {
		Self::with_rng(converter, rand::rng())
	}
}

impl<C: Converter, R: Rng> MarkovChainEngine<C, R> {
	/// Creates an empty engine drawing from `rng`.
	///
	/// Inject a seeded generator (`StdRng::seed_from_u64`) for reproducible walks.
	pub fn with_rng(converter: C, rng: R) -> Self {
		Self {
			registry: StateRegistry::new(),
			converter,
			rng,
			transitions: HashMap::new(),
			compiled: CompiledDistribution::default(),
			is_compiled: false,
			max_sequence_length: None,
		}
	}

	pub fn converter(&self) -> &C {
		&self.converter
	}

	pub fn max_sequence_length(&self) -> Option<usize> {
		self.max_sequence_length
	}

	/// Caps the number of states produced by one generation.
	///
	/// A walk is only guaranteed to end if every state it reaches can lead
	/// back to the sentinel. `None` (the default) leaves walks unbounded.
	pub fn set_max_sequence_length(&mut self, max_sequence_length: Option<usize>) {
		self.max_sequence_length = max_sequence_length;
	}

	/// Adds a path through the engine's states.
	///
	/// # Behavior
	/// - Empty sequences are ignored and leave the compiled tables untouched.
	/// - A leading sentinel is assumed if `states` does not start with one,
	///   so the first state is learned as a weighted transition from the start.
	/// - The last state is followed by the sentinel.
	/// - Each source state is registered and its transition count increased.
	pub fn add_defining_state_sequence(&mut self, states: &[State]) {
		let Some(first) = states.first() else {
			return;
		};

		let undefined = State::undefined();
		let start = (!first.is_undefined()).then_some(&undefined);
		let path: Vec<&State> = start.into_iter().chain(states).collect();

		for (index, state) in path.iter().enumerate() {
			let next_key = path.get(index + 1).map_or(UNDEFINED_KEY, |next| next.key());

			self.registry.add((*state).clone());
			self.transitions
				.entry(state.key().to_owned())
				.or_insert_with(Transitions::new)
				.add(next_key, 1);
		}

		self.is_compiled = false;
		trace!("trained on a path of {} states", states.len());
	}

	/// Converts `entity` with the engine's converter and trains on the result.
	///
	/// # Errors
	/// Returns the converter's error; the model is not modified in that case.
	pub fn add_defining_entity(&mut self, entity: &C::Entity) -> Result<()> {
		let states = self.converter.to_state_representation(entity)?;
		self.add_defining_state_sequence(&states);
		Ok(())
	}

	/// Trains on every entity in order.
	///
	/// # Errors
	/// Stops at the first entity the converter rejects. Entities before it
	/// remain trained.
	pub fn add_defining_entities<'a, I>(&mut self, entities: I) -> Result<()>
	where
		I: IntoIterator<Item = &'a C::Entity>,
		C::Entity: 'a,
	{
		for entity in entities {
			self.add_defining_entity(entity)?;
		}
		Ok(())
	}

	/// Rebuilds the sampling tables if training changed them.
	pub fn ensure_compiled(&mut self) {
		if self.is_compiled {
			return;
		}
		self.compiled = CompiledDistribution::build(&self.transitions);
		self.is_compiled = true;
		debug!("compiled transition buckets for {} source states", self.compiled.len());
	}

	/// Whether the sampling tables reflect all training so far.
	pub fn is_compiled(&self) -> bool {
		self.is_compiled
	}

	/// Walks the chain from the sentinel back to the sentinel.
	///
	/// Returns the states in between, which is empty if the engine was never
	/// trained. If a maximum length is set, the walk is cut there.
	pub fn generate_state_sequence(&mut self) -> Vec<State> {
		self.set_current_state_to_undefined();

		let mut sequence = Vec::new();
		let mut state = self.transition();
		while !state.is_undefined() {
			if self.max_sequence_length.is_some_and(|max| sequence.len() >= max) {
				warn!("generation stopped after {} states", sequence.len());
				self.set_current_state_to_undefined();
				break;
			}
			sequence.push(state);
			state = self.transition();
		}
		sequence
	}

	/// Generates a state sequence and converts it back into an entity.
	pub fn generate_entity(&mut self) -> <C::Entity as ToOwned>::Owned {
		let states = self.generate_state_sequence();
		self.converter.from_state_representation(&states)
	}

	/// Merges another engine's states and transition counts into this one.
	///
	/// # Notes
	/// - Counts of transitions known to both engines are summed.
	/// - Targets unseen here are appended after the existing ones.
	/// - The cursor, converter and random source of `self` are kept.
	pub fn merge<C2, R2>(&mut self, other: &MarkovChainEngine<C2, R2>) {
		for state in other.registry.states() {
			self.registry.add(state.clone());
		}
		for (source, transitions) in &other.transitions {
			self.transitions
				.entry(source.clone())
				.or_insert_with(Transitions::new)
				.merge(transitions);
		}
		self.is_compiled = false;
		debug!("merged {} source states", other.transitions.len());
	}

	/// Returns the registered state for `key`.
	pub fn allowed_state(&self, key: &str) -> Option<&State> {
		self.registry.get(key)
	}

	/// Number of registered states, sentinel included.
	pub fn allowed_state_count(&self) -> usize {
		self.registry.len()
	}

	/// Number of times `target` followed `source` in training.
	///
	/// Use [`UNDEFINED_KEY`] for the start or the end of sequences.
	pub fn transition_count(&self, source: &str, target: &str) -> usize {
		self.transitions.get(source).map_or(0, |t| t.count(target))
	}

	/// Number of times `source` was followed by anything, the end included.
	pub fn total_weight(&self, source: &str) -> usize {
		self.transitions.get(source).map_or(0, Transitions::total)
	}
}

impl<C: Converter, R: Rng> StateEngine for MarkovChainEngine<C, R> {
	fn registry(&self) -> &StateRegistry {
		&self.registry
	}

	fn registry_mut(&mut self) -> &mut StateRegistry {
		&mut self.registry
	}

	/// Draws the next state from the current one.
	///
	/// A state without outgoing transitions leads to the sentinel; this is
	/// how every walk ends.
	fn transition(&mut self) -> State {
		self.ensure_compiled();

		let next = self
			.compiled
			.get(self.registry.current().key())
			.and_then(|buckets| buckets.sample(&mut self.rng))
			.and_then(|key| self.registry.get(key))
			.cloned()
			.unwrap_or_else(State::undefined);

		trace!("transition to {next}");
		self.registry.set_current(&next);
		next
	}
}
