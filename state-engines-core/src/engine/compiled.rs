use std::collections::HashMap;

use rand::Rng;

use super::transitions::Transitions;

/// One target of a source state and the start of its weight interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Bucket {
	pub(crate) target: String,
	/// Sum of the counts of all preceding buckets.
	pub(crate) start: usize,
}

/// Cumulative-weight buckets of a single source state.
///
/// Buckets partition `[0, total)` into contiguous half-open intervals, one
/// per target, each as wide as the target's count.
///
/// ## Invariants
/// - `start` values are strictly increasing
/// - `total` equals the sum of the source's transition counts
#[derive(Clone, Debug, Default)]
pub(crate) struct Buckets {
	entries: Vec<Bucket>,
	total: usize,
}

impl Buckets {
	/// Builds buckets in the iteration order of `transitions`.
	pub(crate) fn build(transitions: &Transitions) -> Self {
		let mut entries = Vec::new();
		let mut total = 0;
		for (target, occurrence) in transitions.iter() {
			entries.push(Bucket { target: target.to_owned(), start: total });
			total += occurrence;
		}
		Self { entries, total }
	}

	pub(crate) fn total(&self) -> usize {
		self.total
	}

	#[cfg(test)]
	pub(crate) fn entries(&self) -> &[Bucket] {
		&self.entries
	}

	/// Returns the target whose interval contains `pick`.
	///
	/// Binary search for the last bucket starting at or before `pick`.
	/// Returns `None` if `pick` is outside `[0, total)`.
	pub(crate) fn find(&self, pick: usize) -> Option<&str> {
		if pick >= self.total {
			return None;
		}
		// Number of buckets with start <= pick; at least 1 since the first starts at 0.
		let after = self.entries.partition_point(|bucket| bucket.start <= pick);
		self.entries.get(after.checked_sub(1)?).map(|bucket| bucket.target.as_str())
	}

	/// Draws a target with probability proportional to its count.
	///
	/// Returns `None` if the source has no weight.
	pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total == 0 || self.entries.is_empty() {
			return None;
		}
		self.find(rng.random_range(0..total))
	}
}

/// Sampling tables of every source state of an engine.
///
/// A pure function of the transition table, rebuilt after each mutation.
#[derive(Clone, Debug, Default)]
pub(crate) struct CompiledDistribution {
	sources: HashMap<String, Buckets>,
}

impl CompiledDistribution {
	pub(crate) fn build(table: &HashMap<String, Transitions>) -> Self {
		let sources = table
			.iter()
			.map(|(source, transitions)| (source.clone(), Buckets::build(transitions)))
			.collect();
		Self { sources }
	}

	pub(crate) fn get(&self, source: &str) -> Option<&Buckets> {
		self.sources.get(source)
	}

	pub(crate) fn len(&self) -> usize {
		self.sources.len()
	}
}
