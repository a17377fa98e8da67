use std::collections::HashMap;

/// Outgoing transitions observed from one source state.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges are
/// weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during training
/// - Enumerate targets in first-seen order, so compiled buckets are reproducible
/// - Merge with the transitions of the same source from another engine
///
/// ## Invariants
/// - Each target appears once in `targets`, and `index` points at it
/// - Each occurrence count is strictly positive
#[derive(Clone, Debug, Default)]
pub(crate) struct Transitions {
	/// Target keys with their occurrence count, in first-seen order.
	/// Example: [("b", 42), ("c", 3)]
	targets: Vec<(String, usize)>,
	/// Position of each target key in `targets`.
	index: HashMap<String, usize>,
}

impl Transitions {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Records `occurrence` observations of a transition toward `target`.
	///
	/// - If the transition already exists, its count is increased.
	/// - Otherwise, it is appended with `occurrence` as count.
	pub(crate) fn add(&mut self, target: &str, occurrence: usize) {
		if occurrence == 0 {
			return;
		}
		match self.index.get(target) {
			Some(&position) => self.targets[position].1 += occurrence,
			None => {
				self.index.insert(target.to_owned(), self.targets.len());
				self.targets.push((target.to_owned(), occurrence));
			}
		}
	}

	/// Number of times `target` followed this source.
	pub(crate) fn count(&self, target: &str) -> usize {
		self.index
			.get(target)
			.map(|&position| self.targets[position].1)
			.unwrap_or(0)
	}

	/// Sum of all occurrence counts.
	pub(crate) fn total(&self) -> usize {
		self.targets.iter().map(|(_, occurrence)| occurrence).sum()
	}

	/// Iterates over `(target, count)` in first-seen order.
	pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.targets.iter().map(|(target, occurrence)| (target.as_str(), *occurrence))
	}

	/// Merges another source's transitions into this one.
	///
	/// Counts are summed; targets unseen here are appended in `other`'s order.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (target, occurrence) in other.iter() {
			self.add(target, occurrence);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_accumulates_counts() {
		let mut transitions = Transitions::new();
		transitions.add("b", 1);
		transitions.add("c", 1);
		transitions.add("b", 1);
		assert_eq!(transitions.count("b"), 2);
		assert_eq!(transitions.count("c"), 1);
		assert_eq!(transitions.count("z"), 0);
		assert_eq!(transitions.total(), 3);
	}

	#[test]
	fn iteration_keeps_first_seen_order() {
		let mut transitions = Transitions::new();
		for target in ["m", "a", "m", "z"] {
			transitions.add(target, 1);
		}
		let order: Vec<_> = transitions.iter().collect();
		assert_eq!(order, vec![("m", 2), ("a", 1), ("z", 1)]);
	}

	#[test]
	fn zero_occurrence_is_ignored() {
		let mut transitions = Transitions::new();
		transitions.add("a", 0);
		assert_eq!(transitions.iter().count(), 0);
	}

	#[test]
	fn merge_sums_and_appends() {
		let mut left = Transitions::new();
		left.add("a", 2);
		let mut right = Transitions::new();
		right.add("b", 1);
		right.add("a", 3);

		left.merge(&right);
		let order: Vec<_> = left.iter().collect();
		assert_eq!(order, vec![("a", 5), ("b", 1)]);
	}
}
