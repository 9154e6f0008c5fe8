use std::collections::HashMap;

use rand::Rng;

/// Successor statistics for one clump key in the transition table.
///
/// A `ClumpState` corresponds to a fixed N-token clump (`key`) and stores
/// all observed transitions from this clump to the clump that followed it.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during construction
/// - Pick the next clump using weighted random sampling
/// - Merge with another state for the same key (parallel construction support)
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
/// - Once a successor exists the map is never emptied
#[derive(Clone, Debug)]
pub(crate) struct ClumpState {
	/// Identifier of the state (the N-token clump, space-joined).
	key: String,
	/// Outgoing transitions indexed by successor clump.
	/// The value represents how many times this transition was observed.
	/// Example: { "or not" => 3, "and yet" => 1 }
	successors: HashMap<String, usize>,
}

impl ClumpState {
	/// Creates a new empty state for the given clump.
	pub(crate) fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			successors: HashMap::new(),
		}
	}

	/// Records one occurrence of `successor` following this clump.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub(crate) fn add_successor(&mut self, successor: &str) {
		*self.successors.entry(successor.to_owned()).or_insert(0) += 1;
	}

	/// Sum of all successor counts: how often this clump was seen with a
	/// full successor window after it.
	pub(crate) fn total(&self) -> usize {
		self.successors.values().sum()
	}

	/// Iterates over `(successor, count)` pairs in map order.
	pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.successors.iter().map(|(s, c)| (s.as_str(), *c))
	}

	/// Picks the next clump using weighted random sampling.
	///
	/// The probability of selecting a successor is proportional to its
	/// occurrence count. A total of 1 short-circuits to the sole entry
	/// without consuming randomness.
	///
	/// This method performs:
	/// - an O(n) scan over the successors
	/// - a cumulative subtraction to select a bucket
	///
	/// Returns `None` if the state has no successors.
	pub(crate) fn pick_weighted<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		if self.successors.is_empty() {
			return None;
		}

		let total = self.total();
		if total == 1 {
			// Only one recorded occurrence, so pick it
			return self.successors.keys().next().map(String::as_str);
		}

		// Randomly select a slot among all recorded occurrences
		let mut r = rng.random_range(0..total);

		let mut fallback: Option<&str> = None;
		for (successor, count) in &self.successors {
			if r < *count {
				return Some(successor.as_str());
			}
			r -= count;
			fallback = Some(successor.as_str());
		}

		// Fallback: should not happen, but kept for safety.
		fallback
	}

	/// Merges another state into this one, summing occurrence counts.
	///
	/// Intended for parallel construction, where partial tables built on
	/// input shards are combined into a single one. The caller guarantees
	/// both states describe the same clump.
	pub(crate) fn merge(&mut self, other: Self) {
		debug_assert_eq!(self.key, other.key, "merging states for different clumps");
		for (successor, count) in other.successors {
			*self.successors.entry(successor).or_insert(0) += count;
		}
	}
}
