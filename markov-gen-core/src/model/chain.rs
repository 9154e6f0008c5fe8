use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ops::Range;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use rand::Rng;
use rand::prelude::IteratorRandom;

use super::state::ClumpState;
use crate::error::{GenError, Result};

/// The learned transition table of an order-N word-clump Markov chain.
///
/// Maps each N-token clump (space-joined into one key) to the weighted set
/// of clumps observed immediately after it. Built once from a finalized
/// token list and treated as read-only during generation.
///
/// # Responsibilities
/// - Slide an overlapping window over the token stream and count
///   `(key, successor)` occurrences
/// - Merge partial tables built on input shards (counts are additive)
/// - Provide weighted successor sampling and uniform key sampling
/// - Rank keys by total occurrence frequency for diagnostics
///
/// # Invariants
/// - Every stored count is >= 1 and a successor map is never empty
/// - Every key and every successor is exactly `clump_size` tokens
/// - Degenerate input yields an empty table, never an error
#[derive(Clone, Debug)]
pub struct MarkovChain {
	/// Number of tokens grouped into one clump. Fixed for the table's lifetime.
	clump_size: usize,

	/// Mapping from a clump key to its successor statistics.
	states: HashMap<String, ClumpState>,
}

impl MarkovChain {
	fn empty(clump_size: usize) -> Self {
		Self {
			clump_size,
			states: HashMap::new(),
		}
	}

	/// Number of window starts a token list of `len` supports.
	///
	/// Window starts run over `0 ..= len - 2 * clump_size`: every start that
	/// leaves room for a full successor window counts. The final
	/// `2 * clump_size - 1` tokens can never start a key (no room for a
	/// successor window after them): an intentional truncation of the tail,
	/// not a bug. Too-short input (or a clump size of zero) supports no
	/// windows at all.
	fn window_count(len: usize, clump_size: usize) -> usize {
		if clump_size == 0 || len < 2 * clump_size {
			return 0;
		}
		len - 2 * clump_size + 1
	}

	/// Counts the windows in `range`, joining each key and successor clump
	/// with single spaces.
	fn ingest(&mut self, tokens: &[String], range: Range<usize>) {
		let n = self.clump_size;
		for i in range {
			let key = tokens[i..i + n].join(" ");
			let successor = tokens[i + n..i + 2 * n].join(" ");
			self.states
				.entry(key.clone())
				.or_insert_with(|| ClumpState::new(&key))
				.add_successor(&successor);
		}
	}

	/// Builds a transition table from an ordered token sequence.
	///
	/// # Parameters
	/// - `tokens`: cleaned tokens (non-empty, no embedded whitespace).
	/// - `clump_size`: number of tokens per clump, must be >= 1 for a
	///   non-degenerate table.
	///
	/// # Behavior
	/// - Slides a window of width `clump_size` with step 1; consecutive keys
	///   share `clump_size - 1` tokens, so local order-N statistics are
	///   captured densely.
	/// - `clump_size == 0` or fewer than `2 * clump_size` tokens yield an
	///   empty table (no error); the walker rejects empty tables later.
	pub fn build(tokens: &[String], clump_size: usize) -> Self {
		let windows = Self::window_count(tokens.len(), clump_size);
		log::info!(
			"building transition table from {} tokens ({} windows)",
			tokens.len(),
			windows
		);

		let mut chain = Self::empty(clump_size);
		chain.ingest(tokens, 0..windows);
		chain
	}

	/// Builds a transition table in parallel over input shards.
	///
	/// # Behavior
	/// - Splits the window-start range into chunks (CPU cores * factor).
	/// - Spawns threads that each build a partial table over their chunk;
	///   shards overlap by `2 * clump_size - 1` tokens so no window is lost.
	/// - Collects partial tables over an MPSC channel and merges them
	///   additively (commutative, so arrival order does not matter).
	///
	/// Observable counts are identical to [`MarkovChain::build`]; only the
	/// construction is sharded.
	pub fn build_parallel(tokens: Vec<String>, clump_size: usize) -> Result<Self> {
		let windows = Self::window_count(tokens.len(), clump_size);
		if windows == 0 {
			return Ok(Self::empty(clump_size));
		}
		log::info!(
			"building transition table from {} tokens ({} windows)",
			tokens.len(),
			windows
		);

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = (cpus * factor).min(windows);
		let chunk_size = (windows + chunks - 1) / chunks;

		let shared: Arc<[String]> = tokens.into();
		let (tx, rx) = mpsc::channel();

		let mut start = 0;
		while start < windows {
			let end = (start + chunk_size).min(windows);
			let tx = tx.clone();
			let shared = Arc::clone(&shared);

			thread::spawn(move || {
				let mut partial = MarkovChain::empty(clump_size);
				partial.ingest(&shared, start..end);
				tx.send(partial).expect("Failed to send from thread");
			});

			start = end;
		}
		drop(tx);

		let mut chain = Self::empty(clump_size);
		for partial in rx.iter() {
			chain.merge(partial)?;
		}

		Ok(chain)
	}

	/// Merges another table into this one, summing occurrence counts.
	///
	/// # Errors
	/// Returns `ClumpSizeMismatch` if the two tables were built with
	/// different clump sizes.
	pub fn merge(&mut self, other: Self) -> Result<()> {
		if self.clump_size != other.clump_size {
			return Err(GenError::ClumpSizeMismatch {
				expected: self.clump_size,
				found: other.clump_size,
			});
		}

		for (key, state) in other.states {
			match self.states.entry(key) {
				Entry::Occupied(mut existing) => existing.get_mut().merge(state),
				Entry::Vacant(slot) => {
					slot.insert(state);
				}
			}
		}

		Ok(())
	}

	/// Number of tokens grouped into one clump.
	pub fn clump_size(&self) -> usize {
		self.clump_size
	}

	/// Number of distinct clump keys in the table.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Recorded count for one `(key, successor)` pair, 0 if never observed.
	pub fn count(&self, key: &str, successor: &str) -> usize {
		self.states
			.get(key)
			.map(|state| state.iter().find(|(s, _)| *s == successor).map_or(0, |(_, c)| c))
			.unwrap_or(0)
	}

	/// Samples a successor of `key` with probability proportional to its
	/// occurrence count.
	///
	/// Returns `None` if `key` is not in the table (tail truncation, or a
	/// clump only ever seen as a successor) or, defensively, if its
	/// successor map is empty. Both cases resolve to the walker's
	/// random-fallback policy.
	pub fn pick_successor<R: Rng>(&self, key: &str, rng: &mut R) -> Option<&str> {
		self.states.get(key)?.pick_weighted(rng)
	}

	/// Returns a uniformly random clump key from the table.
	///
	/// Used both for seeding a walk and for the random-fallback policy.
	/// Returns `None` if the table is empty.
	pub fn random_key<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		self.states.keys().choose(rng).map(String::as_str)
	}

	/// Ranks keys by total occurrence frequency and returns the `limit`
	/// highest, most frequent first.
	///
	/// Diagnostic only. The sort is stable and ascending with the tail
	/// taken in reverse, so ties resolve by map iteration order, which is
	/// explicitly unspecified and may differ between runs.
	pub fn top_keys(&self, limit: usize) -> Vec<(String, usize)> {
		let mut ranked: Vec<(&String, usize)> = self
			.states
			.iter()
			.map(|(key, state)| (key, state.total()))
			.collect();
		ranked.sort_by_key(|&(_, total)| total);

		ranked
			.into_iter()
			.rev()
			.take(limit)
			.map(|(key, total)| (key.clone(), total))
			.collect()
	}

	/// Iterates over every `(key, successor, count)` row in map order.
	///
	/// Feeds the tab-separated diagnostic dump; the order is unspecified.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &str, usize)> {
		self.states.iter().flat_map(|(key, state)| {
			state.iter().map(move |(successor, count)| (key.as_str(), successor, count))
		})
	}
}
