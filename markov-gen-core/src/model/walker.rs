use rand::Rng;

use super::chain::MarkovChain;
use crate::error::{GenError, Result};

/// The result of one generation run.
///
/// `clumps[0]` is the seed clump; exactly `length` sampled clumps follow.
/// `fallback_count` is a pure diagnostic: the number of steps that could
/// not be resolved from the table and fell back to a uniformly random key.
#[derive(Clone, Debug)]
pub struct Generation {
	pub clumps: Vec<String>,
	pub fallback_count: usize,
}

/// Weighted random walk over a built transition table.
///
/// # Responsibilities
/// - Verify the table is usable before any sampling begins
/// - Seed the walk with a uniformly random key
/// - Resolve each step by weighted selection, or by the counted
///   random-fallback policy when the cursor has no table entry
///
/// # Notes
/// - The table is borrowed read-only; walking never mutates it.
/// - All randomness flows through the caller's `Rng`, so a seeded
///   generator makes runs reproducible.
pub struct ChainWalker<'a> {
	chain: &'a MarkovChain,
}

impl<'a> ChainWalker<'a> {
	/// Creates a walker over `chain`.
	///
	/// # Errors
	/// Returns `EmptyModel` if the table has no keys. Checking here keeps
	/// generation itself infallible: once construction succeeds, every step
	/// resolves to either a table-driven or a fallback-driven successor.
	pub fn new(chain: &'a MarkovChain) -> Result<Self> {
		if chain.is_empty() {
			return Err(GenError::EmptyModel);
		}
		Ok(Self { chain })
	}

	/// Generates `length` clumps after a uniformly random seed clump.
	///
	/// The seed is emitted as the first element, so the result always holds
	/// `length + 1` clumps; a length of zero yields the seed alone.
	pub fn generate<R: Rng>(&self, length: usize, rng: &mut R) -> Generation {
		log::info!("generating text from {} source keys", self.chain.len());

		// Cannot fail: the chain was verified non-empty on construction
		let seed = self
			.chain
			.random_key(rng)
			.expect("walker holds a non-empty chain")
			.to_owned();
		log::debug!("first word clump: {seed}");

		self.generate_from(&seed, length, rng)
	}

	/// Generates `length` clumps after the given seed clump.
	///
	/// # Behavior
	/// Each step samples a successor of the cursor by weighted selection.
	/// When the cursor has no table entry (a clump only ever observed as a
	/// successor, or the builder's tail truncation) the step falls back to
	/// a uniformly random key and is counted. The fallback is a deliberate
	/// smoothing mechanism for sparse chains; it alters output statistics
	/// and is preserved exactly, counter included.
	///
	/// # Notes
	/// The seed does not have to be a key; the first step then resolves by
	/// fallback like any other unknown cursor.
	pub fn generate_from<R: Rng>(&self, seed: &str, length: usize, rng: &mut R) -> Generation {
		let mut clumps = Vec::with_capacity(length + 1);
		clumps.push(seed.to_owned());

		let mut cursor = seed.to_owned();
		let mut fallback_count = 0usize;

		for _ in 0..length {
			let next = match self.chain.pick_successor(&cursor, rng) {
				Some(successor) => successor.to_owned(),
				None => {
					fallback_count += 1;
					// Cannot fail: the chain was verified non-empty on construction
					self.chain
						.random_key(rng)
						.expect("walker holds a non-empty chain")
						.to_owned()
				}
			};
			clumps.push(next.clone());
			cursor = next;
		}

		log::info!(
			"chose {} random word clumps out of {} output word clumps",
			fallback_count,
			length
		);
		Generation { clumps, fallback_count }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn tokens(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| w.to_string()).collect()
	}

	fn fixture() -> MarkovChain {
		MarkovChain::build(&tokens(&["to", "be", "or", "not", "to", "be"]), 1)
	}

	#[test]
	fn empty_model_is_rejected_before_sampling() {
		let chain = MarkovChain::build(&[], 1);
		assert!(matches!(ChainWalker::new(&chain), Err(GenError::EmptyModel)));
	}

	#[test]
	fn length_zero_yields_seed_alone() {
		let chain = fixture();
		let walker = ChainWalker::new(&chain).unwrap();
		let mut rng = StdRng::seed_from_u64(1);

		let generation = walker.generate(0, &mut rng);
		assert_eq!(generation.clumps.len(), 1);
		assert_eq!(generation.fallback_count, 0);
		// the seed is drawn from the key set
		assert!(["to", "be", "or", "not"].contains(&generation.clumps[0].as_str()));
	}

	#[test]
	fn single_path_chain_walks_deterministically() {
		// every key has exactly one successor, so the walk is forced
		let chain = fixture();
		let walker = ChainWalker::new(&chain).unwrap();
		let mut rng = StdRng::seed_from_u64(99);

		let generation = walker.generate_from("to", 3, &mut rng);
		assert_eq!(generation.clumps, vec!["to", "be", "or", "not"]);
		assert_eq!(generation.fallback_count, 0);
	}

	#[test]
	fn unknown_cursor_falls_back_and_is_counted() {
		// "f" only ever appears as a successor, never as a key
		let chain = MarkovChain::build(&tokens(&["a", "b", "c", "d", "e", "f"]), 1);
		let walker = ChainWalker::new(&chain).unwrap();
		let mut rng = StdRng::seed_from_u64(5);

		let generation = walker.generate_from("f", 1, &mut rng);
		assert_eq!(generation.clumps.len(), 2);
		assert_eq!(generation.fallback_count, 1);
		// the fallback pick is a real key
		assert!(["a", "b", "c", "d", "e"].contains(&generation.clumps[1].as_str()));
	}

	#[test]
	fn long_walk_always_resolves() {
		let chain = MarkovChain::build(&tokens(&["a", "b", "c", "d", "e", "f"]), 1);
		let walker = ChainWalker::new(&chain).unwrap();
		let mut rng = StdRng::seed_from_u64(1234);

		let generation = walker.generate(500, &mut rng);
		assert_eq!(generation.clumps.len(), 501);
		assert!(generation.clumps.iter().all(|clump| !clump.is_empty()));
		// every path runs into "f", which is never a key, so the walk must
		// have fallen back at least once
		assert!(generation.fallback_count >= 1);
		assert!(generation.fallback_count <= 500);
	}

	#[test]
	fn seeded_runs_are_reproducible() {
		let chain = MarkovChain::build(
			&tokens(&["the", "cat", "sat", "on", "the", "mat", "and", "the", "dog", "sat"]),
			2,
		);
		let walker = ChainWalker::new(&chain).unwrap();

		let mut first_rng = StdRng::seed_from_u64(2024);
		let mut second_rng = StdRng::seed_from_u64(2024);
		let first = walker.generate(50, &mut first_rng);
		let second = walker.generate(50, &mut second_rng);

		assert_eq!(first.clumps, second.clumps);
		assert_eq!(first.fallback_count, second.fallback_count);
	}
}
