use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;

use markov_gen_core::corpus;
use markov_gen_core::model::chain::MarkovChain;
use markov_gen_core::model::walker::ChainWalker;
use markov_gen_core::report;

const SAMPLE: &str = "It was the best of times, it was the worst of times, \
it was the age of wisdom, it was the age of foolishness, it was the epoch \
of belief, it was the epoch of incredulity.";

#[test]
fn corpus_to_text_end_to_end() {
	let tokens = corpus::tokenize(&corpus::clean(SAMPLE));
	assert!(tokens.len() > 4);

	let chain = MarkovChain::build(&tokens, 2);
	assert!(!chain.is_empty());

	let walker = ChainWalker::new(&chain).unwrap();
	let mut rng = StdRng::seed_from_u64(7);
	let generation = walker.generate(40, &mut rng);
	assert_eq!(generation.clumps.len(), 41);

	let text = report::punctuate(&report::render(&generation.clumps, 80));
	assert!(!text.is_empty());
	// cleaning removed every period from the corpus, so any period in the
	// output came from the sentence-boundary heuristic
	for line in text.lines() {
		assert!(!line.trim().is_empty());
	}
}

#[test]
fn directory_pipeline_writes_reports() {
	let input_dir = tempfile::tempdir().unwrap();
	let output_dir = tempfile::tempdir().unwrap();
	fs::write(input_dir.path().join("sample.txt"), SAMPLE).unwrap();

	let tokens = corpus::load_directory(input_dir.path()).unwrap();
	let chain = MarkovChain::build_parallel(tokens, 1).unwrap();

	let walker = ChainWalker::new(&chain).unwrap();
	let mut rng = StdRng::seed_from_u64(42);
	let generation = walker.generate(100, &mut rng);

	let text = report::punctuate(&report::render(&generation.clumps, 80));
	report::write_output(output_dir.path(), &text).unwrap();
	report::write_log(output_dir.path(), &chain).unwrap();

	assert!(output_dir.path().join("output.txt").is_file());
	let dump = fs::read_to_string(output_dir.path().join("log.txt")).unwrap();
	assert!(dump.starts_with("FirstWord\tSecondWord\tFrequency\n"));
	assert_eq!(dump.lines().count(), chain.entries().count() + 1);
}

#[test]
fn insufficient_input_fails_fast_before_generation() {
	let tokens = corpus::tokenize("too short");
	let chain = MarkovChain::build(&tokens, 2);
	assert!(chain.is_empty());
	assert!(ChainWalker::new(&chain).is_err());
}
