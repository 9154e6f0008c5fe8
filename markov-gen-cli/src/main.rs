use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use markov_gen_core::corpus;
use markov_gen_core::error::GenError;
use markov_gen_core::model::chain::MarkovChain;
use markov_gen_core::model::walker::ChainWalker;
use markov_gen_core::report;

/// Generates output text that is statistically similar to an input corpus
/// using a word-clump Markov chain.
#[derive(Parser)]
#[command(name = "markov-gen")]
#[command(about = "Markov chain text generator", long_about = None)]
#[command(version)]
struct Args {
	/// Directory with at least one input .txt file
	input_dir: PathBuf,

	/// Directory where output.txt and log.txt are written
	output_dir: PathBuf,

	/// How many words are grouped together when building the chain
	#[arg(long, default_value_t = 2)]
	clump_size: usize,

	/// Number of output clumps to generate
	#[arg(long, default_value_t = 20_000)]
	num_words: usize,

	/// Characters emitted on a line before a newline is inserted
	#[arg(long, default_value_t = 80)]
	line_width: usize,

	/// Seed for the random source (omit for an OS-seeded run)
	#[arg(long)]
	seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.target(env_logger::Target::Stderr)
		.init();

	let args = Args::parse();
	if args.clump_size < 1 {
		return Err(GenError::InvalidConfiguration("clump size must be at least 1".to_owned()).into());
	}
	if !args.output_dir.is_dir() {
		return Err(GenError::InvalidConfiguration(format!(
			"output directory {} does not exist",
			args.output_dir.display()
		))
		.into());
	}

	log::info!("input directory = {}", args.input_dir.display());
	log::info!("output directory = {}", args.output_dir.display());
	log::info!("clump size = {}", args.clump_size);
	log::info!("number of clumps to generate = {}", args.num_words);

	let tokens = corpus::load_directory(&args.input_dir)?;
	let chain = MarkovChain::build_parallel(tokens, args.clump_size)?;
	log::info!("transition table holds {} keys", chain.len());
	for (key, total) in chain.top_keys(10) {
		log::info!("frequent clump: {key} ({total} occurrences)");
	}

	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};
	let walker = ChainWalker::new(&chain)?;
	let generation = walker.generate(args.num_words, &mut rng);

	let text = report::punctuate(&report::render(&generation.clumps, args.line_width));
	report::write_output(&args.output_dir, &text)?;
	report::write_log(&args.output_dir, &chain)?;

	Ok(())
}
