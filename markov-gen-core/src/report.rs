use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::model::chain::MarkovChain;

// Static patterns, compiled once; cannot fail
static CAPITALIZED_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Z][a-z])").unwrap());
static DANGLING_PERIOD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" \.").unwrap());

/// Joins generated clumps with spaces, wrapping lines at `line_width`.
///
/// # Behavior
/// - Tracks the cumulative character count emitted since the last break;
///   the seed clump is excluded, each later clump adds its length plus the
///   joining space.
/// - Once the count exceeds `line_width`, a newline is inserted and the
///   count resets.
///
/// Presentation only; the clump sequence itself is untouched.
pub fn render(clumps: &[String], line_width: usize) -> String {
	let mut out = String::new();
	let mut line_count = 0usize;

	for (i, clump) in clumps.iter().enumerate() {
		if i == 0 {
			out.push_str(clump);
		} else {
			out.push(' ');
			out.push_str(clump);
			line_count += clump.len() + 1;
		}
		if line_count > line_width {
			out.push('\n');
			line_count = 0;
		}
	}

	out
}

/// Inserts sentence boundaries before capitalized words.
///
/// A period and a space are placed before every capital-then-lowercase
/// letter pair, then any resulting `" ."` collapses to `"."`. A crude
/// heuristic, applied purely as presentation after generation.
pub fn punctuate(text: &str) -> String {
	let with_periods = CAPITALIZED_WORD.replace_all(text, ". $1");
	DANGLING_PERIOD.replace_all(&with_periods, ".").into_owned()
}

/// Writes the generated text to `output.txt` in `dir`.
pub fn write_output<P: AsRef<Path>>(dir: P, text: &str) -> Result<()> {
	let path = dir.as_ref().join("output.txt");
	std::fs::write(&path, text)?;
	log::info!("wrote generated text to {}", path.display());
	Ok(())
}

/// Dumps the transition table to `log.txt` in `dir` as tab-separated
/// `(key, successor, count)` rows with a header.
///
/// A reporting format only: the system never re-parses this file.
pub fn write_log<P: AsRef<Path>>(dir: P, chain: &MarkovChain) -> Result<()> {
	let path = dir.as_ref().join("log.txt");

	let mut rows = String::from("FirstWord\tSecondWord\tFrequency\n");
	for (key, successor, count) in chain.entries() {
		rows.push_str(&format!("{key}\t{successor}\t{count}\n"));
	}

	std::fs::write(&path, rows)?;
	log::info!("wrote transition dump to {}", path.display());
	Ok(())
}
