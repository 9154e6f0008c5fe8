use std::path::Path;

use crate::error::{GenError, Result};
use crate::io;

/// Characters that are flattened to spaces before tokenization.
///
/// Mirrors the punctuation the cleaner strips so that "word." and "word"
/// end up as the same token.
const STRIPPED_PUNCTUATION: &[char] = &['.', ',', '?', '!', '"', ';', '=', '~', '\\', '/'];

/// Replaces every non-printable or stripped character with a space.
///
/// # Behavior
/// - Bytes outside printable ASCII (below 0x20 or above 0x7E, which covers
///   control characters, DEL and every non-ASCII character) become spaces.
/// - The punctuation set in `STRIPPED_PUNCTUATION` becomes spaces.
/// - Everything else passes through unchanged.
///
/// The output therefore contains only printable ASCII, with spaces as the
/// sole separator.
pub fn clean(text: &str) -> String {
	text.chars()
		.map(|c| {
			let code = c as u32;
			if code < 0x20 || code > 0x7E {
				' '
			} else if STRIPPED_PUNCTUATION.contains(&c) {
				' '
			} else {
				c
			}
		})
		.collect()
}

/// Splits cleaned text into tokens on whitespace.
///
/// Empty fragments are dropped, so every returned token is a non-empty
/// string with no embedded whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// Loads and tokenizes every `.txt` file directly contained in a directory.
///
/// # Parameters
/// - `dir`: Path to a directory with input text files.
///   Both `"folder"` and `"folder/"` are accepted.
///
/// # Behavior
/// - Lists all files with the `.txt` extension in the given directory
///   (subdirectories are ignored).
/// - Concatenates their contents, separated by spaces.
/// - Cleans and tokenizes the result.
///
/// # Errors
/// - Returns `InvalidConfiguration` if the path is not a directory.
/// - Returns `Io` if a file cannot be read.
///
/// # Notes
/// - A directory with no `.txt` files yields an empty token list; the
///   builder will then produce an empty table and the walker will reject it.
pub fn load_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
	let string_path = match dir.as_ref().to_str() {
		Some(s) => s,
		None => return Err(GenError::InvalidConfiguration("Invalid directory path".to_owned())),
	};
	// Normalize "folder" / "folder/"
	let folder = io::normalize_folder(string_path);

	if !folder.is_dir() {
		return Err(GenError::InvalidConfiguration(format!(
			"Expected a directory, got: {}",
			folder.display()
		)));
	}

	let files = io::list_files(&folder, "txt")?;
	if files.is_empty() {
		log::warn!("no .txt files found in {}", folder.display());
	} else {
		log::info!("found {} input files in {}", files.len(), folder.display());
	}

	let mut raw = String::new();
	for file in &files {
		log::debug!("reading {file}");
		raw.push_str(&io::read_file(folder.join(file))?);
		raw.push(' ');
	}
	log::info!("characters of input text: {}", raw.len());

	let tokens = tokenize(&clean(&raw));
	log::info!("tokens after cleaning: {}", tokens.len());
	Ok(tokens)
}
