use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a text file and returns its whole contents as a `String`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted so ingest order is stable.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() {
			if path.extension() == Some(std::ffi::OsStr::new(extension)) {
				if let Some(name) = path.file_name() {
					files.push(name.to_string_lossy().to_string());
				}
			}
		}
	}

	files.sort();
	Ok(files)
}
