use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Name of a corpus document: its file name without the extension.
///
/// `texts/fraga-ribbing-2015-08-14.txt` is the corpus `fraga-ribbing-2015-08-14`.
pub fn corpus_name(path: &Path) -> io::Result<String> {
	match path.file_stem() {
		Some(stem) => Ok(stem.to_string_lossy().into_owned()),
		None => Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("no corpus name in {}", path.display()),
		)),
	}
}

/// Resolves the corpus folder, turning `.` (or `./`) into the current
/// working directory. Any other path is kept untouched.
pub fn resolve_folder(folder: &Path) -> PathBuf {
	if folder == Path::new(".") {
		return env::current_dir().unwrap_or_else(|_| folder.to_path_buf());
	}
	folder.to_path_buf()
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted so that corpora are always
/// ingested in the same order.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
