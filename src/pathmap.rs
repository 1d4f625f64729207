//! Path mapper: local filesystem path to canonical remote path.

use std::path::Path;

/// Map `path` (inside `local_root`) to its remote counterpart under
/// `remote_root`.
///
/// The relative part is joined to `remote_root` with a single `/`,
/// platform separators are normalized to `/`, and doubled slashes are
/// collapsed (a `remote_root` with a trailing `/` must not produce `//`).
/// Returns `None` when `path` is not under `local_root`; a watcher never
/// produces such a path, but the mapper stays total and pure.
pub fn to_remote_path(local_root: &Path, remote_root: &str, path: &Path) -> Option<String> {
	let relative = path.strip_prefix(local_root).ok()?;
	let relative = relative.to_string_lossy().replace('\\', "/");

	let mut joined = format!("{}/{}", remote_root, relative);
	while joined.contains("//") {
		joined = joined.replace("//", "/");
	}

	Some(joined)
}

/// Parent directory of a remote path, if it has one
pub fn remote_parent(remote_path: &str) -> Option<&str> {
	match remote_path.rfind('/') {
		Some(0) => Some("/"),
		Some(idx) => Some(&remote_path[..idx]),
		None => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_basic_mapping() {
		let local = PathBuf::from("/proj");
		let path = PathBuf::from("/proj/src/a.txt");
		assert_eq!(to_remote_path(&local, "/web", &path).unwrap(), "/web/src/a.txt");
	}

	#[test]
	fn test_trailing_slash_remote_root_collapses() {
		let local = PathBuf::from("/proj");
		let path = PathBuf::from("/proj/sub/file");
		let mapped = to_remote_path(&local, "/web/", &path).unwrap();
		assert_eq!(mapped, "/web/sub/file");
		assert!(!mapped.contains("//"));
	}

	#[test]
	fn test_relative_remote_root() {
		let local = PathBuf::from("/proj");
		let path = PathBuf::from("/proj/index.html");
		assert_eq!(to_remote_path(&local, "htdocs", &path).unwrap(), "htdocs/index.html");
	}

	#[test]
	fn test_path_outside_root() {
		let local = PathBuf::from("/proj");
		let path = PathBuf::from("/elsewhere/file");
		assert!(to_remote_path(&local, "/web", &path).is_none());
	}

	#[test]
	fn test_remote_parent() {
		assert_eq!(remote_parent("/web/src/a.txt"), Some("/web/src"));
		assert_eq!(remote_parent("/a.txt"), Some("/"));
		assert_eq!(remote_parent("a.txt"), None);
	}
}

// vim: ts=4
