//! Ignore filter: decides whether a path is excluded from sync.
//!
//! Two independent layers, system rules first:
//! - a fixed system rule set excludes tool and VCS litter no matter what
//!   the user configured;
//! - per-project user rules match file basenames, case-insensitively,
//!   either literally or by `*`-prefixed suffix.
//!
//! Both layers are pure predicates with no side effects.

use std::path::Path;

/// Path components that are never synced, regardless of user rules
pub const SYSTEM_IGNORED: [&str; 4] = ["node_modules", ".git", ".vscode", "desktop.ini"];

/// True when any component of `path` is one of the fixed system rules
pub fn is_system_ignored(path: &Path) -> bool {
	path.components().any(|component| {
		let name = component.as_os_str().to_string_lossy();
		SYSTEM_IGNORED.iter().any(|ignored| name == *ignored)
	})
}

/// True when `file_name` matches one of the user `rules`.
///
/// A rule starting with `*` matches by suffix (the rule minus the `*`);
/// any other rule matches the whole filename. Comparison is
/// case-insensitive on both sides.
pub fn should_ignore(file_name: &str, rules: &[String]) -> bool {
	let name = file_name.to_lowercase();

	rules.iter().any(|rule| {
		let rule = rule.to_lowercase();
		match rule.strip_prefix('*') {
			Some(suffix) => name.ends_with(suffix),
			None => name == rule,
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn rules(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|r| r.to_string()).collect()
	}

	#[test]
	fn test_wildcard_rule_matches_suffix() {
		let rules = rules(&["*.log"]);
		assert!(should_ignore("debug.log", &rules));
		assert!(should_ignore("DEBUG.LOG", &rules));
		assert!(should_ignore(".log", &rules));
		assert!(!should_ignore("debug.log.txt", &rules));
		assert!(!should_ignore("log", &rules));
	}

	#[test]
	fn test_literal_rule_matches_exactly() {
		let rules = rules(&["thumbs.db"]);
		assert!(should_ignore("Thumbs.db", &rules));
		assert!(should_ignore("THUMBS.DB", &rules));
		assert!(!should_ignore("thumbs.db.bak", &rules));
		assert!(!should_ignore("my-thumbs.db", &rules));
	}

	#[test]
	fn test_uppercase_rule_is_case_insensitive() {
		let rules = rules(&["*.TMP"]);
		assert!(should_ignore("scratch.tmp", &rules));
	}

	#[test]
	fn test_no_rules_ignores_nothing() {
		assert!(!should_ignore("anything.txt", &[]));
	}

	#[test]
	fn test_system_ignored_components() {
		assert!(is_system_ignored(&PathBuf::from("/proj/node_modules/pkg/index.js")));
		assert!(is_system_ignored(&PathBuf::from("/proj/.git/HEAD")));
		assert!(is_system_ignored(&PathBuf::from("/proj/.vscode/settings.json")));
		assert!(is_system_ignored(&PathBuf::from("/proj/sub/desktop.ini")));
		assert!(!is_system_ignored(&PathBuf::from("/proj/src/main.rs")));
		// Component match, not substring match
		assert!(!is_system_ignored(&PathBuf::from("/proj/my_node_modules_notes.txt")));
	}
}

// vim: ts=4
