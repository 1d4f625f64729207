//! Event classifier: raw filesystem change to typed sync action.

use std::path::Path;

use crate::ignore;
use crate::task::SyncAction;

/// Raw change kinds the watcher reports, after debouncing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
	Created,
	Modified,
	CreatedDir,
	RemovedFile,
	RemovedDir,
}

/// Classification outcome for one raw change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
	/// Enqueue a task with this action
	Action(SyncAction),

	/// Matched an ignore rule. `quiet` is set for remove-kind changes:
	/// there is no point logging "ignored" for things already gone.
	Ignored { quiet: bool },

	/// No remote work implied (directory creation happens implicitly
	/// when a file upload creates its parents)
	Skip,
}

/// Classify one raw change against the owning project's ignore rules.
///
/// System rules are the watch layer's concern and are assumed to have
/// been applied already; `rules` are the per-project user rules.
pub fn classify(kind: ChangeKind, path: &Path, rules: &[String]) -> Classified {
	if kind == ChangeKind::CreatedDir {
		return Classified::Skip;
	}

	let file_name = match path.file_name() {
		Some(name) => name.to_string_lossy(),
		None => return Classified::Skip,
	};

	if ignore::should_ignore(&file_name, rules) {
		let quiet = matches!(kind, ChangeKind::RemovedFile | ChangeKind::RemovedDir);
		return Classified::Ignored { quiet };
	}

	match kind {
		ChangeKind::Created | ChangeKind::Modified => Classified::Action(SyncAction::Upload),
		ChangeKind::RemovedFile => Classified::Action(SyncAction::DeleteFile),
		ChangeKind::RemovedDir => Classified::Action(SyncAction::DeleteDir),
		ChangeKind::CreatedDir => Classified::Skip,
	}
}


// vim: ts=4
