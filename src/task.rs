//! Sync task types: one unit of remote work per filesystem event.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ProjectMapping;

/// The remote operation a filesystem event resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
	Upload,
	DeleteFile,
	DeleteDir,
}

impl fmt::Display for SyncAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncAction::Upload => write!(f, "upload"),
			SyncAction::DeleteFile => write!(f, "delete_file"),
			SyncAction::DeleteDir => write!(f, "delete_dir"),
		}
	}
}

/// One queued unit of remote work.
///
/// Tasks have no identity beyond their FIFO position: rapid repeated
/// events for the same path queue as many tasks, none are coalesced.
#[derive(Debug, Clone)]
pub struct SyncTask {
	pub action: SyncAction,

	/// Absolute local path the event fired for
	pub local_path: PathBuf,

	/// Owning project mapping, shared for the session
	pub project: Arc<ProjectMapping>,
}

impl SyncTask {
	/// Path relative to the project root, for display in log events
	pub fn display_path(&self) -> String {
		self.local_path
			.strip_prefix(&self.project.local)
			.unwrap_or(&self.local_path)
			.to_string_lossy()
			.replace('\\', "/")
	}
}

// vim: ts=4
