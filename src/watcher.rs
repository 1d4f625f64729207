//! Project watcher set: one debounced filesystem watch per project.
//!
//! Each watch is recursive over the project's local root, with the fixed
//! system ignore set applied at this layer and a settle window so editors
//! and build tools can finish their write bursts before a file is treated
//! as complete. The `notify` backend only reports changes that happen
//! after the watch starts; the initial directory contents never become
//! events.

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, RecommendedCache};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::classify::{classify, ChangeKind, Classified};
use crate::config::ProjectMapping;
use crate::error::SyncError;
use crate::event::EventSink;
use crate::ignore;
use crate::logging::*;
use crate::queue::TaskSender;
use crate::task::SyncTask;

/// Settle window: a written file is stable once unchanged for this long
const STABILITY_THRESHOLD: Duration = Duration::from_millis(500);

/// Tick rate for the settle-window bookkeeping
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One live watch, kept alive until dropped
struct ProjectWatcher {
	project: Arc<ProjectMapping>,
	_debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
}

/// All watches of the running sync session
pub struct WatcherSet {
	watchers: Vec<ProjectWatcher>,
}

impl WatcherSet {
	pub fn new() -> Self {
		WatcherSet { watchers: Vec::new() }
	}

	pub fn len(&self) -> usize {
		self.watchers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.watchers.is_empty()
	}

	/// Start watching one project root.
	///
	/// Qualifying raw events are classified and filtered on the watch
	/// thread; resulting tasks go straight into the queue. Watch-level
	/// errors become error log events, never panics.
	pub fn watch_project(
		&mut self,
		project: Arc<ProjectMapping>,
		tasks: TaskSender,
		events: EventSink,
	) -> Result<(), SyncError> {
		let rules = project.user_rules();
		let handler_project = project.clone();

		let mut debouncer =
			new_debouncer(STABILITY_THRESHOLD, Some(POLL_INTERVAL), move |result: DebounceEventResult| {
				match result {
					Ok(batch) => {
						for debounced in batch {
							handle_event(&debounced.event, &handler_project, &rules, &tasks, &events);
						}
					}
					Err(errors) => {
						for e in errors {
							events.error(format!("Watch error: {}", e));
						}
					}
				}
			})
			.map_err(|e| SyncError::WatchFailed {
				path: project.local.display().to_string(),
				message: e.to_string(),
			})?;

		debouncer.watch(&project.local, RecursiveMode::Recursive).map_err(|e| {
			SyncError::WatchFailed {
				path: project.local.display().to_string(),
				message: e.to_string(),
			}
		})?;

		debug!("watching {}", project.local.display());
		self.watchers.push(ProjectWatcher { project, _debouncer: debouncer });
		Ok(())
	}

	/// Tear down every watch. Synchronous: when this returns, no watch
	/// thread will push further tasks, so a new session can start clean.
	pub fn close_all(&mut self) {
		for watcher in self.watchers.drain(..) {
			debug!("closing watch on {}", watcher.project.local.display());
			drop(watcher);
		}
	}
}

impl Default for WatcherSet {
	fn default() -> Self {
		Self::new()
	}
}

/// Classify one debounced event and enqueue whatever it resolves to
fn handle_event(
	event: &notify::Event,
	project: &Arc<ProjectMapping>,
	rules: &[String],
	tasks: &TaskSender,
	events: &EventSink,
) {
	for (kind, path) in change_kinds(event) {
		if ignore::is_system_ignored(&path) {
			continue;
		}

		// Some backends report directory creation with an unspecific
		// create/modify kind; reclassify so it is skipped like any
		// other directory creation.
		let kind = match kind {
			ChangeKind::Created | ChangeKind::Modified if path.is_dir() => ChangeKind::CreatedDir,
			other => other,
		};

		match classify(kind, &path, rules) {
			Classified::Action(action) => {
				let task =
					SyncTask { action, local_path: path, project: project.clone() };
				// The executor owning the receiver may already be gone
				// during shutdown; nothing to do about it here.
				let _ = tasks.send(task);
			}
			Classified::Ignored { quiet: false } => {
				let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
				events.info(format!("Ignored: {}", name.unwrap_or_else(|| path.display().to_string())));
			}
			Classified::Ignored { quiet: true } | Classified::Skip => {}
		}
	}
}

/// Flatten one notify event into typed changes.
///
/// Renames become remove/create pairs; there is no rename action on the
/// remote side. Removals whose original kind is unknowable (the path is
/// already gone) are treated as file removals.
fn change_kinds(event: &notify::Event) -> Vec<(ChangeKind, PathBuf)> {
	let mut changes = Vec::new();

	match event.kind {
		EventKind::Create(CreateKind::Folder) => {
			for p in &event.paths {
				changes.push((ChangeKind::CreatedDir, p.clone()));
			}
		}
		EventKind::Create(_) => {
			for p in &event.paths {
				changes.push((ChangeKind::Created, p.clone()));
			}
		}
		EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() == 2 => {
			changes.push((ChangeKind::RemovedFile, event.paths[0].clone()));
			changes.push((ChangeKind::Created, event.paths[1].clone()));
		}
		EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
			for p in &event.paths {
				changes.push((ChangeKind::RemovedFile, p.clone()));
			}
		}
		EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
			for p in &event.paths {
				changes.push((ChangeKind::Created, p.clone()));
			}
		}
		EventKind::Modify(ModifyKind::Name(_)) => {
			// Unpaired rename halves: whichever side still exists was
			// the destination
			for p in &event.paths {
				if p.exists() {
					changes.push((ChangeKind::Created, p.clone()));
				} else {
					changes.push((ChangeKind::RemovedFile, p.clone()));
				}
			}
		}
		EventKind::Modify(_) => {
			for p in &event.paths {
				changes.push((ChangeKind::Modified, p.clone()));
			}
		}
		EventKind::Remove(RemoveKind::Folder) => {
			for p in &event.paths {
				changes.push((ChangeKind::RemovedDir, p.clone()));
			}
		}
		EventKind::Remove(_) => {
			for p in &event.paths {
				changes.push((ChangeKind::RemovedFile, p.clone()));
			}
		}
		_ => {}
	}

	changes
}

// vim: ts=4
