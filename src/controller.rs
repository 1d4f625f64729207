//! Sync controller: the stopped/starting/running state machine.
//!
//! Wires watchers to the queue and the queue to the remote session.
//! `start` is an idempotent restart: any previous session is fully torn
//! down first, so watchers are never doubled and no events leak across
//! sessions.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::GlobalConfig;
use crate::error::SyncError;
use crate::event::{EventSink, UiEvent};
use crate::ftp::FtpClient;
use crate::logging::*;
use crate::queue::{task_channel, ExecutorCommand, SerialExecutor};
use crate::remote::RemoteSession;
use crate::watcher::WatcherSet;

/// Handles of a running sync session
struct RunningSync {
	watchers: WatcherSet,
	ctrl: mpsc::Sender<ExecutorCommand>,
	executor: JoinHandle<()>,
}

/// Top-level state machine: Stopped until a start succeeds, Running until
/// stopped or restarted.
pub struct SyncController {
	events: EventSink,
	running: Option<RunningSync>,
}

impl SyncController {
	pub fn new(events: EventSink) -> Self {
		SyncController { events, running: None }
	}

	pub fn is_running(&self) -> bool {
		self.running.is_some()
	}

	/// Start syncing with the given configuration.
	///
	/// Transition order: tear down any previous session, validate the
	/// project list, test the remote connection, then create the executor
	/// and one watcher per project. On a configuration or connection
	/// failure nothing is left running and the state stays Stopped.
	pub async fn start(&mut self, config: GlobalConfig) -> Result<(), SyncError> {
		self.stop().await;

		self.events.info("Starting sync service...");

		if config.projects.is_empty() {
			self.events.error("No project folders configured!");
			return Err(SyncError::NoProjects);
		}

		let config = Arc::new(config);

		// Initial connection test; watchers are only created once the
		// server is known reachable.
		let mut session =
			RemoteSession::new(FtpClient::new(), config.clone(), self.events.clone());
		if let Err(e) = session.connect().await {
			self.events.error(format!("FTP error: {}", e));
			self.events.send(UiEvent::SyncError);
			return Err(SyncError::ConnectionFailed { host: config.host.clone(), source: e });
		}
		self.events.success("FTP connection established!");

		let (task_tx, task_rx) = task_channel();
		let (ctrl_tx, ctrl_rx) = mpsc::channel(4);
		let executor = tokio::spawn(
			SerialExecutor::new(session, task_rx, ctrl_rx, self.events.clone()).run(),
		);

		let mut watchers = WatcherSet::new();
		for project in &config.projects {
			let project = Arc::new(project.clone());
			// A root that cannot be watched does not abort the whole
			// session; the remaining projects still sync.
			if let Err(e) = watchers.watch_project(project, task_tx.clone(), self.events.clone())
			{
				self.events.error(format!("{}", e));
			}
		}

		if watchers.is_empty() {
			warn!("no watchable project roots, shutting sync back down");
			let _ = ctrl_tx.send(ExecutorCommand::Stop).await;
			let _ = executor.await;
			return Err(SyncError::WatchFailed {
				path: String::new(),
				message: "No watchable project roots".to_string(),
			});
		}

		self.events.info(format!("Watching {} project(s)...", watchers.len()));
		self.running = Some(RunningSync { watchers, ctrl: ctrl_tx, executor });
		Ok(())
	}

	/// Stop syncing: tear down watchers, drop the pending queue, close
	/// the remote connection. A no-op when already stopped.
	pub async fn stop(&mut self) {
		let mut run = match self.running.take() {
			Some(run) => run,
			None => return,
		};

		// Watchers first, so nothing new is enqueued while the executor
		// winds down. The executor drops whatever is still queued, lets
		// an in-flight task finish naturally and closes the session.
		run.watchers.close_all();
		let _ = run.ctrl.send(ExecutorCommand::Stop).await;
		let _ = run.executor.await;

		self.events.error("Sync service stopped.");
	}
}

// vim: ts=4
