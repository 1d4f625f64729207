//! Remote session management: the single stateful connection and the
//! execution of sync tasks against it.
//!
//! The session owns the one [`RemoteClient`] instance process-wide.
//! Liveness is checked before every task; a closed connection is reopened
//! transparently (one attempt) with the session credentials. No error from
//! a single task escapes [`RemoteSession::execute`]: every outcome, good
//! or bad, is converted into a log event and control returns to the queue.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::config::GlobalConfig;
use crate::error::RemoteError;
use crate::event::EventSink;
use crate::logging::*;
use crate::pathmap;
use crate::task::{SyncAction, SyncTask};

/// Contract the remote-protocol client library must fulfill.
///
/// Not-found conditions must surface as [`RemoteError::NotFound`] so
/// callers can distinguish "already absent" from real failures without
/// inspecting message strings.
#[async_trait]
pub trait RemoteClient: Send {
	/// Open the connection and authenticate
	async fn connect(
		&mut self,
		host: &str,
		user: &str,
		password: &str,
		port: u16,
	) -> Result<(), RemoteError>;

	/// True when the connection is not currently open
	fn is_closed(&self) -> bool;

	/// Close the connection; a no-op when already closed
	async fn close(&mut self);

	/// Create `path` and any missing intermediate directories
	async fn ensure_dir(&mut self, path: &str) -> Result<(), RemoteError>;

	/// Transfer the local file to `remote`, overwriting an existing file
	async fn upload_file(&mut self, local: &Path, remote: &str) -> Result<(), RemoteError>;

	async fn remove_file(&mut self, path: &str) -> Result<(), RemoteError>;

	/// Remove the directory at `path` (per underlying protocol semantics)
	async fn remove_dir(&mut self, path: &str) -> Result<(), RemoteError>;
}

/// The single remote session: one client, one set of credentials,
/// reopened on demand for the lifetime of a sync session.
pub struct RemoteSession<C> {
	client: C,
	config: Arc<GlobalConfig>,
	events: EventSink,
}

impl<C: RemoteClient> RemoteSession<C> {
	pub fn new(client: C, config: Arc<GlobalConfig>, events: EventSink) -> Self {
		RemoteSession { client, config, events }
	}

	/// Open the connection with the session credentials.
	///
	/// Used both for the initial connection test during start and for
	/// transparent reconnects between tasks.
	pub async fn connect(&mut self) -> Result<(), RemoteError> {
		let config = &self.config;
		self.client.connect(&config.host, &config.user, &config.password, config.port()).await
	}

	pub async fn close(&mut self) {
		self.client.close().await;
	}

	/// Execute one task. Never fails outward: failures become error log
	/// events and the queue moves on.
	pub async fn execute(&mut self, task: &SyncTask) {
		let project = &task.project;
		let display = task.display_path();

		let remote_path =
			match pathmap::to_remote_path(&project.local, &project.remote, &task.local_path) {
				Some(p) => p,
				None => {
					// Watchers only emit paths under their root; getting
					// here means the mapping is broken, not the task.
					self.events.error(format!(
						"Error ({}): {} is outside project root {}",
						task.action,
						task.local_path.display(),
						project.local.display()
					));
					return;
				}
			};

		// Reconnect transparently if the connection dropped since the
		// previous task.
		if self.client.is_closed() {
			debug!("connection closed, reconnecting to {}", self.config.host);
			if let Err(e) = self.connect().await {
				self.events.error(format!("Error ({}): {}", task.action, e));
				return;
			}
		}

		match task.action {
			SyncAction::Upload => {
				self.events.info(format!("[upload] {}", display));
				match self.upload(&task.local_path, &remote_path).await {
					Ok(()) => self.events.success(format!("Uploaded: {}", display)),
					Err(e) => self.events.error(format!("Error (upload): {}", e)),
				}
			}
			SyncAction::DeleteFile => {
				self.events.info(format!("[delete_file] {}", display));
				match self.client.remove_file(&remote_path).await {
					Ok(()) => self.events.success(format!("Removed: {}", display)),
					// Already absent: the desired outcome
					Err(ref e) if e.is_not_found() => {
						self.events.success(format!("Removed: {} (already absent)", display))
					}
					Err(e) => self.events.error(format!("Error (delete_file): {}", e)),
				}
			}
			SyncAction::DeleteDir => {
				self.events.info(format!("[delete_dir] {}", display));
				match self.client.remove_dir(&remote_path).await {
					Ok(()) => self.events.success(format!("Folder removed: {}", display)),
					Err(ref e) if e.is_not_found() => {
						self.events.success(format!("Folder removed: {} (already absent)", display))
					}
					Err(e) => self.events.error(format!("Error (delete_dir): {}", e)),
				}
			}
		}
	}

	async fn upload(&mut self, local: &Path, remote_path: &str) -> Result<(), RemoteError> {
		if let Some(parent) = pathmap::remote_parent(remote_path) {
			self.client.ensure_dir(parent).await?;
		}
		self.client.upload_file(local, remote_path).await
	}
}

// vim: ts=4
