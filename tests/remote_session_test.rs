//! Remote Session Tests - Validates reconnection and failure handling
//!
//! Tests that verify the session manager's contract:
//! - Delete of a path the server reports as not-found is a success
//! - A closed connection triggers exactly one reconnect before the task
//! - Upload ensures the remote parent directory chain first
//! - Task failures are converted to log events, never propagated

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use ftpmirror::config::{GlobalConfig, ProjectMapping};
use ftpmirror::error::RemoteError;
use ftpmirror::event::{EventSink, LogLevel, UiEvent};
use ftpmirror::remote::{RemoteClient, RemoteSession};
use ftpmirror::task::{SyncAction, SyncTask};

/// Scripted client: pops one prepared outcome per remote operation.
struct ScriptedClient {
	calls: Arc<Mutex<Vec<String>>>,
	closed: Arc<AtomicBool>,
	script: Arc<Mutex<VecDeque<Result<(), RemoteError>>>>,
}

impl ScriptedClient {
	fn new(closed: bool) -> Self {
		ScriptedClient {
			calls: Arc::new(Mutex::new(Vec::new())),
			closed: Arc::new(AtomicBool::new(closed)),
			script: Arc::new(Mutex::new(VecDeque::new())),
		}
	}

	fn push_outcome(&self, outcome: Result<(), RemoteError>) {
		self.script.lock().unwrap().push_back(outcome);
	}

	fn next_outcome(&self) -> Result<(), RemoteError> {
		self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
	}
}

#[async_trait]
impl RemoteClient for ScriptedClient {
	async fn connect(
		&mut self,
		host: &str,
		_user: &str,
		_password: &str,
		port: u16,
	) -> Result<(), RemoteError> {
		self.calls.lock().unwrap().push(format!("connect {}:{}", host, port));
		self.closed.store(false, Ordering::SeqCst);
		Ok(())
	}

	fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	async fn close(&mut self) {
		self.closed.store(true, Ordering::SeqCst);
	}

	async fn ensure_dir(&mut self, path: &str) -> Result<(), RemoteError> {
		self.calls.lock().unwrap().push(format!("ensure_dir {}", path));
		Ok(())
	}

	async fn upload_file(&mut self, _local: &Path, remote: &str) -> Result<(), RemoteError> {
		self.calls.lock().unwrap().push(format!("upload {}", remote));
		self.next_outcome()
	}

	async fn remove_file(&mut self, path: &str) -> Result<(), RemoteError> {
		self.calls.lock().unwrap().push(format!("remove_file {}", path));
		self.next_outcome()
	}

	async fn remove_dir(&mut self, path: &str) -> Result<(), RemoteError> {
		self.calls.lock().unwrap().push(format!("remove_dir {}", path));
		self.next_outcome()
	}
}

fn test_config() -> Arc<GlobalConfig> {
	Arc::new(GlobalConfig {
		host: "ftp.example.com".to_string(),
		user: "deploy".to_string(),
		password: "secret".to_string(),
		port: Some("2121".to_string()),
		projects: Vec::new(),
	})
}

fn test_project() -> Arc<ProjectMapping> {
	Arc::new(ProjectMapping {
		local: PathBuf::from("/proj"),
		remote: "/web".to_string(),
		ignored: None,
	})
}

fn task(action: SyncAction, rel: &str) -> SyncTask {
	SyncTask {
		action,
		local_path: PathBuf::from("/proj").join(rel),
		project: test_project(),
	}
}

fn drain_logs(rx: &mut tokio::sync::mpsc::UnboundedReceiver<UiEvent>) -> Vec<(LogLevel, String)> {
	let mut logs = Vec::new();
	while let Ok(event) = rx.try_recv() {
		if let UiEvent::Log(log) = event {
			logs.push((log.level, log.msg));
		}
	}
	logs
}

#[tokio::test]
async fn test_not_found_delete_is_success() {
	let client = ScriptedClient::new(false);
	client.push_outcome(Err(RemoteError::NotFound));

	let (events, mut ev_rx) = EventSink::channel();
	let mut session = RemoteSession::new(client, test_config(), events);

	session.execute(&task(SyncAction::DeleteFile, "gone.txt")).await;

	let logs = drain_logs(&mut ev_rx);
	assert!(
		logs.iter().any(|(level, _)| *level == LogLevel::Success),
		"not-found delete must log success: {:?}",
		logs
	);
	assert!(
		logs.iter().all(|(level, _)| *level != LogLevel::Error),
		"not-found delete must not log an error: {:?}",
		logs
	);
}

#[tokio::test]
async fn test_not_found_delete_dir_is_success() {
	let client = ScriptedClient::new(false);
	client.push_outcome(Err(RemoteError::NotFound));

	let (events, mut ev_rx) = EventSink::channel();
	let mut session = RemoteSession::new(client, test_config(), events);

	session.execute(&task(SyncAction::DeleteDir, "olddir")).await;

	let logs = drain_logs(&mut ev_rx);
	assert!(logs.iter().any(|(level, _)| *level == LogLevel::Success));
	assert!(logs.iter().all(|(level, _)| *level != LogLevel::Error));
}

#[tokio::test]
async fn test_closed_connection_reconnects_exactly_once() {
	let client = ScriptedClient::new(true);
	let calls = client.calls.clone();

	let (events, _ev_rx) = EventSink::channel();
	let mut session = RemoteSession::new(client, test_config(), events);

	session.execute(&task(SyncAction::Upload, "src/a.txt")).await;

	{
		let calls = calls.lock().unwrap();
		assert_eq!(calls[0], "connect ftp.example.com:2121");
		assert!(calls.iter().any(|c| c == "upload /web/src/a.txt"));
		assert_eq!(calls.iter().filter(|c| c.starts_with("connect")).count(), 1);
	}

	// Connection stays open: the next task must not reconnect
	session.execute(&task(SyncAction::Upload, "src/b.txt")).await;

	let calls = calls.lock().unwrap();
	assert_eq!(calls.iter().filter(|c| c.starts_with("connect")).count(), 1);
}

#[tokio::test]
async fn test_upload_ensures_parent_directory_first() {
	let client = ScriptedClient::new(false);
	let calls = client.calls.clone();

	let (events, _ev_rx) = EventSink::channel();
	let mut session = RemoteSession::new(client, test_config(), events);

	session.execute(&task(SyncAction::Upload, "assets/css/site.css")).await;

	let calls = calls.lock().unwrap();
	assert_eq!(calls[0], "ensure_dir /web/assets/css");
	assert_eq!(calls[1], "upload /web/assets/css/site.css");
}

#[tokio::test]
async fn test_task_failure_becomes_error_log() {
	let client = ScriptedClient::new(false);
	client.push_outcome(Err(RemoteError::Rejected { message: "quota exceeded".to_string() }));

	let (events, mut ev_rx) = EventSink::channel();
	let mut session = RemoteSession::new(client, test_config(), events);

	// Must not panic or propagate
	session.execute(&task(SyncAction::Upload, "big.bin")).await;

	let logs = drain_logs(&mut ev_rx);
	assert!(logs
		.iter()
		.any(|(level, msg)| *level == LogLevel::Error && msg.contains("quota exceeded")));
}

// vim: ts=4
