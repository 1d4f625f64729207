//! Outward event surface for the UI collaborator.
//!
//! The engine never talks to a window, tray or terminal directly. Every
//! notable state change and task outcome becomes a [`UiEvent`] on an
//! unbounded channel; whatever hosts the engine (the bundled CLI, a GUI
//! shell) receives and renders them.

use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc;

/// Severity of a log event, as rendered by the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Info,
	Success,
	Error,
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LogLevel::Info => write!(f, "info"),
			LogLevel::Success => write!(f, "success"),
			LogLevel::Error => write!(f, "error"),
		}
	}
}

/// One log line for the UI: message, severity, wall-clock time
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
	pub msg: String,
	#[serde(rename = "type")]
	pub level: LogLevel,
	pub time: String,
}

/// Events emitted to the UI collaborator
#[derive(Debug, Clone)]
pub enum UiEvent {
	/// A log line to display
	Log(LogEvent),

	/// The initial connection attempt during start failed; the caller
	/// should reset its start/stop controls
	SyncError,

	/// The task queue drained completely
	CaughtUp,

	/// An external affordance (tray icon) asked the caller to flip
	/// start/stop; the engine does not track the caller's UI state
	ToggleSyncRequest,
}

/// Cloneable sender handle for [`UiEvent`]s.
///
/// Sends never block and never fail loudly: if the receiving side is gone
/// the event is simply dropped, which is the right behavior for a UI that
/// has closed.
#[derive(Clone)]
pub struct EventSink {
	tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventSink {
	/// Create a sink plus the receiving end for the UI collaborator
	pub fn channel() -> (EventSink, mpsc::UnboundedReceiver<UiEvent>) {
		let (tx, rx) = mpsc::unbounded_channel();
		(EventSink { tx }, rx)
	}

	pub fn send(&self, event: UiEvent) {
		let _ = self.tx.send(event);
	}

	pub fn info(&self, msg: impl Into<String>) {
		self.log(LogLevel::Info, msg.into());
	}

	pub fn success(&self, msg: impl Into<String>) {
		self.log(LogLevel::Success, msg.into());
	}

	pub fn error(&self, msg: impl Into<String>) {
		self.log(LogLevel::Error, msg.into());
	}

	/// Queue drained: notify and log
	pub fn caught_up(&self) {
		self.send(UiEvent::CaughtUp);
		self.info("Sync caught up.");
	}

	fn log(&self, level: LogLevel, msg: String) {
		let time = chrono::Local::now().format("%H:%M:%S").to_string();
		self.send(UiEvent::Log(LogEvent { msg, level, time }));
	}
}


// vim: ts=4
