//! Error types for sync and remote-session operations

use std::error::Error;
use std::fmt;
use std::io;

/// Main error type for sync-engine operations
#[derive(Debug)]
pub enum SyncError {
	/// No project folders configured at sync start
	NoProjects,

	/// Initial connection to the remote server failed
	ConnectionFailed { host: String, source: RemoteError },

	/// Filesystem watch could not be established
	WatchFailed { path: String, message: String },

	/// Invalid configuration
	InvalidConfig { message: String },

	/// I/O error
	Io(io::Error),
}

impl fmt::Display for SyncError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::NoProjects => {
				write!(f, "No project folders configured")
			}
			SyncError::ConnectionFailed { host, source } => {
				write!(f, "Failed to connect to {}: {}", host, source)
			}
			SyncError::WatchFailed { path, message } => {
				write!(f, "Failed to watch {}: {}", path, message)
			}
			SyncError::InvalidConfig { message } => {
				write!(f, "Invalid configuration: {}", message)
			}
			SyncError::Io(e) => write!(f, "I/O error: {}", e),
		}
	}
}

impl Error for SyncError {}

impl From<io::Error> for SyncError {
	fn from(e: io::Error) -> Self {
		SyncError::Io(e)
	}
}

impl From<String> for SyncError {
	fn from(e: String) -> Self {
		SyncError::InvalidConfig { message: e }
	}
}

/// Errors reported by the remote-protocol client.
///
/// `NotFound` is a first-class variant so callers can treat
/// delete-of-absent-path as the idempotent success it is, without
/// matching on status-code strings.
#[derive(Debug)]
pub enum RemoteError {
	/// The remote path does not exist (FTP 550)
	NotFound,

	/// Connecting or logging in to the server failed
	ConnectFailed { host: String, message: String },

	/// The connection dropped mid-operation; the session is closed
	Disconnected(io::Error),

	/// The server rejected the operation
	Rejected { message: String },

	/// Local I/O error (e.g. reading the file to upload)
	Io(io::Error),
}

impl RemoteError {
	/// True when the error means "the remote path is already gone".
	pub fn is_not_found(&self) -> bool {
		matches!(self, RemoteError::NotFound)
	}
}

impl fmt::Display for RemoteError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RemoteError::NotFound => write!(f, "Remote path not found"),
			RemoteError::ConnectFailed { host, message } => {
				write!(f, "Connection to {} failed: {}", host, message)
			}
			RemoteError::Disconnected(e) => write!(f, "Connection lost: {}", e),
			RemoteError::Rejected { message } => write!(f, "Server error: {}", message),
			RemoteError::Io(e) => write!(f, "I/O error: {}", e),
		}
	}
}

impl Error for RemoteError {}

impl From<io::Error> for RemoteError {
	fn from(e: io::Error) -> Self {
		RemoteError::Io(e)
	}
}

// vim: ts=4
