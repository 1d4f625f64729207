//! FTP-backed implementation of the [`RemoteClient`] contract.
//!
//! Built on the blocking `suppaftp` stream, driven through
//! `spawn_blocking`. The queue guarantees at most one operation in flight,
//! so the stream simply moves into the blocking closure and back. FTP
//! status 550 surfaces as [`RemoteError::NotFound`]; connection-level
//! failures mark the stream closed so the next task triggers exactly one
//! reconnect.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream, Status};

use crate::error::RemoteError;
use crate::remote::RemoteClient;

/// Single FTP connection with closed/open lifecycle
pub struct FtpClient {
	stream: Option<FtpStream>,
}

impl FtpClient {
	pub fn new() -> Self {
		FtpClient { stream: None }
	}

	/// Run one blocking operation against the open stream.
	///
	/// The stream is handed back afterwards unless the operation reported
	/// a dropped connection, in which case the session stays closed.
	async fn run_blocking<T, F>(&mut self, op: F) -> Result<T, RemoteError>
	where
		T: Send + 'static,
		F: FnOnce(&mut FtpStream) -> Result<T, RemoteError> + Send + 'static,
	{
		let mut stream = match self.stream.take() {
			Some(s) => s,
			None => {
				return Err(RemoteError::Disconnected(io::Error::new(
					io::ErrorKind::NotConnected,
					"no open connection",
				)))
			}
		};

		let (stream, result) = tokio::task::spawn_blocking(move || {
			let result = op(&mut stream);
			(stream, result)
		})
		.await
		.map_err(|e| RemoteError::Io(io::Error::new(io::ErrorKind::Other, e)))?;

		match &result {
			Err(RemoteError::Disconnected(_)) => {}
			_ => self.stream = Some(stream),
		}

		result
	}
}

impl Default for FtpClient {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl RemoteClient for FtpClient {
	async fn connect(
		&mut self,
		host: &str,
		user: &str,
		password: &str,
		port: u16,
	) -> Result<(), RemoteError> {
		// Drop any stale stream first
		self.close().await;

		let addr = format!("{}:{}", host, port);
		let host = host.to_string();
		let user = user.to_string();
		let password = password.to_string();

		let stream = tokio::task::spawn_blocking(move || {
			let connect_err = |e: FtpError| RemoteError::ConnectFailed {
				host: host.clone(),
				message: e.to_string(),
			};

			let mut stream = FtpStream::connect(&addr).map_err(connect_err)?;
			stream.login(&user, &password).map_err(connect_err)?;
			stream.transfer_type(FileType::Binary).map_err(connect_err)?;
			Ok::<_, RemoteError>(stream)
		})
		.await
		.map_err(|e| RemoteError::Io(io::Error::new(io::ErrorKind::Other, e)))??;

		self.stream = Some(stream);
		Ok(())
	}

	fn is_closed(&self) -> bool {
		self.stream.is_none()
	}

	async fn close(&mut self) {
		if let Some(mut stream) = self.stream.take() {
			let _ = tokio::task::spawn_blocking(move || stream.quit()).await;
		}
	}

	async fn ensure_dir(&mut self, path: &str) -> Result<(), RemoteError> {
		let path = path.to_string();
		self.run_blocking(move |stream| ensure_dir_blocking(stream, &path)).await
	}

	async fn upload_file(&mut self, local: &Path, remote: &str) -> Result<(), RemoteError> {
		let local = local.to_path_buf();
		let remote = remote.to_string();
		self.run_blocking(move |stream| {
			let mut file = std::fs::File::open(&local).map_err(RemoteError::Io)?;
			stream.put_file(&remote, &mut file).map(|_| ()).map_err(map_ftp)
		})
		.await
	}

	async fn remove_file(&mut self, path: &str) -> Result<(), RemoteError> {
		let path = path.to_string();
		self.run_blocking(move |stream| stream.rm(&path).map_err(map_ftp)).await
	}

	async fn remove_dir(&mut self, path: &str) -> Result<(), RemoteError> {
		let path = path.to_string();
		self.run_blocking(move |stream| stream.rmdir(&path).map_err(map_ftp)).await
	}
}

/// Create every missing directory along `path`, root-first.
///
/// mkdir on an existing directory is refused by the server; that refusal
/// is indistinguishable from other policy refusals here, so all
/// non-connection refusals are tolerated and a genuinely broken chain is
/// reported by the transfer that follows.
fn ensure_dir_blocking(stream: &mut FtpStream, path: &str) -> Result<(), RemoteError> {
	let absolute = path.starts_with('/');
	let mut prefix = String::new();

	for part in path.split('/').filter(|p| !p.is_empty()) {
		if prefix.is_empty() {
			if absolute {
				prefix.push('/');
			}
		} else {
			prefix.push('/');
		}
		prefix.push_str(part);

		match stream.mkdir(&prefix) {
			Ok(_) => {}
			Err(FtpError::UnexpectedResponse(_)) => {}
			Err(e) => return Err(map_ftp(e)),
		}
	}

	Ok(())
}

/// Map protocol errors onto the structured [`RemoteError`] taxonomy
fn map_ftp(e: FtpError) -> RemoteError {
	match e {
		FtpError::UnexpectedResponse(ref resp) if resp.status == Status::FileUnavailable => {
			RemoteError::NotFound
		}
		FtpError::ConnectionError(e) => RemoteError::Disconnected(e),
		other => RemoteError::Rejected { message: other.to_string() },
	}
}

// vim: ts=4
