//! # ftpmirror - Folder-to-FTP Mirroring Engine
//!
//! ftpmirror watches locally configured project folders and mirrors every
//! change to a remote FTP server: file writes become uploads, deletions
//! propagate as remote removals. All remote work funnels through a single
//! FIFO queue and a single stateful connection with transparent
//! reconnection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ftpmirror::{EventSink, GlobalConfig, SyncController};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (events, mut rx) = EventSink::channel();
//!     let mut controller = SyncController::new(events);
//!
//!     let config: GlobalConfig = ftpmirror::load_settings("settings.json".as_ref()).unwrap();
//!     controller.start(config).await.unwrap();
//!
//!     while let Some(event) = rx.recv().await {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod classify;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod ftp;
pub mod ignore;
pub mod logging;
pub mod pathmap;
pub mod queue;
pub mod remote;
pub mod task;
pub mod watcher;

// Re-export commonly used types and functions
pub use config::{default_settings_path, load_settings, save_settings};
pub use config::{GlobalConfig, ProjectMapping};
pub use controller::SyncController;
pub use error::{RemoteError, SyncError};
pub use event::{EventSink, LogEvent, LogLevel, UiEvent};
pub use ftp::FtpClient;
pub use remote::{RemoteClient, RemoteSession};
pub use task::{SyncAction, SyncTask};

// vim: ts=4
