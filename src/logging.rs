//! Logging prelude module for convenient access to tracing macros.
//!
//! Engine-internal diagnostics go through `tracing`; user-facing log
//! events go through [`crate::event::EventSink`]. The two streams are
//! independent on purpose: the UI collaborator renders the event stream,
//! while tracing output is for operators and debugging.

pub use tracing::{debug, error, info, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// By default, logs at INFO level and above are displayed. Control the log level
/// with the `RUST_LOG` environment variable:
///
/// ```bash
/// RUST_LOG=debug ftpmirror watch
/// RUST_LOG=ftpmirror::queue=trace ftpmirror watch
/// ```
pub fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.init();
}

// vim: ts=4
