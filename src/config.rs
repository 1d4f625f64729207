//! Configuration model and settings persistence.
//!
//! A [`GlobalConfig`] is loaded once per `start` invocation and treated as
//! immutable for the duration of that sync session. Settings files are
//! relaxed JSON (json5) or TOML, chosen by extension, following the usual
//! `config.toml` / `config.json` convention.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SyncError;

/// Default FTP control port, used when the configured port is absent or
/// unparsable.
pub const DEFAULT_PORT: u16 = 21;

/// One local-folder-to-remote-folder pairing with its own ignore rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMapping {
	/// Local root to watch
	pub local: PathBuf,

	/// Remote root the local tree is mirrored under
	pub remote: String,

	/// Comma-separated ignore rules: literal filenames or `*`-prefixed
	/// suffix wildcards, case-insensitive (e.g. `"*.log, thumbs.db"`)
	pub ignored: Option<String>,
}

impl ProjectMapping {
	/// Split the raw ignore list into trimmed, lowercased rules
	pub fn user_rules(&self) -> Vec<String> {
		match &self.ignored {
			Some(raw) => raw
				.split(',')
				.map(|item| item.trim().to_lowercase())
				.filter(|item| !item.is_empty())
				.collect(),
			None => Vec::new(),
		}
	}
}

/// Remote server coordinates plus the list of projects to mirror
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
	pub host: String,
	pub user: String,
	pub password: String,

	/// Raw port value as entered in the settings form; see [`GlobalConfig::port`]
	pub port: Option<String>,

	pub projects: Vec<ProjectMapping>,
}

impl GlobalConfig {
	/// Parsed control port, falling back to 21 when absent or unparsable
	pub fn port(&self) -> u16 {
		self.port
			.as_deref()
			.and_then(|p| p.trim().parse().ok())
			.unwrap_or(DEFAULT_PORT)
	}
}

/// Default settings location: `~/.ftpmirror/settings.json`
pub fn default_settings_path() -> Result<PathBuf, SyncError> {
	match std::env::var("HOME") {
		Ok(home) => Ok(PathBuf::from(home).join(".ftpmirror").join("settings.json")),
		Err(_) => Err(SyncError::InvalidConfig {
			message: "Could not determine HOME directory".to_string(),
		}),
	}
}

/// Load settings from `path`.
///
/// A missing file is not an error: it yields the default configuration
/// with an empty project list, so a first run has something to show.
pub fn load_settings(path: &Path) -> Result<GlobalConfig, SyncError> {
	if !path.exists() {
		return Ok(GlobalConfig::default());
	}

	let contents = std::fs::read_to_string(path)?;

	let is_toml = path.extension().map(|e| e == "toml").unwrap_or(false);
	if is_toml {
		toml::from_str(&contents).map_err(|e| SyncError::InvalidConfig {
			message: format!("{}: {}", path.display(), e),
		})
	} else {
		json5::from_str(&contents).map_err(|e| SyncError::InvalidConfig {
			message: format!("{}: {}", path.display(), e),
		})
	}
}

/// Persist settings to `path`, creating parent directories as needed
pub fn save_settings(path: &Path, config: &GlobalConfig) -> Result<(), SyncError> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() && !parent.exists() {
			std::fs::create_dir_all(parent)?;
		}
	}

	let json = serde_json::to_string_pretty(config).map_err(|e| SyncError::InvalidConfig {
		message: format!("Failed to serialize settings: {}", e),
	})?;

	std::fs::write(path, json)?;
	Ok(())
}


// vim: ts=4
