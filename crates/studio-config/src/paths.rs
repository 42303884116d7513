// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Config file discovery.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::values::{parse_values, ConfigValues};

/// Config file locations in lookup order:
/// - `.studio` in the working directory
/// - `~/.studio`
/// - `$XDG_CONFIG_HOME/studio`, only when the variable is set
/// - `~/.config/studio`
/// - `~/.studio/config` (legacy)
pub fn candidate_files(home: Option<&Path>, xdg_config_home: Option<&Path>) -> Vec<PathBuf> {
	let mut candidates = vec![PathBuf::from(".studio")];
	if let Some(home) = home {
		candidates.push(home.join(".studio"));
	}
	if let Some(xdg) = xdg_config_home {
		candidates.push(xdg.join("studio"));
	}
	if let Some(home) = home {
		candidates.push(home.join(".config").join("studio"));
		candidates.push(home.join(".studio").join("config"));
	}
	candidates
}

/// Candidates for the current user and environment.
pub fn default_candidates() -> Vec<PathBuf> {
	let home = dirs::home_dir();
	let xdg = std::env::var_os("XDG_CONFIG_HOME")
		.filter(|value| !value.is_empty())
		.map(PathBuf::from);

	tracing::debug!(
		home = ?home,
		xdg_config_home = ?xdg,
		"resolving config locations"
	);

	candidate_files(home.as_deref(), xdg.as_deref())
}

/// Read the first candidate that exists as a file.
///
/// Missing candidates and directories are skipped; any other read failure
/// aborts. Returns `None` when no candidate exists.
pub fn load_first(candidates: &[PathBuf]) -> Result<Option<(PathBuf, ConfigValues)>> {
	for path in candidates {
		if path.is_dir() {
			tracing::trace!(path = %path.display(), "skipping config directory");
			continue;
		}
		match std::fs::read_to_string(path) {
			Ok(text) => {
				tracing::debug!(path = %path.display(), "using config file");
				return Ok(Some((path.clone(), parse_values(&text)?)));
			}
			Err(err) if err.kind() == ErrorKind::NotFound => {
				tracing::trace!(path = %path.display(), "no config file");
			}
			Err(source) => {
				return Err(ConfigError::Read {
					path: path.clone(),
					source,
				})
			}
		}
	}
	Ok(None)
}
