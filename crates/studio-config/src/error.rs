// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur while locating, reading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A config file exists but could not be read.
	#[error("Failed to read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A non-blank, non-comment line is not a `key=value` pair.
	#[error("Invalid line in config: \"{0}\"")]
	InvalidLine(String),

	/// The `api` value is not a URL.
	#[error("Invalid API URL {url:?}: {source}")]
	InvalidApiUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	/// No token in the config file or the environment.
	#[error("Missing .studio or ~/.studio config file or STUDIO_TOKEN environment variable")]
	MissingToken,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
