// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for source map loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or decoding a source map.
#[derive(Debug, Error)]
pub enum SourceMapError {
	#[error("Invalid source map JSON: {0}")]
	InvalidJson(#[from] serde_json::Error),

	#[error("Invalid source map version: expected 3, got {0}")]
	InvalidVersion(u32),

	#[error("Invalid VLQ character {ch:?} in mappings segment {segment:?}")]
	InvalidVlqChar { ch: char, segment: String },

	#[error("Truncated VLQ value in mappings segment {0:?}")]
	TruncatedVlq(String),

	#[error("Mapping segment {segment:?} has {count} fields, expected 1, 4 or 5")]
	InvalidSegmentLength { segment: String, count: usize },

	#[error("Mapping references source index {0} which does not exist")]
	InvalidSourceIndex(i64),

	#[error("Inline source map is not valid base64: {0}")]
	InvalidBase64(#[from] base64::DecodeError),

	#[error("Unsupported inline source map encoding: {0}")]
	UnsupportedEncoding(String),

	#[error("Failed to read source map file {path}: {source}")]
	ReadMapFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub type Result<T> = std::result::Result<T, SourceMapError>;
