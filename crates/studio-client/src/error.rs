// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Studio client.

use std::time::Duration;

use studio_core::BuildStatus;
use thiserror::Error;

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while talking to the Studio API.
#[derive(Debug, Error)]
pub enum ClientError {
	/// HTTP request failed (connection, transport timeout, body decoding).
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// A URL handed to the client could not be parsed.
	#[error("invalid URL {url:?}: {source}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	/// The account has no quota left for another upload.
	#[error("{0}")]
	PaymentRequired(String),

	/// The token may not create uploads.
	#[error("{0}")]
	Forbidden(String),

	/// The server answered with a status code the endpoint does not expect.
	#[error("unexpected HTTP status {status} from {url}")]
	UnexpectedStatus { status: u16, url: String },

	/// Compressing the upload payload failed.
	#[error("gzip failure: {0}")]
	Compression(#[source] std::io::Error),
}

/// Reasons a status poll ends without a report.
#[derive(Debug, Error)]
pub enum PollError {
	/// A status request failed. Never retried.
	#[error(transparent)]
	Transport(#[from] ClientError),

	/// The server reported a status this client does not know.
	#[error("Unknown build status \"{0}\"")]
	UnknownStatus(String),

	/// The build stayed non-terminal for longer than its status allows.
	#[error("Timeout after {elapsed:?} while build was {status}")]
	Timeout { status: BuildStatus, elapsed: Duration },

	/// A terminal response did not decode into a build report.
	#[error("invalid build report: {0}")]
	InvalidReport(#[from] serde_json::Error),
}
