// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-side build status and its per-status polling metadata.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Status of an analysis build as reported by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
	/// The server has not yet assigned a status to the upload.
	Unknown,
	/// Build record exists, nothing has been processed yet.
	Created,
	/// The uploaded artifact is being fetched.
	Loading,
	/// The uploaded artifact is ready for analysis.
	Loaded,
	/// Analysis is running.
	Analyzing,
	/// The build could not be processed at all.
	Error,
	/// Analysis finished and found issues.
	Failed,
	/// Analysis finished without issues.
	Success,
}

impl BuildStatus {
	pub const ALL: [BuildStatus; 8] = [
		Self::Unknown,
		Self::Created,
		Self::Loading,
		Self::Loaded,
		Self::Analyzing,
		Self::Error,
		Self::Failed,
		Self::Success,
	];

	/// Human readable label shown whenever the status changes.
	pub fn label(self) -> &'static str {
		match self {
			Self::Unknown => "⏳  Waiting for build",
			Self::Created => "✨  Build created",
			Self::Loading => "📦  Loading upload",
			Self::Loaded => "📦  Upload loaded",
			Self::Analyzing => "🔮  Analyzing",
			Self::Error => "🚨  Build error",
			Self::Failed => "⚠️  Build completed with issues",
			Self::Success => "✅  Build completed. No issues found.",
		}
	}

	/// Whether polling stops once this status is observed.
	pub fn is_terminal(self) -> bool {
		matches!(self, Self::Error | Self::Failed | Self::Success)
	}

	/// Maximum time since the first status request after which a build still
	/// reporting this status is considered stuck. `None` for terminal statuses.
	pub fn liveness_timeout(self) -> Option<Duration> {
		match self {
			Self::Unknown | Self::Created => Some(Duration::from_secs(10)),
			Self::Loading | Self::Loaded => Some(Duration::from_secs(20)),
			Self::Analyzing => Some(Duration::from_secs(30)),
			Self::Error | Self::Failed | Self::Success => None,
		}
	}

	/// The wire representation of this status.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Unknown => "UNKNOWN",
			Self::Created => "CREATED",
			Self::Loading => "LOADING",
			Self::Loaded => "LOADED",
			Self::Analyzing => "ANALYZING",
			Self::Error => "ERROR",
			Self::Failed => "FAILED",
			Self::Success => "SUCCESS",
		}
	}
}

impl fmt::Display for BuildStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for BuildStatus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|status| status.as_str() == s)
			.ok_or_else(|| s.to_string())
	}
}
