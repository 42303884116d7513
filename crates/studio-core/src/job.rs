// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifiers handed out by upload negotiation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to an uploaded build. The server sends either a number or
/// a string; both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobRef {
	Number(u64),
	Text(String),
}

impl fmt::Display for JobRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

/// Response of the upload negotiation: where to PUT the payload and which job
/// to poll afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
	pub url: String,
	pub number: JobRef,
}
