// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for report rendering.

use thiserror::Error;

/// Conditions that abort rendering. Unresolvable positions are never errors;
/// they degrade the output instead.
#[derive(Debug, Error)]
pub enum RenderError {
	#[error("failed to write report: {0}")]
	Io(#[from] std::io::Error),

	#[error("call tree node {name:?} has a type this client cannot render")]
	UnsupportedNode { name: String },
}

pub type Result<T> = std::result::Result<T, RenderError>;
