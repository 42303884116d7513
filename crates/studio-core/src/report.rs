// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build report returned by the status endpoint once a build is terminal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::status::BuildStatus;
use crate::tree::TreeNode;

/// A position in the analyzed text. Lines are 1-indexed, columns 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
	pub line: u32,
	pub column: u32,
}

impl Position {
	pub fn new(line: u32, column: u32) -> Self {
		Self { line, column }
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// A span in the analyzed text. `end` is absent when the extent is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
	pub start: Position,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end: Option<Position>,
}

impl Location {
	pub fn new(start: Position, end: Option<Position>) -> Self {
		Self { start, end }
	}

	/// Whether the span starts and ends on the same line.
	pub fn is_single_line(&self) -> bool {
		self.end.is_some_and(|end| end.line == self.start.line)
	}
}

/// One concrete runtime manifestation of a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
	#[serde(default, alias = "stackFrames")]
	pub stack: Vec<String>,
	#[serde(
		default,
		alias = "capturedValues",
		skip_serializing_if = "Option::is_none"
	)]
	pub values: Option<BTreeMap<String, String>>,
}

/// Who raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticStatus {
	ThrownByParser,
	ThrownByRuntime,
	ThrownByCode,
	RethrownByCode,
	ThrownByModule,
}

/// A parser error, runtime error or thrown exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub name: String,
	pub message: String,
	pub loc: Location,
	/// The raw line of generated text the diagnostic points into.
	#[serde(default)]
	pub source: String,
	pub status: DiagnosticStatus,
	#[serde(deserialize_with = "non_empty")]
	pub occurrences: Vec<Occurrence>,
	/// Resolved origin file. Attached once while rendering, never read from
	/// the wire.
	#[serde(skip)]
	pub file: Option<String>,
}

impl Diagnostic {
	pub fn first_occurrence(&self) -> Option<&Occurrence> {
		self.occurrences.first()
	}

	/// First stack frame of the first occurrence, if any.
	pub fn first_frame(&self) -> Option<&str> {
		self
			.first_occurrence()
			.and_then(|occurrence| occurrence.stack.first())
			.map(String::as_str)
	}
}

fn non_empty<'de, D>(deserializer: D) -> Result<Vec<Occurrence>, D::Error>
where
	D: Deserializer<'de>,
{
	let occurrences = Vec::<Occurrence>::deserialize(deserializer)?;
	if occurrences.is_empty() {
		return Err(serde::de::Error::invalid_length(
			0,
			&"at least one occurrence",
		));
	}
	Ok(occurrences)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSets {
	#[serde(default)]
	pub parser: Vec<Diagnostic>,
	#[serde(default)]
	pub runtime: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionSets {
	#[serde(default)]
	pub thrown: Vec<Diagnostic>,
}

/// Decoded body of a terminal status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
	pub status: BuildStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub errors: Option<ErrorSets>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exceptions: Option<ExceptionSets>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tree: Option<Vec<TreeNode>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub evaluated_nodes: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_nodes: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub duration_ms: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_functions: Option<u64>,
}

impl BuildReport {
	/// An empty report carrying only a status.
	pub fn with_status(status: BuildStatus) -> Self {
		Self {
			status,
			message: None,
			errors: None,
			exceptions: None,
			tree: None,
			evaluated_nodes: None,
			total_nodes: None,
			duration_ms: None,
			api_functions: None,
		}
	}

	/// Whether the report carries parser or runtime errors. Thrown
	/// exceptions alone do not count.
	pub fn has_errors(&self) -> bool {
		self
			.errors
			.as_ref()
			.is_some_and(|errors| !errors.parser.is_empty() || !errors.runtime.is_empty())
	}

	/// Percentage of evaluated nodes, when both counts are known and the
	/// total is non-zero.
	pub fn coverage_percent(&self) -> Option<u64> {
		match (self.evaluated_nodes, self.total_nodes) {
			(Some(evaluated), Some(total)) if total > 0 => {
				Some(((evaluated as f64 / total as f64) * 100.0).round() as u64)
			}
			_ => None,
		}
	}
}
