// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map v3 parsing and generated-to-original position lookup.

use serde::Deserialize;

use crate::error::{Result, SourceMapError};
use crate::vlq::MappingTable;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceMap {
	version: u32,
	#[serde(default)]
	file: Option<String>,
	#[serde(default)]
	source_root: Option<String>,
	#[serde(default)]
	sources: Vec<Option<String>>,
	#[serde(default)]
	sources_content: Vec<Option<String>>,
	#[serde(default)]
	names: Vec<String>,
	#[serde(default)]
	mappings: String,
}

/// A parsed source map. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct SourceMap {
	file: Option<String>,
	sources: Vec<String>,
	sources_content: Vec<Option<String>>,
	names: Vec<String>,
	mappings: MappingTable,
}

/// Result of looking up a generated position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
	/// Original source path, with `sourceRoot` applied.
	pub source: String,
	/// Line in the original source (1-indexed).
	pub line: u32,
	/// Column in the original source (0-indexed).
	pub column: u32,
	/// Original identifier at this position, if recorded.
	pub name: Option<String>,
}

impl SourceMap {
	pub fn from_slice(data: &[u8]) -> Result<Self> {
		let raw: RawSourceMap = serde_json::from_slice(data)?;
		Self::from_raw(raw)
	}

	pub fn from_json(data: &str) -> Result<Self> {
		Self::from_slice(data.as_bytes())
	}

	fn from_raw(raw: RawSourceMap) -> Result<Self> {
		if raw.version != 3 {
			return Err(SourceMapError::InvalidVersion(raw.version));
		}

		let root = raw
			.source_root
			.as_deref()
			.map(|root| root.trim_end_matches('/'))
			.filter(|root| !root.is_empty());
		let sources = raw
			.sources
			.into_iter()
			.map(|source| {
				let source = source.unwrap_or_default();
				match root {
					Some(root) => format!("{root}/{source}"),
					None => source,
				}
			})
			.collect();

		let mappings = MappingTable::parse(&raw.mappings)?;
		tracing::debug!(
			lines = mappings.line_count(),
			segments = mappings.segment_count(),
			"decoded source map mappings"
		);

		Ok(Self {
			file: raw.file,
			sources,
			sources_content: raw.sources_content,
			names: raw.names,
			mappings,
		})
	}

	/// Generated file name recorded in the map.
	pub fn file(&self) -> Option<&str> {
		self.file.as_deref()
	}

	pub fn sources(&self) -> &[String] {
		&self.sources
	}

	/// Look up a generated position. `line` is 1-indexed, `column` 0-indexed.
	///
	/// Returns `None` when the position is outside the map's coverage or the
	/// covering segment names a source that does not exist.
	pub fn lookup(&self, line: u32, column: u32) -> Option<OriginalPosition> {
		let segment = self.mappings.lookup(line.checked_sub(1)?, column)?;
		let source = self.sources.get(segment.source as usize)?;
		Some(OriginalPosition {
			source: source.clone(),
			line: segment.original_line + 1,
			column: segment.original_column,
			name: segment
				.name
				.and_then(|index| self.names.get(index as usize))
				.cloned(),
		})
	}

	/// Embedded content of an original source, by its (root-resolved) path.
	pub fn source_content(&self, source: &str) -> Option<&str> {
		let index = self.sources.iter().position(|s| s == source)?;
		self.sources_content.get(index)?.as_deref()
	}
}
