// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Generated-to-original position mapping with a stdin fallback.

use studio_core::Position;

use crate::sourcemap::SourceMap;

/// Label for the analyzed input when no source map is available.
pub const STDIN_SOURCE: &str = "<stdin>";

/// A generated position translated back to its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedPosition {
	/// Origin file. `None` means the origin is unknown: a source map is
	/// active but does not cover the position.
	pub file: Option<String>,
	pub line: u32,
	pub column: u32,
}

/// Maps generated positions through an optional source map.
///
/// Without a map the analyzed input is treated as the single logical file
/// [`STDIN_SOURCE`] and positions pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionMapper<'a> {
	map: Option<&'a SourceMap>,
}

impl<'a> PositionMapper<'a> {
	pub fn new(map: Option<&'a SourceMap>) -> Self {
		Self { map }
	}

	/// Whether positions are being remapped through a source map.
	pub fn is_active(&self) -> bool {
		self.map.is_some()
	}

	pub fn resolve(&self, generated: Position) -> MappedPosition {
		let Some(map) = self.map else {
			return MappedPosition {
				file: Some(STDIN_SOURCE.to_string()),
				line: generated.line,
				column: generated.column,
			};
		};

		match map.lookup(generated.line, generated.column) {
			Some(original) => MappedPosition {
				file: Some(original.source),
				line: original.line,
				column: original.column,
			},
			None => {
				tracing::debug!(line = generated.line, column = generated.column, "position not covered by source map");
				MappedPosition {
					file: None,
					line: generated.line,
					column: generated.column,
				}
			}
		}
	}

	/// Original content of `file` when the source map embeds it.
	pub fn source_for(&self, file: &str) -> Option<&'a str> {
		self.map.and_then(|map| map.source_content(file))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn map() -> SourceMap {
		SourceMap::from_json(
			r#"{
				"version": 3,
				"sources": ["orig.js"],
				"sourcesContent": ["let a = 1;\n"],
				"names": [],
				"mappings": "AAAA;;AAEE"
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn passes_through_without_map() {
		let mapper = PositionMapper::new(None);
		assert!(!mapper.is_active());
		assert_eq!(
			mapper.resolve(Position::new(42, 7)),
			MappedPosition {
				file: Some(STDIN_SOURCE.to_string()),
				line: 42,
				column: 7,
			}
		);
		assert_eq!(mapper.source_for(STDIN_SOURCE), None);
	}

	#[test]
	fn resolves_through_map() {
		let map = map();
		let mapper = PositionMapper::new(Some(&map));
		let mapped = mapper.resolve(Position::new(3, 4));
		assert_eq!(mapped.file.as_deref(), Some("orig.js"));
		assert_eq!(mapped.line, 3);
		assert_eq!(mapped.column, 2);
		assert_eq!(mapper.source_for("orig.js"), Some("let a = 1;\n"));
	}

	#[test]
	fn uncovered_position_has_no_file() {
		let map = map();
		let mapper = PositionMapper::new(Some(&map));
		assert_eq!(mapper.resolve(Position::new(2, 0)).file, None);
	}
}
