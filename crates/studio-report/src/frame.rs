// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parsing and remapping of textual stack frames.

use std::fmt;
use std::sync::OnceLock;

use colored::Colorize;
use regex::Regex;
use studio_core::Position;
use studio_sourcemap::PositionMapper;

/// Path fragments of bundler runtime code that never belongs to the user.
const BUNDLER_INTERNALS: &[&str] = &[
	"browser-pack/_prelude.js",
	"browserify/node_modules/",
	"webpack/bootstrap",
	"webpack/runtime/",
	"(webpack)/",
];

fn named_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"^\s*(?:at\s+)?(?P<name>\S.*?)\s+\((?P<path>.*):(?P<line>\d+):(?P<column>\d+)\)\s*$")
			.expect("named frame pattern is valid")
	})
}

fn bare_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"^\s*(?:at\s+)?(?P<path>[^\s()]*):(?P<line>\d+):(?P<column>\d+)\s*$")
			.expect("bare frame pattern is valid")
	})
}

/// A frame recognised in one of the two supported shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFrame<'a> {
	pub name: Option<&'a str>,
	pub path: &'a str,
	pub line: u32,
	pub column: u32,
}

/// Parse `name (path:line:column)` or a bare `path:line:column`, both with an
/// optional leading `at`.
pub fn parse_frame(text: &str) -> Option<ParsedFrame<'_>> {
	let (captures, name) = if let Some(captures) = named_pattern().captures(text) {
		let name = captures.name("name").map(|m| m.as_str());
		(captures, name)
	} else {
		(bare_pattern().captures(text)?, None)
	};

	Some(ParsedFrame {
		name,
		path: captures.name("path")?.as_str(),
		line: captures.name("line")?.as_str().parse().ok()?,
		column: captures.name("column")?.as_str().parse().ok()?,
	})
}

/// A frame ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedFrame {
	/// A frame with a resolved origin.
	Located {
		name: Option<String>,
		file: String,
		line: u32,
		column: u32,
	},
	/// An `at ...` frame of an unknown shape; holds the text after `at `.
	Marked(String),
	/// Any other text, shown as is.
	Plain(String),
}

impl RenderedFrame {
	/// Origin file of a located frame.
	pub fn file(&self) -> Option<&str> {
		match self {
			Self::Located { file, .. } => Some(file),
			Self::Marked(_) | Self::Plain(_) => None,
		}
	}

	/// Terminal representation with the `at` marker and location dimmed.
	pub fn styled(&self) -> String {
		match self {
			Self::Located {
				name: Some(name),
				file,
				line,
				column,
			} => format!(
				"{} {} {}",
				"at".dimmed(),
				name,
				format!("({file}:{line}:{column})").cyan()
			),
			Self::Located {
				name: None,
				file,
				line,
				column,
			} => format!("{} {}", "at".dimmed(), format!("{file}:{line}:{column}").cyan()),
			Self::Marked(rest) => format!("{} {rest}", "at".dimmed()),
			Self::Plain(text) => text.clone(),
		}
	}
}

impl fmt::Display for RenderedFrame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Located {
				name: Some(name),
				file,
				line,
				column,
			} => write!(f, "at {name} ({file}:{line}:{column})"),
			Self::Located {
				name: None,
				file,
				line,
				column,
			} => write!(f, "at {file}:{line}:{column}"),
			Self::Marked(rest) => write!(f, "at {rest}"),
			Self::Plain(text) => f.write_str(text),
		}
	}
}

/// Whether a mapped path belongs to bundler runtime support code.
pub fn is_bundler_internal(path: &str) -> bool {
	BUNDLER_INTERNALS.iter().any(|fragment| path.contains(fragment))
}

/// Resolves stack frames through a [`PositionMapper`].
#[derive(Debug, Clone, Copy)]
pub struct StackFrameResolver<'a> {
	mapper: PositionMapper<'a>,
}

impl<'a> StackFrameResolver<'a> {
	pub fn new(mapper: PositionMapper<'a>) -> Self {
		Self { mapper }
	}

	pub fn mapper(&self) -> PositionMapper<'a> {
		self.mapper
	}

	/// Resolve one frame. `None` means the frame is dropped from the output.
	pub fn resolve(&self, text: &str) -> Option<RenderedFrame> {
		let Some(frame) = parse_frame(text) else {
			return self.unrecognized(text);
		};

		let mapped = self.mapper.resolve(Position::new(frame.line, frame.column));
		let Some(file) = mapped.file else {
			tracing::trace!(frame = text, "dropping frame without mapped source");
			return None;
		};
		if self.mapper.is_active() && is_bundler_internal(&file) {
			tracing::trace!(frame = text, file = %file, "dropping bundler frame");
			return None;
		}

		Some(RenderedFrame::Located {
			name: frame.name.map(str::to_string),
			file,
			line: mapped.line,
			column: mapped.column,
		})
	}

	fn unrecognized(&self, text: &str) -> Option<RenderedFrame> {
		let trimmed = text.trim_start();
		if let Some(rest) = trimmed.strip_prefix("at ") {
			return Some(RenderedFrame::Marked(rest.to_string()));
		}
		if self.mapper.is_active() {
			return None;
		}
		Some(RenderedFrame::Plain(trimmed.to_string()))
	}

	/// Resolve every frame, keeping only those that survive.
	pub fn resolve_all<'s, I>(&self, frames: I) -> Vec<RenderedFrame>
	where
		I: IntoIterator<Item = &'s String>,
	{
		frames
			.into_iter()
			.filter_map(|frame| self.resolve(frame))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use studio_sourcemap::{SourceMap, STDIN_SOURCE};

	/// Generated line 42 column 7 maps to orig.js line 10 column 3; generated
	/// line 1 maps into the browserify prelude.
	fn source_map() -> SourceMap {
		let mut mappings = String::from("ACAA");
		mappings.push_str(&";".repeat(41));
		mappings.push_str("ODSG");
		SourceMap::from_json(&format!(
			r#"{{
				"version": 3,
				"sources": ["orig.js", "node_modules/browser-pack/_prelude.js"],
				"names": [],
				"mappings": "{mappings}"
			}}"#
		))
		.unwrap()
	}

	#[test]
	fn parses_named_frame() {
		let frame = parse_frame("at Foo.bar (bundle.js:12:34)").unwrap();
		assert_eq!(
			frame,
			ParsedFrame {
				name: Some("Foo.bar"),
				path: "bundle.js",
				line: 12,
				column: 34,
			}
		);
	}

	#[test]
	fn parses_named_frame_with_spaces_in_name() {
		let frame = parse_frame("    at new Widget (/tmp/a b/bundle.js:1:2)").unwrap();
		assert_eq!(frame.name, Some("new Widget"));
		assert_eq!(frame.path, "/tmp/a b/bundle.js");
	}

	#[test]
	fn parses_bare_frame() {
		let frame = parse_frame("at bundle.js:42:7").unwrap();
		assert_eq!(frame.name, None);
		assert_eq!((frame.line, frame.column), (42, 7));

		let frame = parse_frame(":42:7").unwrap();
		assert_eq!(frame.path, "");
	}

	#[test]
	fn rejects_other_shapes() {
		assert!(parse_frame("at <anonymous>").is_none());
		assert!(parse_frame("something went wrong").is_none());
	}

	#[test]
	fn remaps_bare_frame_through_source_map() {
		let map = source_map();
		let resolver = StackFrameResolver::new(PositionMapper::new(Some(&map)));

		let frame = resolver.resolve("at :42:7").unwrap();
		assert_eq!(frame.file(), Some("orig.js"));
		assert_eq!(frame.to_string(), "at orig.js:10:3");
	}

	#[test]
	fn keeps_frame_name_when_remapping() {
		let map = source_map();
		let resolver = StackFrameResolver::new(PositionMapper::new(Some(&map)));

		let frame = resolver.resolve("at run (bundle.js:42:9)").unwrap();
		assert_eq!(frame.to_string(), "at run (orig.js:10:3)");
	}

	#[test]
	fn drops_bundler_frames_and_misses() {
		let map = source_map();
		let resolver = StackFrameResolver::new(PositionMapper::new(Some(&map)));

		assert!(resolver.resolve("at bundle.js:1:0").is_none());
		assert!(resolver.resolve("at bundle.js:7:0").is_none());
		assert!(resolver.resolve("some noise").is_none());
	}

	#[test]
	fn passes_through_unknown_at_frames() {
		let map = source_map();
		let resolver = StackFrameResolver::new(PositionMapper::new(Some(&map)));

		assert_eq!(
			resolver.resolve("  at <anonymous>"),
			Some(RenderedFrame::Marked("<anonymous>".to_string()))
		);
	}

	#[test]
	fn labels_frames_against_stdin_without_map() {
		let resolver = StackFrameResolver::new(PositionMapper::new(None));

		let frame = resolver.resolve("at foo (bundle.js:3:4)").unwrap();
		assert_eq!(frame.to_string(), format!("at foo ({STDIN_SOURCE}:3:4)"));

		let frame = resolver.resolve("at node_modules/browser-pack/_prelude.js:1:0").unwrap();
		assert_eq!(frame.file(), Some(STDIN_SOURCE));

		assert_eq!(
			resolver.resolve("some noise"),
			Some(RenderedFrame::Plain("some noise".to_string()))
		);
	}

	#[test]
	fn resolve_all_filters_dropped_frames() {
		let map = source_map();
		let resolver = StackFrameResolver::new(PositionMapper::new(Some(&map)));
		let frames = vec![
			"at bundle.js:1:0".to_string(),
			"at f (bundle.js:42:7)".to_string(),
		];
		let rendered = resolver.resolve_all(&frames);
		assert_eq!(rendered.len(), 1);
		assert_eq!(rendered[0].file(), Some("orig.js"));
	}
}
