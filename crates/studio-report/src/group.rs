// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stable grouping of diagnostics by origin file.

use std::collections::HashMap;

use studio_core::Diagnostic;

use crate::frame::StackFrameResolver;

/// Label for diagnostics whose origin cannot be resolved.
pub const UNKNOWN_ORIGIN: &str = "<unknown>";

/// Diagnostics sharing one origin file, in their original relative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup<'d> {
	pub file: String,
	pub diagnostics: Vec<&'d Diagnostic>,
}

/// Origin file of a diagnostic: the file of its first stack frame when that
/// frame resolves, otherwise the mapped file of its location.
pub fn origin_file(diagnostic: &Diagnostic, resolver: &StackFrameResolver<'_>) -> String {
	diagnostic
		.first_frame()
		.and_then(|frame| resolver.resolve(frame))
		.and_then(|frame| frame.file().map(str::to_string))
		.or_else(|| resolver.mapper().resolve(diagnostic.loc.start).file)
		.unwrap_or_else(|| UNKNOWN_ORIGIN.to_string())
}

/// Attach the origin file to every diagnostic (once) and group them.
///
/// Buckets appear in first-seen order; this is not a sort.
pub fn group_by_file<'d>(
	diagnostics: &'d mut [Diagnostic],
	resolver: &StackFrameResolver<'_>,
) -> Vec<FileGroup<'d>> {
	group_stable(diagnostics.iter_mut().map(|diagnostic| {
		let file = match &diagnostic.file {
			Some(file) => file.clone(),
			None => {
				let file = origin_file(diagnostic, resolver);
				diagnostic.file = Some(file.clone());
				file
			}
		};
		let diagnostic: &'d Diagnostic = diagnostic;
		(file, diagnostic)
	}))
}

fn group_stable<'d, I>(entries: I) -> Vec<FileGroup<'d>>
where
	I: IntoIterator<Item = (String, &'d Diagnostic)>,
{
	let mut groups: Vec<FileGroup<'d>> = Vec::new();
	let mut index: HashMap<String, usize> = HashMap::new();

	for (file, diagnostic) in entries {
		match index.get(&file) {
			Some(&position) => groups[position].diagnostics.push(diagnostic),
			None => {
				index.insert(file.clone(), groups.len());
				groups.push(FileGroup {
					file,
					diagnostics: vec![diagnostic],
				});
			}
		}
	}

	groups
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use studio_core::{DiagnosticStatus, Location, Occurrence, Position};
	use studio_sourcemap::{PositionMapper, SourceMap, STDIN_SOURCE};

	fn diagnostic(message: &str, frame: &str) -> Diagnostic {
		Diagnostic {
			name: "Error".to_string(),
			message: message.to_string(),
			loc: Location::new(Position::new(1, 0), None),
			source: String::new(),
			status: DiagnosticStatus::ThrownByRuntime,
			occurrences: vec![Occurrence {
				stack: vec![frame.to_string()],
				values: None,
			}],
			file: None,
		}
	}

	fn preset(message: &str, file: &str) -> Diagnostic {
		let mut diagnostic = diagnostic(message, "at bundle.js:1:0");
		diagnostic.file = Some(file.to_string());
		diagnostic
	}

	/// Generated lines 1, 2 and 3 map to a.js, b.js and c.js.
	fn source_map() -> SourceMap {
		SourceMap::from_json(
			r#"{ "version": 3, "sources": ["a.js", "b.js", "c.js"], "names": [], "mappings": "AAAA;ACAA;ACAA" }"#,
		)
		.unwrap()
	}

	#[test]
	fn groups_in_first_seen_order() {
		let mut diagnostics = vec![preset("1", "b"), preset("2", "a"), preset("3", "b")];
		let resolver = StackFrameResolver::new(PositionMapper::new(None));

		let groups = group_by_file(&mut diagnostics, &resolver);

		let files: Vec<&str> = groups.iter().map(|g| g.file.as_str()).collect();
		assert_eq!(files, ["b", "a"]);
		let messages: Vec<&str> = groups[0].diagnostics.iter().map(|d| d.message.as_str()).collect();
		assert_eq!(messages, ["1", "3"]);
	}

	#[test]
	fn resolves_file_from_first_frame() {
		let map = source_map();
		let resolver = StackFrameResolver::new(PositionMapper::new(Some(&map)));
		let mut diagnostics = vec![
			diagnostic("x", "at f (bundle.js:3:0)"),
			diagnostic("y", "at g (bundle.js:1:0)"),
			diagnostic("z", "at h (bundle.js:3:5)"),
		];

		let groups = group_by_file(&mut diagnostics, &resolver);

		assert_eq!(groups.len(), 2);
		assert_eq!(groups[0].file, "c.js");
		assert_eq!(groups[0].diagnostics.len(), 2);
		assert_eq!(groups[1].file, "a.js");
		assert_eq!(diagnostics[1].file.as_deref(), Some("a.js"));
	}

	#[test]
	fn falls_back_to_location_then_unknown() {
		let map = source_map();
		let resolver = StackFrameResolver::new(PositionMapper::new(Some(&map)));

		let mut from_loc = diagnostic("x", "noise");
		from_loc.loc = Location::new(Position::new(2, 0), None);
		assert_eq!(origin_file(&from_loc, &resolver), "b.js");

		let mut unknown = diagnostic("y", "noise");
		unknown.loc = Location::new(Position::new(9, 0), None);
		assert_eq!(origin_file(&unknown, &resolver), UNKNOWN_ORIGIN);
	}

	#[test]
	fn uses_stdin_without_map() {
		let resolver = StackFrameResolver::new(PositionMapper::new(None));
		assert_eq!(origin_file(&diagnostic("x", "noise"), &resolver), STDIN_SOURCE);
	}

	#[test]
	fn file_is_computed_only_once() {
		let map = source_map();
		let resolver = StackFrameResolver::new(PositionMapper::new(Some(&map)));
		let mut diagnostics = vec![preset("kept", "already.js")];

		let groups = group_by_file(&mut diagnostics, &resolver);
		assert_eq!(groups[0].file, "already.js");
	}

	proptest! {
		#[test]
		fn grouping_is_stable(files in prop::collection::vec("[a-d]", 0..30)) {
			let mut diagnostics: Vec<Diagnostic> = files
				.iter()
				.enumerate()
				.map(|(i, file)| preset(&i.to_string(), file))
				.collect();
			let resolver = StackFrameResolver::new(PositionMapper::new(None));

			let groups = group_by_file(&mut diagnostics, &resolver);

			let mut first_seen: Vec<&String> = Vec::new();
			for file in &files {
				if !first_seen.contains(&file) {
					first_seen.push(file);
				}
			}
			let order: Vec<&String> = groups.iter().map(|g| &g.file).collect();
			prop_assert_eq!(order, first_seen);

			for group in &groups {
				let indices: Vec<usize> = group
					.diagnostics
					.iter()
					.map(|d| d.message.parse().unwrap())
					.collect();
				prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
				prop_assert!(indices.iter().all(|&i| files[i] == group.file));
			}
			let total: usize = groups.iter().map(|g| g.diagnostics.len()).sum();
			prop_assert_eq!(total, files.len());
		}
	}
}
