// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Marking the span a diagnostic points at inside its source line.

use colored::Colorize;
use studio_core::Location;

/// Character columns `[start, end)` to mark on a line of `line_len`
/// characters.
///
/// A span ending on another line (or with no known end) runs to the end of
/// the first line. An empty or inverted span is widened to one character.
pub fn span_columns(line_len: usize, loc: &Location) -> (usize, usize) {
	let start = loc.start.column as usize;
	let end = match loc.end {
		Some(end) if end.line == loc.start.line => end.column as usize,
		_ => line_len,
	};
	if end > start {
		(start, end)
	} else {
		(start, start + 1)
	}
}

/// Split `line` into the text before, inside and after the span.
pub fn split_span<'a>(line: &'a str, loc: &Location) -> (&'a str, &'a str, &'a str) {
	let len = line.chars().count();
	let (start, end) = span_columns(len, loc);
	let start = byte_offset(line, start.min(len));
	let end = byte_offset(line, end.min(len));
	(&line[..start], &line[start..end], &line[end..])
}

fn byte_offset(line: &str, column: usize) -> usize {
	line
		.char_indices()
		.nth(column)
		.map_or(line.len(), |(offset, _)| offset)
}

/// Return `line` with the span of `loc` styled; text around it is unchanged.
pub fn highlight(line: &str, loc: &Location) -> String {
	let (before, marked, after) = split_span(line, loc);
	format!("{before}{}{after}", marked.yellow().underline())
}

/// Right-aligned line number gutter.
pub fn gutter(line: u32) -> String {
	format!(" {line:>3} ").on_black().bright_black().to_string()
}
