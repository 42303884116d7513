// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Detection and removal of `sourceMappingURL` comments in bundled output.
//!
//! Two forms are recognised, both as `//#` line comments or `/*# */` block
//! comments (the legacy `@` marker is accepted too):
//! - an inline `data:application/json` URL, base64 or plain JSON
//! - a relative path to a `.map` file next to the bundle

use std::path::Path;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

use crate::error::{Result, SourceMapError};
use crate::sourcemap::SourceMap;

fn inline_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(
			r"(?m)^[ \t]*/[/*][@#][ \t]+sourceMappingURL=data:(?:application|text)/json((?:;[^;,]+)*?),([^\s*]*)[ \t]*(?:\*/)?[ \t]*\r?$",
		)
		.expect("inline source map pattern is valid")
	})
}

fn file_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"(?m)^[ \t]*/[/*][@#][ \t]+sourceMappingURL=([^\s'\x22*]+?\.map)[ \t]*(?:\*/)?[ \t]*\r?$")
			.expect("map file pattern is valid")
	})
}

fn any_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r"(?m)^[ \t]*/[/*][@#][ \t]+sourceMappingURL=[^\r\n]*(?:\r?\n)?")
			.expect("mapping comment pattern is valid")
	})
}

/// Bundled source text with its mapping comments removed, plus the source map
/// those comments referenced.
#[derive(Debug, Clone)]
pub struct ExtractedSource {
	pub source: String,
	pub map: Option<SourceMap>,
}

/// Decode the last inline source map comment in `source`, if any.
pub fn from_inline_comment(source: &str) -> Result<Option<SourceMap>> {
	let Some(captures) = inline_pattern().captures_iter(source).last() else {
		return Ok(None);
	};
	let parameters = captures.get(1).map_or("", |m| m.as_str());
	let payload = captures.get(2).map_or("", |m| m.as_str());

	let is_base64 = parameters.split(';').any(|parameter| parameter == "base64");
	let json = if is_base64 {
		STANDARD.decode(payload)?
	} else if payload.starts_with('{') {
		payload.as_bytes().to_vec()
	} else {
		return Err(SourceMapError::UnsupportedEncoding(parameters.trim_start_matches(';').to_string()));
	};

	tracing::debug!(bytes = json.len(), base64 = is_base64, "found inline source map");
	SourceMap::from_slice(&json).map(Some)
}

/// Load the map file named by the last `sourceMappingURL=<file>.map` comment,
/// resolved against `dir`.
pub fn from_map_file_comment(source: &str, dir: &Path) -> Result<Option<SourceMap>> {
	let Some(captures) = file_pattern().captures_iter(source).last() else {
		return Ok(None);
	};
	let Some(name) = captures.get(1) else {
		return Ok(None);
	};
	let path = dir.join(name.as_str());
	tracing::debug!(path = %path.display(), "reading source map file");

	let data = std::fs::read(&path).map_err(|source| SourceMapError::ReadMapFile {
		path: path.clone(),
		source,
	})?;
	SourceMap::from_slice(&data).map(Some)
}

/// Remove every `sourceMappingURL` comment line.
pub fn strip_comments(source: &str) -> String {
	any_pattern().replace_all(source, "").into_owned()
}

/// Find the source map of a bundle, preferring an inline map over a map file,
/// and strip the mapping comments when one is found.
pub fn extract(source: &str, dir: &Path) -> Result<ExtractedSource> {
	let map = match from_inline_comment(source)? {
		Some(map) => Some(map),
		None => from_map_file_comment(source, dir)?,
	};

	let source = if map.is_some() {
		strip_comments(source)
	} else {
		source.to_string()
	};

	Ok(ExtractedSource { source, map })
}
