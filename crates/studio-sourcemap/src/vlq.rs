// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Base64 VLQ decoding of the `mappings` field.
//!
//! Generated lines are separated by `;`, segments by `,`. Every segment holds
//! 1, 4 or 5 values, all delta-encoded against the previous segment (the
//! generated column resets at every line, the other fields never reset).

use crate::error::{Result, SourceMapError};

const CONTINUATION_BIT: u8 = 0b10_0000;
const VALUE_MASK: u8 = 0b01_1111;

fn base64_digit(byte: u8) -> Option<u8> {
	match byte {
		b'A'..=b'Z' => Some(byte - b'A'),
		b'a'..=b'z' => Some(byte - b'a' + 26),
		b'0'..=b'9' => Some(byte - b'0' + 52),
		b'+' => Some(62),
		b'/' => Some(63),
		_ => None,
	}
}

/// Decode all values of one segment.
pub fn decode_segment(segment: &str) -> Result<Vec<i64>> {
	let mut values = Vec::with_capacity(5);
	let mut accumulator: i64 = 0;
	let mut shift = 0u32;
	let mut pending = false;

	for byte in segment.bytes() {
		let digit = base64_digit(byte).ok_or_else(|| SourceMapError::InvalidVlqChar {
			ch: byte as char,
			segment: segment.to_string(),
		})?;
		if shift > 60 {
			return Err(SourceMapError::TruncatedVlq(segment.to_string()));
		}
		accumulator |= i64::from(digit & VALUE_MASK) << shift;
		pending = true;

		if digit & CONTINUATION_BIT == 0 {
			// Lowest bit carries the sign.
			let magnitude = accumulator >> 1;
			values.push(if accumulator & 1 == 1 { -magnitude } else { magnitude });
			accumulator = 0;
			shift = 0;
			pending = false;
		} else {
			shift += 5;
		}
	}

	if pending {
		return Err(SourceMapError::TruncatedVlq(segment.to_string()));
	}
	Ok(values)
}

/// One decoded mapping segment that points into an original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
	/// Column in the generated line (0-indexed).
	pub generated_column: u32,
	/// Index into `sources`.
	pub source: u32,
	/// Line in the original source (0-indexed).
	pub original_line: u32,
	/// Column in the original source (0-indexed).
	pub original_column: u32,
	/// Index into `names`.
	pub name: Option<u32>,
}

/// Decoded mappings, one sorted segment list per generated line.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
	lines: Vec<Vec<Segment>>,
}

impl MappingTable {
	/// Decode a `mappings` string.
	pub fn parse(mappings: &str) -> Result<Self> {
		let mut lines = Vec::new();
		let mut source: i64 = 0;
		let mut original_line: i64 = 0;
		let mut original_column: i64 = 0;
		let mut name: i64 = 0;

		for line in mappings.split(';') {
			let mut segments = Vec::new();
			let mut generated_column: i64 = 0;

			for raw in line.split(',').filter(|raw| !raw.is_empty()) {
				let values = decode_segment(raw)?;
				match values.len() {
					1 => {
						// Unmapped generated text; only the column state moves.
						generated_column += values[0];
					}
					4 | 5 => {
						generated_column += values[0];
						source += values[1];
						original_line += values[2];
						original_column += values[3];
						let name_index = if values.len() == 5 {
							name += values[4];
							Some(to_u32(name))
						} else {
							None
						};
						if source < 0 {
							return Err(SourceMapError::InvalidSourceIndex(source));
						}
						segments.push(Segment {
							generated_column: to_u32(generated_column),
							source: to_u32(source),
							original_line: to_u32(original_line),
							original_column: to_u32(original_column),
							name: name_index,
						});
					}
					count => {
						return Err(SourceMapError::InvalidSegmentLength {
							segment: raw.to_string(),
							count,
						});
					}
				}
			}

			segments.sort_by_key(|segment| segment.generated_column);
			lines.push(segments);
		}

		Ok(Self { lines })
	}

	/// Find the segment covering a generated position: the last segment on
	/// that line whose column is at or before `column`.
	pub fn lookup(&self, line: u32, column: u32) -> Option<&Segment> {
		let segments = self.lines.get(line as usize)?;
		let after = segments.partition_point(|segment| segment.generated_column <= column);
		after.checked_sub(1).map(|index| &segments[index])
	}

	/// Number of generated lines the table covers.
	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	/// Total number of mapped segments.
	pub fn segment_count(&self) -> usize {
		self.lines.iter().map(Vec::len).sum()
	}
}

fn to_u32(value: i64) -> u32 {
	value.clamp(0, i64::from(u32::MAX)) as u32
}
