// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Upload payload compression.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{ClientError, Result};

/// Gzip `data` into a single buffer.
pub fn gzip(data: &[u8]) -> Result<Vec<u8>> {
	let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
	encoder.write_all(data).map_err(ClientError::Compression)?;
	let compressed = encoder.finish().map_err(ClientError::Compression)?;
	tracing::debug!(input = data.len(), output = compressed.len(), "compressed upload");
	Ok(compressed)
}

#[cfg(test)]
mod tests {
	use super::*;
	use flate2::read::GzDecoder;
	use std::io::Read;

	#[test]
	fn output_is_a_gzip_stream_of_the_input() {
		let source = "console.log('hello');\n".repeat(50);
		let compressed = gzip(source.as_bytes()).unwrap();

		assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
		assert!(compressed.len() < source.len());

		let mut decoded = String::new();
		GzDecoder::new(compressed.as_slice()).read_to_string(&mut decoded).unwrap();
		assert_eq!(decoded, source);
	}
}
