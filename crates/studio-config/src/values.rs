// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The `key=value` config file format.

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

/// Raw values read from a config file.
pub type ConfigValues = BTreeMap<String, String>;

/// Parse config file contents. Blank lines and `#` comments are skipped;
/// later keys override earlier ones.
pub fn parse_values(text: &str) -> Result<ConfigValues> {
	let mut values = ConfigValues::new();

	for line in text.lines().map(str::trim) {
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		let (key, value) = line
			.split_once('=')
			.filter(|(key, value)| !key.is_empty() && !value.is_empty())
			.ok_or_else(|| ConfigError::InvalidLine(line.to_string()))?;
		values.insert(key.to_string(), value.to_string());
	}

	Ok(values)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn parses_pairs_skipping_blanks_and_comments() {
		let values = parse_values("# studio\n\napi=http://localhost:1337\n  token=123-456  \n").unwrap();
		assert_eq!(values.len(), 2);
		assert_eq!(values["api"], "http://localhost:1337");
		assert_eq!(values["token"], "123-456");
	}

	#[test]
	fn value_may_contain_equals() {
		let values = parse_values("token=abc==").unwrap();
		assert_eq!(values["token"], "abc==");
	}

	#[test]
	fn rejects_line_without_value() {
		let err = parse_values("token=123\nbroken\n").unwrap_err();
		assert_eq!(err.to_string(), "Invalid line in config: \"broken\"");

		let err = parse_values("token=").unwrap_err();
		assert!(matches!(err, ConfigError::InvalidLine(line) if line == "token="));

		assert!(parse_values("=value").is_err());
	}

	#[test]
	fn handles_crlf() {
		let values = parse_values("token=1\r\naccount=me\r\n").unwrap();
		assert_eq!(values["token"], "1");
		assert_eq!(values["account"], "me");
	}

	proptest! {
		#[test]
		fn well_formed_pairs_round_trip(
			pairs in prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9:/._-]{1,20}", 0..8)
		) {
			let text: String = pairs.iter().map(|(k, v)| format!("{k}={v}\n")).collect();
			prop_assert_eq!(parse_values(&text).unwrap(), pairs);
		}
	}
}
