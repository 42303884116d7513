// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::{Path, PathBuf};

use clap::Parser;

/// Upload a JavaScript bundle to JavaScript Studio and print the analysis.
///
/// Reads the bundle from stdin unless --file is given. A source map found in
/// a `sourceMappingURL` comment is used to show original file positions.
#[derive(Parser, Debug)]
#[command(name = "studio", version)]
pub struct Args {
	/// Read the bundle from this file instead of stdin
	#[arg(short, long)]
	pub file: Option<PathBuf>,

	/// Name of the global the bundle exports
	#[arg(short, long)]
	pub global: Option<String>,

	/// Also report exceptions thrown by the analyzed code
	#[arg(short, long)]
	pub exceptions: bool,

	/// Verbose logging
	#[arg(long)]
	pub debug: bool,
}

impl Args {
	/// Directory that relative source map file comments resolve against.
	pub fn working_dir(&self) -> PathBuf {
		self.file
			.as_deref()
			.and_then(Path::parent)
			.filter(|dir| !dir.as_os_str().is_empty())
			.map(Path::to_path_buf)
			.unwrap_or_else(|| PathBuf::from("."))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_short_flags() {
		let args = Args::try_parse_from(["studio", "-f", "dist/app.js", "-g", "App", "-e"]).unwrap();
		assert_eq!(args.file.as_deref(), Some(Path::new("dist/app.js")));
		assert_eq!(args.global.as_deref(), Some("App"));
		assert!(args.exceptions);
		assert!(!args.debug);
	}

	#[test]
	fn defaults_to_stdin() {
		let args = Args::try_parse_from(["studio", "--debug"]).unwrap();
		assert!(args.file.is_none());
		assert!(args.debug);
		assert_eq!(args.working_dir(), PathBuf::from("."));
	}

	#[test]
	fn working_dir_is_the_file_directory() {
		let args = Args::try_parse_from(["studio", "--file", "dist/app.js"]).unwrap();
		assert_eq!(args.working_dir(), PathBuf::from("dist"));

		let args = Args::try_parse_from(["studio", "--file", "app.js"]).unwrap();
		assert_eq!(args.working_dir(), PathBuf::from("."));
	}
}
