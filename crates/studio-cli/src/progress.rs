// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Spinner on stderr with persistent status lines on stdout.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub struct Progress {
	spinner: ProgressBar,
}

impl Progress {
	/// A ticking spinner, or a hidden one when debug logs own the terminal.
	pub fn new(visible: bool) -> Self {
		if !visible {
			return Self {
				spinner: ProgressBar::hidden(),
			};
		}
		let spinner = ProgressBar::new_spinner();
		spinner.set_style(
			ProgressStyle::with_template("{spinner:.cyan} {msg}")
				.unwrap_or_else(|_| ProgressStyle::default_spinner()),
		);
		spinner.enable_steady_tick(Duration::from_millis(80));
		Self { spinner }
	}

	pub fn set_message(&self, message: &'static str) {
		tracing::debug!(step = message, "progress");
		self.spinner.set_message(message);
	}

	/// Print a line that stays after the spinner moves on.
	pub fn println(&self, line: &str) {
		self.spinner.suspend(|| println!("{line}"));
	}

	pub fn finish(&self) {
		self.spinner.finish_and_clear();
	}
}

impl Drop for Progress {
	fn drop(&mut self) {
		if !self.spinner.is_finished() {
			self.spinner.finish_and_clear();
		}
	}
}
