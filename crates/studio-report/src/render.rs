// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Top-level rendering of a finished build report.

use std::io::Write;

use colored::{Color, Colorize};
use studio_core::{BuildReport, Diagnostic, Location, Position};
use studio_sourcemap::{PositionMapper, SourceMap};

use crate::error::Result;
use crate::frame::StackFrameResolver;
use crate::group::group_by_file;
use crate::highlight::{gutter, highlight};
use crate::tree::CallTreeRenderer;

const HEADING_WIDTH: usize = 80;
const MESSAGE_INDENT: &str = "      ";
const FRAME_INDENT: &str = "         ";

/// How the rendered build should be reported to the hosting process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// No parser or runtime errors.
	Clean,
	/// Parser or runtime errors were reported.
	Abnormal,
}

impl Outcome {
	pub fn exit_code(self) -> i32 {
		match self {
			Self::Clean => 0,
			Self::Abnormal => 1,
		}
	}
}

/// Renders a [`BuildReport`], remapping positions through an optional source
/// map.
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer<'a> {
	mapper: PositionMapper<'a>,
}

impl<'a> ReportRenderer<'a> {
	pub fn new(source_map: Option<&'a SourceMap>) -> Self {
		Self {
			mapper: PositionMapper::new(source_map),
		}
	}

	/// Write the report to `out`. Attaches the resolved origin file to every
	/// rendered diagnostic.
	pub fn render<W: Write>(&self, report: &mut BuildReport, out: &mut W) -> Result<Outcome> {
		let outcome = if report.has_errors() {
			Outcome::Abnormal
		} else {
			Outcome::Clean
		};
		tracing::debug!(
			status = %report.status,
			source_map = self.mapper.is_active(),
			?outcome,
			"rendering build report"
		);

		self.summary(report, out)?;

		if let Some(tree) = report.tree.as_deref().filter(|tree| !tree.is_empty()) {
			writeln!(out, "\n {}\n", heading("Call Tree"))?;
			CallTreeRenderer::new(self.mapper).render(out, tree)?;
		}

		if let Some(errors) = report.errors.as_mut() {
			self.section(out, "Parse Errors", Color::Red, &mut errors.parser)?;
			self.section(out, "Errors", Color::Red, &mut errors.runtime)?;
		}
		if let Some(exceptions) = report.exceptions.as_mut() {
			self.section(out, "Exceptions", Color::Magenta, &mut exceptions.thrown)?;
		}

		Ok(outcome)
	}

	fn summary<W: Write>(&self, report: &BuildReport, out: &mut W) -> Result<()> {
		if let Some(duration_ms) = report.duration_ms {
			writeln!(out, " ⏱   Analyzed in {}", format_duration(duration_ms))?;
		}
		if let (Some(percent), Some(evaluated), Some(total)) = (
			report.coverage_percent(),
			report.evaluated_nodes,
			report.total_nodes,
		) {
			writeln!(
				out,
				" 📊  Evaluated {evaluated} of {total} nodes ({})",
				format!("{percent}%").bold()
			)?;
		}
		if let Some(api_functions) = report.api_functions {
			writeln!(out, " 🔌  {api_functions} API functions")?;
		}
		Ok(())
	}

	fn section<W: Write>(
		&self,
		out: &mut W,
		title: &str,
		color: Color,
		diagnostics: &mut [Diagnostic],
	) -> Result<()> {
		if diagnostics.is_empty() {
			return Ok(());
		}
		writeln!(out, "\n {}\n", heading(title).color(color))?;

		let resolver = StackFrameResolver::new(self.mapper);
		for group in group_by_file(diagnostics, &resolver) {
			writeln!(out, "\n 📄  {}\n", group.file)?;
			for diagnostic in group.diagnostics {
				self.diagnostic(out, diagnostic, &resolver, color)?;
			}
		}
		writeln!(out)?;
		Ok(())
	}

	fn diagnostic<W: Write>(
		&self,
		out: &mut W,
		diagnostic: &Diagnostic,
		resolver: &StackFrameResolver<'_>,
		color: Color,
	) -> Result<()> {
		writeln!(
			out,
			"{MESSAGE_INDENT}{}",
			format!("{}: {}", diagnostic.name, diagnostic.message).color(color)
		)?;
		let (line, code) = self.snippet(diagnostic);
		writeln!(out, "{MESSAGE_INDENT}{} {code}\n", gutter(line))?;

		let Some(occurrence) = diagnostic.first_occurrence() else {
			return Ok(());
		};
		for frame in resolver.resolve_all(&occurrence.stack) {
			writeln!(out, "{FRAME_INDENT}{}", frame.styled())?;
		}
		if let Some(values) = &occurrence.values {
			for (name, value) in values {
				writeln!(out, "{FRAME_INDENT}{} = {}", name.dimmed(), value)?;
			}
		}
		Ok(())
	}

	/// Line number and highlighted code for a diagnostic, taken from the
	/// original file when the source map embeds it, otherwise from the raw
	/// generated line the server sent.
	fn snippet(&self, diagnostic: &Diagnostic) -> (u32, String) {
		if let Some(snippet) = self.original_snippet(&diagnostic.loc) {
			return snippet;
		}
		(
			diagnostic.loc.start.line,
			highlight(&diagnostic.source, &diagnostic.loc),
		)
	}

	fn original_snippet(&self, loc: &Location) -> Option<(u32, String)> {
		if !self.mapper.is_active() {
			return None;
		}
		let start = self.mapper.resolve(loc.start);
		let file = start.file?;
		let content = self.mapper.source_for(&file)?;
		let line = content.lines().nth(start.line.checked_sub(1)? as usize)?;

		let end = loc.end.and_then(|end| {
			let end = self.mapper.resolve(end);
			(end.file.as_deref() == Some(file.as_str())).then(|| Position::new(end.line, end.column))
		});
		let original = Location::new(Position::new(start.line, start.column), end);
		Some((start.line, highlight(line, &original)))
	}
}

fn heading(title: &str) -> colored::ColoredString {
	format!("{title:<HEADING_WIDTH$}").bold().underline()
}

fn format_duration(ms: u64) -> String {
	if ms < 1000 {
		format!("{ms}ms")
	} else {
		format!("{:.1}s", ms as f64 / 1000.0)
	}
}
