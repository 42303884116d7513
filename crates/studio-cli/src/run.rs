// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The upload, poll and render pipeline.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use studio_client::{gzip, BuildStatusPoller, ClientConfig, StudioClient};
use studio_config::{ConfigError, StudioConfig};
use studio_core::{BuildReport, BuildStatus};
use studio_report::{Outcome, ReportRenderer};
use studio_sourcemap::{extract, ExtractedSource};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::args::Args;
use crate::progress::Progress;

pub async fn run(args: &Args, progress: &Progress) -> Result<Outcome> {
	progress.set_message("Reading input");
	let input = read_input(args.file.as_deref()).await?;
	let bundle = prepare_source(input, &args.working_dir())?;
	let payload = gzip(bundle.source.as_bytes()).context("gzip failure")?;

	let config = load_config()?;
	let client = StudioClient::new(
		&config.api,
		config.token.clone(),
		ClientConfig {
			exceptions: args.exceptions,
			..ClientConfig::default()
		},
	)?;

	progress.set_message("Requesting upload");
	let target = client
		.request_upload(args.global.as_deref())
		.await
		.context("Failed to get upload URL")?;

	progress.set_message("Uploading");
	client
		.upload(&target.url, payload)
		.await
		.context("Failed to upload file")?;

	progress.set_message("Waiting for report");
	let poller = BuildStatusPoller::new(client);
	let mut report = poller
		.poll(&target.number, |change| progress.println(&change.line()))
		.await
		.context("Failed to load report")?;
	progress.finish();
	check_terminal(&mut report)?;

	let renderer = ReportRenderer::new(bundle.map.as_ref());
	let stdout = std::io::stdout();
	let outcome = renderer
		.render(&mut report, &mut stdout.lock())
		.context("Failed to render report")?;
	Ok(outcome)
}

async fn read_input(file: Option<&Path>) -> Result<String> {
	let input = match file {
		Some(path) => tokio::fs::read_to_string(path)
			.await
			.with_context(|| format!("Failed to read file {}", path.display()))?,
		None => {
			let mut input = String::new();
			tokio::io::stdin()
				.read_to_string(&mut input)
				.await
				.context("Failed to read source")?;
			input
		}
	};
	debug!(bytes = input.len(), "read input");
	Ok(input)
}

/// Find the bundle's source map and strip its mapping comments. An
/// unreadable map is reported and the bundle is analyzed without it.
fn prepare_source(input: String, working_dir: &Path) -> Result<ExtractedSource> {
	if input.is_empty() {
		bail!("No sources received on stdin");
	}
	match extract(&input, working_dir) {
		Ok(extracted) => {
			debug!(source_map = extracted.map.is_some(), "prepared source");
			Ok(extracted)
		}
		Err(err) => {
			warn!(error = %err, "ignoring unusable source map");
			Ok(ExtractedSource {
				source: input,
				map: None,
			})
		}
	}
}

/// An `ERROR` build has no report to render; fail with the server's message.
fn check_terminal(report: &mut BuildReport) -> Result<()> {
	if report.status != BuildStatus::Error {
		return Ok(());
	}
	let message = report.message.take().unwrap_or_else(|| "Build error".to_string());
	Err(anyhow!(message).context("Build failed"))
}

fn load_config() -> Result<StudioConfig> {
	StudioConfig::load().map_err(|err| match err {
		ConfigError::MissingToken => anyhow!(err),
		other => anyhow!(other).context("Failed to read config"),
	})
}
