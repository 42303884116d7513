// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod args;
mod progress;
mod run;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use args::Args;
use progress::Progress;

#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();
	init_logging(args.debug);

	let progress = Progress::new(!args.debug);
	match run::run(&args, &progress).await {
		Ok(outcome) => {
			tracing::debug!(?outcome, "done");
			if outcome.exit_code() == 0 {
				ExitCode::SUCCESS
			} else {
				ExitCode::FAILURE
			}
		}
		Err(err) => {
			progress.finish();
			error!("{err:#}");
			ExitCode::FAILURE
		}
	}
}

/// Logs go to stderr. `RUST_LOG` wins over `--debug`.
fn init_logging(debug: bool) {
	let default = if debug { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_target(debug)
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
		.init();
}
