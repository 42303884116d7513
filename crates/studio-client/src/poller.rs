// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Polling a build until it reaches a terminal status.
//!
//! The decision logic lives in [`PollState::observe`], a pure transition
//! over one status response. [`BuildStatusPoller`] only adds the timers and
//! the request loop around it.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use studio_core::{BuildReport, BuildStatus, JobRef};
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::error::{PollError, Result};

/// Source of status documents for a job.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
	async fn fetch_status(&self, job: &JobRef) -> Result<Value>;
}

/// Back-off policy for status requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
	/// Delay before the first request and base of the back-off.
	pub initial_delay: Duration,
	/// Ceiling of the doubled retry delay.
	pub max_delay: Duration,
}

impl Default for PollConfig {
	fn default() -> Self {
		Self {
			initial_delay: Duration::from_millis(250),
			max_delay: Duration::from_secs(4),
		}
	}
}

impl PollConfig {
	/// Delay following `current`: doubled, clamped to the ceiling.
	pub fn next_delay(&self, current: Duration) -> Duration {
		current.saturating_mul(2).min(self.max_delay)
	}
}

/// A status different from the previously observed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
	pub status: BuildStatus,
	pub message: Option<String>,
}

impl StatusChange {
	/// The line shown to the user: the status label, followed by the server
	/// message when there is one.
	pub fn line(&self) -> String {
		match &self.message {
			Some(message) => format!("{} - {message}", self.status.label()),
			None => self.status.label().to_string(),
		}
	}
}

/// What to do after a response.
#[derive(Debug)]
pub enum Next {
	/// Terminal status reached.
	Done(Box<BuildReport>),
	/// Request again after the delay.
	Retry(Duration),
	/// Stop with an error.
	Fail(PollError),
}

/// Result of feeding one response into a [`PollState`].
#[derive(Debug)]
pub struct Observation {
	pub change: Option<StatusChange>,
	pub next: Next,
}

/// State carried between status responses of one poll.
#[derive(Debug, Clone)]
pub struct PollState {
	config: PollConfig,
	last_status: Option<BuildStatus>,
	delay: Duration,
}

impl PollState {
	pub fn new(config: PollConfig) -> Self {
		Self {
			config,
			last_status: None,
			delay: config.initial_delay,
		}
	}

	pub fn last_status(&self) -> Option<BuildStatus> {
		self.last_status
	}

	/// Delay that will precede the next retry.
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Classify `response`, received `elapsed` after the first request.
	pub fn observe(&mut self, response: Value, elapsed: Duration) -> Observation {
		let raw = status_text(&response);
		let status = match raw.parse::<BuildStatus>() {
			Ok(status) => status,
			Err(raw) => {
				return Observation {
					change: None,
					next: Next::Fail(PollError::UnknownStatus(raw)),
				}
			}
		};

		let change = (self.last_status != Some(status)).then(|| StatusChange {
			status,
			message: response
				.get("message")
				.and_then(Value::as_str)
				.map(str::to_string),
		});
		self.last_status = Some(status);

		let next = if status.is_terminal() {
			match serde_json::from_value::<BuildReport>(response) {
				Ok(report) => Next::Done(Box::new(report)),
				Err(err) => Next::Fail(PollError::InvalidReport(err)),
			}
		} else {
			match status.liveness_timeout() {
				Some(limit) if elapsed > limit => Next::Fail(PollError::Timeout { status, elapsed }),
				_ => {
					self.delay = self.config.next_delay(self.delay);
					Next::Retry(self.delay)
				}
			}
		};

		Observation { change, next }
	}
}

fn status_text(response: &Value) -> String {
	match response.get("status") {
		Some(Value::String(status)) => status.clone(),
		Some(other) => other.to_string(),
		None => "undefined".to_string(),
	}
}

/// Polls the status of a job until it finishes, fails or times out.
#[derive(Debug)]
pub struct BuildStatusPoller<F> {
	fetcher: F,
	config: PollConfig,
}

impl<F: StatusFetcher> BuildStatusPoller<F> {
	pub fn new(fetcher: F) -> Self {
		Self::with_config(fetcher, PollConfig::default())
	}

	pub fn with_config(fetcher: F, config: PollConfig) -> Self {
		Self { fetcher, config }
	}

	/// Poll `job`. `on_status_change` runs once for every response whose
	/// status differs from the previous one, before the response is acted on.
	pub async fn poll<C>(&self, job: &JobRef, mut on_status_change: C) -> std::result::Result<BuildReport, PollError>
	where
		C: FnMut(&StatusChange),
	{
		let mut state = PollState::new(self.config);
		sleep(self.config.initial_delay).await;
		let started = Instant::now();

		loop {
			let response = self.fetcher.fetch_status(job).await?;
			let observation = state.observe(response, started.elapsed());

			if let Some(change) = &observation.change {
				info!(job = %job, status = %change.status, message = ?change.message, "Build status changed");
				on_status_change(change);
			}

			match observation.next {
				Next::Done(report) => return Ok(*report),
				Next::Fail(err) => {
					debug!(job = %job, error = %err, "Polling stopped");
					return Err(err);
				}
				Next::Retry(delay) => {
					debug!(job = %job, ?delay, "Build not finished, retrying");
					sleep(delay).await;
				}
			}
		}
	}
}
