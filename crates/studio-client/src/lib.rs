// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the JavaScript Studio API.
//!
//! This crate provides:
//! - A pre-configured HTTP client with the Studio User-Agent header
//! - Upload negotiation and the payload upload
//! - Gzip compression of the payload
//! - Polling a build until it reaches a terminal status, with back-off and
//!   per-status liveness timeouts

mod client;
mod error;
mod gzip;
pub mod http;
mod poller;

pub use client::{ClientConfig, StudioClient};
pub use error::{ClientError, PollError, Result};
pub use gzip::gzip;
pub use poller::{BuildStatusPoller, Next, Observation, PollConfig, PollState, StatusChange, StatusFetcher};
