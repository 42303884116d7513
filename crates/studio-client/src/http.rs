// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

/// Creates a new HTTP client builder with the Studio User-Agent header.
///
/// # Example
/// ```ignore
/// let client = studio_client::http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the Studio User-Agent string.
///
/// Format: `JavaScript Studio CLI v{version}`
pub fn user_agent() -> String {
	format!("JavaScript Studio CLI v{}", env!("CARGO_PKG_VERSION"))
}
