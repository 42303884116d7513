// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolved API settings.

use url::Url;

use crate::error::{ConfigError, Result};
use crate::paths::{default_candidates, load_first};
use crate::values::ConfigValues;

/// API endpoint used when the config file does not name one.
pub const DEFAULT_API: &str = "https://api.javascript.studio/beta";

/// Environment variable overriding the configured token.
pub const TOKEN_ENV: &str = "STUDIO_TOKEN";

/// Settings the CLI needs to talk to the API.
#[derive(Clone, PartialEq, Eq)]
pub struct StudioConfig {
	pub api: Url,
	pub token: String,
	pub account: Option<String>,
}

impl std::fmt::Debug for StudioConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StudioConfig")
			.field("api", &self.api.as_str())
			.field("token", &"[REDACTED]")
			.field("account", &self.account)
			.finish()
	}
}

impl StudioConfig {
	/// Build settings from raw file values. `env_token`, when present and not
	/// empty, takes precedence over the file's token.
	pub fn build(values: &ConfigValues, env_token: Option<String>) -> Result<Self> {
		let api_text = values.get("api").map_or(DEFAULT_API, String::as_str);
		let api = Url::parse(api_text).map_err(|source| ConfigError::InvalidApiUrl {
			url: api_text.to_string(),
			source,
		})?;

		let token = env_token
			.filter(|token| !token.is_empty())
			.or_else(|| values.get("token").cloned())
			.ok_or(ConfigError::MissingToken)?;

		Ok(Self {
			api,
			token,
			account: values.get("account").cloned(),
		})
	}

	/// Discover the config file and combine it with the environment.
	pub fn load() -> Result<Self> {
		let values = match load_first(&default_candidates())? {
			Some((_, values)) => values,
			None => {
				tracing::debug!("no config file found, using defaults");
				ConfigValues::new()
			}
		};
		let config = Self::build(&values, std::env::var(TOKEN_ENV).ok())?;
		tracing::debug!(api = %config.api, account = ?config.account, "loaded config");
		Ok(config)
	}
}
