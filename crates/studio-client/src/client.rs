// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the Studio uploads API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_core::{JobRef, UploadTarget};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, Result};
use crate::poller::StatusFetcher;

/// Timeouts and options for API requests.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Timeout for upload negotiation and status requests.
	pub request_timeout: Duration,
	/// Timeout for the payload upload.
	pub upload_timeout: Duration,
	/// Ask the server to report thrown exceptions alongside errors.
	pub exceptions: bool,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			request_timeout: Duration::from_secs(5),
			upload_timeout: Duration::from_secs(30),
			exceptions: false,
		}
	}
}

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	global: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	message: Option<String>,
}

/// Client for the Studio uploads API.
///
/// # Example
///
/// ```ignore
/// let client = StudioClient::new(&api, token, ClientConfig::default())?;
/// let target = client.request_upload(None).await?;
/// client.upload(&target.url, payload).await?;
/// let status = client.get_upload_status(&target.number, false).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StudioClient {
	http_client: Client,
	base_url: String,
	token: String,
	config: ClientConfig,
}

impl StudioClient {
	pub fn new(api: &Url, token: impl Into<String>, config: ClientConfig) -> Result<Self> {
		let base_url = api.as_str().trim_end_matches('/').to_string();
		let http_client = crate::http::builder().gzip(true).build()?;

		debug!(base_url = %base_url, "Studio client initialized");

		Ok(Self {
			http_client,
			base_url,
			token: token.into(),
			config,
		})
	}

	fn authorization(&self) -> String {
		format!("token {}", self.token)
	}

	/// Negotiates an upload slot. `global` names the global the analyzed
	/// script exports, when there is one.
	pub async fn request_upload(&self, global: Option<&str>) -> Result<UploadTarget> {
		let url = format!("{}/uploads", self.base_url);
		debug!(url = %url, global = ?global, "Requesting upload URL");

		let response = self
			.http_client
			.post(&url)
			.header(AUTHORIZATION, self.authorization())
			.timeout(self.config.request_timeout)
			.json(&UploadRequest { global })
			.send()
			.await?;

		match response.status() {
			StatusCode::OK => {
				let target: UploadTarget = response.json().await?;
				Url::parse(&target.url).map_err(|source| ClientError::InvalidUrl {
					url: target.url.clone(),
					source,
				})?;
				info!(number = %target.number, "Upload URL received");
				Ok(target)
			}
			StatusCode::PAYMENT_REQUIRED => {
				let message = error_message(response).await;
				Err(ClientError::PaymentRequired(
					message.unwrap_or_else(|| "Payment required".to_string()),
				))
			}
			StatusCode::FORBIDDEN => {
				let message = error_message(response).await;
				Err(ClientError::Forbidden(
					message.unwrap_or_else(|| "Forbidden".to_string()),
				))
			}
			status => Err(unexpected(status, &url)),
		}
	}

	/// PUTs the compressed payload to a pre-signed upload URL. The URL carries
	/// its own credentials, so no token is sent.
	pub async fn upload(&self, url: &str, payload: Vec<u8>) -> Result<()> {
		let content_length = payload.len();
		debug!(url = %url, content_length, "Uploading payload");

		let response = self
			.http_client
			.put(url)
			.header(CONTENT_LENGTH, content_length)
			.timeout(self.config.upload_timeout)
			.body(payload)
			.send()
			.await?;

		if response.status() != StatusCode::OK {
			return Err(unexpected(response.status(), url));
		}
		info!(content_length, "Upload complete");
		Ok(())
	}

	/// Fetches the current status document of an upload.
	pub async fn get_upload_status(&self, number: &JobRef, exceptions: bool) -> Result<Value> {
		let mut url = format!("{}/uploads/{}", self.base_url, number);
		if exceptions {
			url.push_str("?exceptions=1");
		}
		debug!(url = %url, "Fetching build status");

		let response = self
			.http_client
			.get(&url)
			.header(AUTHORIZATION, self.authorization())
			.timeout(self.config.request_timeout)
			.send()
			.await?;

		if response.status() != StatusCode::OK {
			return Err(unexpected(response.status(), &url));
		}
		Ok(response.json().await?)
	}
}

#[async_trait]
impl StatusFetcher for StudioClient {
	async fn fetch_status(&self, job: &JobRef) -> Result<Value> {
		self.get_upload_status(job, self.config.exceptions).await
	}
}

async fn error_message(response: Response) -> Option<String> {
	response
		.json::<ErrorBody>()
		.await
		.ok()
		.and_then(|body| body.message)
		.filter(|message| !message.is_empty())
}

fn unexpected(status: StatusCode, url: &str) -> ClientError {
	warn!(status = status.as_u16(), url = %url, "Unexpected response status");
	ClientError::UnexpectedStatus {
		status: status.as_u16(),
		url: url.to_string(),
	}
}
