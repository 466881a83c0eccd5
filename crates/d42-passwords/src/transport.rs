// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The HTTP request seam between the classifier and Device42.

use async_trait::async_trait;
use d42_common_http::ClientOptions;
use d42_common_secret::SecretString;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument, trace};

use crate::error::RequestError;

/// Password lookup endpoint, relative to the appliance base URL.
pub const PASSWORDS_PATH: &str = "/api/1.0/passwords/";

/// Status and body of one password API response.
#[derive(Debug, Clone)]
pub struct RawApiResponse {
	pub status: StatusCode,
	pub body: Vec<u8>,
}

/// Issues the password lookup. Authentication and TLS are the implementor's concern.
#[async_trait]
pub trait PasswordTransport: Send + Sync {
	/// `GET {PASSWORDS_PATH}?id={id}&plain_text=yes` with `Accept: application/json`.
	async fn get_password(&self, id: i64) -> Result<RawApiResponse, RequestError>;
}

/// Basic-auth `reqwest` transport.
#[derive(Clone)]
pub struct ReqwestTransport {
	http_client: Client,
	base_url: String,
	username: String,
	password: SecretString,
}

impl ReqwestTransport {
	/// Build a transport against `base_url`, e.g. `https://d42.example.com`.
	pub fn new(
		base_url: impl Into<String>,
		username: impl Into<String>,
		password: SecretString,
		options: &ClientOptions,
	) -> Result<Self, RequestError> {
		let http_client = d42_common_http::builder(options)
			.build()
			.map_err(RequestError::Http)?;

		Ok(Self::with_client(http_client, base_url, username, password))
	}

	/// Use a pre-built client. The client must not add its own authentication.
	pub fn with_client(
		http_client: Client,
		base_url: impl Into<String>,
		username: impl Into<String>,
		password: SecretString,
	) -> Self {
		Self {
			http_client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			username: username.into(),
			password,
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn passwords_url(&self) -> Result<reqwest::Url, RequestError> {
		let raw = format!("{}{}", self.base_url, PASSWORDS_PATH);
		reqwest::Url::parse(&raw).map_err(|e| RequestError::InvalidUrl(format!("{raw}: {e}")))
	}
}

#[async_trait]
impl PasswordTransport for ReqwestTransport {
	#[instrument(skip(self), fields(base_url = %self.base_url))]
	async fn get_password(&self, id: i64) -> Result<RawApiResponse, RequestError> {
		let url = self.passwords_url()?;
		let id_param = id.to_string();
		debug!(url = %url, "Requesting password from Device42");

		let response = self
			.http_client
			.get(url)
			.query(&[("id", id_param.as_str()), ("plain_text", "yes")])
			.header(ACCEPT, "application/json")
			.basic_auth(&self.username, Some(self.password.expose()))
			.send()
			.await
			.map_err(|e| {
				let err = RequestError::from_send(e);
				error!(error = %err, "Device42 password request failed");
				err
			})?;

		let status = response.status();
		debug!(status = %status, "Received response from Device42");

		let body = response.bytes().await.map_err(|e| {
			error!(error = %e, "Failed to read Device42 response body");
			RequestError::Body(e.to_string())
		})?;

		trace!(len = body.len(), "Response body received");

		Ok(RawApiResponse {
			status,
			body: body.to_vec(),
		})
	}
}

impl std::fmt::Debug for ReqwestTransport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReqwestTransport")
			.field("base_url", &self.base_url)
			.field("username", &self.username)
			.field("password", &self.password)
			.finish()
	}
}
