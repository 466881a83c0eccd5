// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Transport-level errors for requests to Device42.

use thiserror::Error;

/// Failure to obtain a response at all. Any of these makes the body untrustworthy.
#[derive(Debug, Error)]
pub enum RequestError {
	/// Request timed out.
	#[error("request to Device42 timed out")]
	Timeout,

	/// Connection refused, DNS failure or TLS handshake failure.
	#[error("could not connect to Device42: {0}")]
	Connect(String),

	/// The response body could not be read.
	#[error("failed to read Device42 response body: {0}")]
	Body(String),

	/// The configured base URL cannot be joined with the API path.
	#[error("invalid Device42 URL: {0}")]
	InvalidUrl(String),

	/// Any other error raised by the HTTP client.
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),
}

impl RequestError {
	/// Map a `reqwest` send error onto the narrower variants where possible.
	pub(crate) fn from_send(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			return RequestError::Timeout;
		}
		if err.is_connect() {
			return RequestError::Connect(err.to_string());
		}
		RequestError::Http(err)
	}
}
