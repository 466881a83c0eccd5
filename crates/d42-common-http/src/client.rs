// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Pre-configured `reqwest` client builder.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport options that are decided at provider configure time.
#[derive(Debug, Clone)]
pub struct ClientOptions {
	pub timeout: Duration,
	/// Accept any TLS certificate. Only for appliances with self-signed certificates.
	pub insecure: bool,
}

impl Default for ClientOptions {
	fn default() -> Self {
		Self {
			timeout: DEFAULT_TIMEOUT,
			insecure: false,
		}
	}
}

/// Creates a client builder with the provider User-Agent and the given options applied.
///
/// Use this when further customization is needed before building.
///
/// # Example
/// ```ignore
/// let client = d42_common_http::builder(&ClientOptions::default())
///     .redirect(reqwest::redirect::Policy::none())
///     .build()?;
/// ```
pub fn builder(options: &ClientOptions) -> ClientBuilder {
	let mut builder = Client::builder()
		.user_agent(user_agent())
		.timeout(options.timeout);

	if options.insecure {
		warn!("TLS certificate verification is disabled for Device42 requests");
		builder = builder.danger_accept_invalid_certs(true);
	}

	builder
}

/// Returns the provider User-Agent string.
///
/// Format: `terraform-provider-device42/{version}`
pub fn user_agent() -> String {
	format!("terraform-provider-device42/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 2);
		assert_eq!(parts[0], "terraform-provider-device42");
		assert_eq!(parts[1], env!("CARGO_PKG_VERSION"));
	}

	#[test]
	fn default_options_verify_tls() {
		let options = ClientOptions::default();
		assert!(!options.insecure);
		assert_eq!(options.timeout, Duration::from_secs(30));
	}

	#[test]
	fn builds_secure_and_insecure_clients() {
		assert!(builder(&ClientOptions::default()).build().is_ok());

		let insecure = ClientOptions {
			insecure: true,
			..Default::default()
		};
		assert!(builder(&insecure).build().is_ok());
	}
}
