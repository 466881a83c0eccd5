// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider lifecycle: schema, configure, data source reads.

use d42_common_http::ClientOptions;
use d42_config::{ConfigError, ProviderConfig, ProviderConfigLayer};
use d42_passwords::{PasswordTransport, PasswordsClient, ReqwestTransport};
use serde_json::Value;
use tracing::{info, instrument};

use crate::data_source::{read_password, ReadResult};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ProviderError, Result};
use crate::schema::{provider_schema, ProviderSchema, PASSWORD_DATA_SOURCE};

/// The Device42 provider.
///
/// Starts unconfigured; data sources can only be read after
/// [`Device42Provider::configure`] (or one of its variants) succeeded.
#[derive(Debug)]
pub struct Device42Provider<T = ReqwestTransport> {
	schema: ProviderSchema,
	client: Option<PasswordsClient<T>>,
}

impl<T> Device42Provider<T>
where
	T: PasswordTransport,
{
	/// Create an unconfigured provider. Fails if the schema is inconsistent.
	pub fn new() -> Result<Self> {
		let schema = provider_schema();
		schema.validate()?;
		Ok(Self {
			schema,
			client: None,
		})
	}

	/// Configure with an already built transport.
	pub fn with_transport(transport: T) -> Result<Self> {
		let mut provider = Self::new()?;
		provider.client = Some(PasswordsClient::new(transport));
		Ok(provider)
	}

	pub fn schema(&self) -> &ProviderSchema {
		&self.schema
	}

	pub fn is_configured(&self) -> bool {
		self.client.is_some()
	}

	/// Read the named data source with the given configuration.
	pub async fn read_data_source(&self, type_name: &str, config: &Value) -> Result<ReadResult> {
		if !self.schema.data_sources.contains_key(type_name) {
			return Err(ProviderError::UnknownDataSource(type_name.to_string()));
		}
		let client = self.client.as_ref().ok_or(ProviderError::NotConfigured)?;

		match type_name {
			PASSWORD_DATA_SOURCE => Ok(read_password(client, config).await),
			other => Err(ProviderError::UnknownDataSource(other.to_string())),
		}
	}
}

impl Device42Provider<ReqwestTransport> {
	/// Configure from a Terraform provider block. Attributes left out of the
	/// block fall back to the `D42_*` environment and the defaults.
	#[instrument(skip_all)]
	pub fn configure(&mut self, block: &Value) -> Diagnostics {
		match self.try_configure(block) {
			Ok(()) => Diagnostics::new(),
			Err(err) => configure_diagnostic(err).into(),
		}
	}

	fn try_configure(&mut self, block: &Value) -> Result<()> {
		let layer = match block {
			Value::Null => ProviderConfigLayer::default(),
			other => serde_json::from_value::<ProviderConfigLayer>(other.clone())?,
		};

		let config = d42_config::load_config_for_provider_block(layer)?;
		self.configure_with(&config)
	}

	/// Configure from resolved configuration.
	pub fn configure_with(&mut self, config: &ProviderConfig) -> Result<()> {
		let options = ClientOptions {
			timeout: config.timeout,
			insecure: config.insecure,
		};
		let transport = ReqwestTransport::new(
			config.base_url(),
			config.username.clone(),
			config.password.clone(),
			&options,
		)?;

		info!(base_url = %transport.base_url(), "Device42 provider configured");
		self.client = Some(PasswordsClient::new(transport));
		Ok(())
	}
}

fn configure_diagnostic(err: ProviderError) -> Diagnostic {
	let diagnostic = Diagnostic::error("Unable to configure the Device42 provider", err.to_string());
	match err {
		ProviderError::Config(ConfigError::MissingValue { key, .. })
		| ProviderError::Config(ConfigError::InvalidValue { key, .. }) => {
			diagnostic.with_attribute(key)
		}
		_ => diagnostic,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn new_provider_is_unconfigured() {
		let provider: Device42Provider = Device42Provider::new().unwrap();
		assert!(!provider.is_configured());
		assert!(provider.schema().data_sources.contains_key("device42_password"));
	}

	#[test]
	fn configure_from_block() {
		let mut provider: Device42Provider = Device42Provider::new().unwrap();
		let diags = provider.configure(&json!({
			"hostname": "d42.example.com",
			"username": "admin",
			"password": "adm!nd42",
		}));

		assert!(diags.is_empty(), "{diags:?}");
		assert!(provider.is_configured());
	}

	#[test]
	fn configure_rejects_bad_block_shape() {
		let mut provider: Device42Provider = Device42Provider::new().unwrap();
		let diags = provider.configure(&json!({"username": 7}));

		assert!(diags.has_errors());
		assert!(!provider.is_configured());
		let diag = diags.iter().next().unwrap();
		assert_eq!(diag.summary, "Unable to configure the Device42 provider");
		assert!(diag.detail.starts_with("invalid provider configuration block"));
	}

	#[test]
	fn configure_rejects_unknown_attribute() {
		let mut provider: Device42Provider = Device42Provider::new().unwrap();
		let diags = provider.configure(&json!({
			"username": "admin",
			"password": "adm!nd42",
			"insecur": true,
		}));

		assert!(diags.has_errors());
		assert!(!provider.is_configured());
		assert!(diags.iter().next().unwrap().detail.contains("insecur"));
	}

	#[test]
	fn configure_accepts_every_schema_attribute() {
		let mut provider: Device42Provider = Device42Provider::new().unwrap();
		let diags = provider.configure(&json!({
			"hostname": "127.0.0.1:8443",
			"username": "admin",
			"password": "adm!nd42",
			"insecure": true,
			"timeout_secs": 10,
			"scheme": "https",
			"log_level": "debug",
		}));

		assert!(diags.is_empty(), "{diags:?}");
		let declared: Vec<_> = provider.schema().provider.attributes.keys().copied().collect();
		assert_eq!(
			declared,
			["hostname", "insecure", "log_level", "password", "scheme", "timeout_secs", "username"]
		);
	}

	#[test]
	fn configure_rejects_hostname_with_scheme() {
		let mut provider: Device42Provider = Device42Provider::new().unwrap();
		let diags = provider.configure(&json!({
			"hostname": "https://d42.example.com",
			"username": "admin",
			"password": "adm!nd42",
		}));

		assert!(diags.has_errors());
		assert!(!provider.is_configured());
	}

	#[tokio::test]
	async fn read_before_configure_fails() {
		let provider: Device42Provider = Device42Provider::new().unwrap();
		let err = provider
			.read_data_source("device42_password", &json!({"id": 1}))
			.await
			.unwrap_err();

		assert!(matches!(err, ProviderError::NotConfigured));
	}

	#[tokio::test]
	async fn unknown_data_source() {
		let mut provider: Device42Provider = Device42Provider::new().unwrap();
		provider.configure(&json!({"username": "u", "password": "p"}));
		let err = provider
			.read_data_source("device42_certificate", &json!({"id": 1}))
			.await
			.unwrap_err();

		assert!(matches!(err, ProviderError::UnknownDataSource(name) if name == "device42_certificate"));
	}
}
