// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the Device42 provider.
//!
//! Settings are layered from several sources, highest precedence first:
//!
//! 1. The provider block passed in by Terraform
//! 2. Environment variables (`D42_HOSTNAME`, `D42_USERNAME`, `D42_PASSWORD`, ...)
//! 3. An optional TOML file
//! 4. Built-in defaults
//!
//! # Usage
//!
//! ```ignore
//! use d42_config::{load_config_for_provider_block, ProviderConfigLayer};
//!
//! let config = load_config_for_provider_block(ProviderConfigLayer::default())?;
//! println!("Device42 at {}", config.base_url());
//! ```

pub mod env;
pub mod error;
pub mod layer;
pub mod sources;

pub use error::ConfigError;
pub use layer::ProviderConfigLayer;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, ProviderBlockSource, TomlSource,
	ENV_PREFIX,
};

use std::time::Duration;

use d42_common_secret::SecretString;
use tracing::{debug, info};

pub const DEFAULT_HOSTNAME: &str = "swaggerdemo.device42.com";
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Fully resolved provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
	/// Host (and optional port) of the Device42 appliance, without scheme.
	pub hostname: String,
	pub username: String,
	pub password: SecretString,
	/// Skip TLS certificate verification.
	pub insecure: bool,
	pub timeout: Duration,
	pub scheme: String,
	pub log_level: String,
}

impl ProviderConfig {
	/// Base URL all API paths are joined onto, e.g. `https://swaggerdemo.device42.com`.
	pub fn base_url(&self) -> String {
		format!("{}://{}", self.scheme, self.hostname)
	}
}

/// Load configuration for a Terraform provider block, falling back to the environment.
pub fn load_config_for_provider_block(
	block: ProviderConfigLayer,
) -> Result<ProviderConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(EnvSource::new()),
		Box::new(ProviderBlockSource::new(block)),
	])
}

/// Merge the given sources in precedence order and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ProviderConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ProviderConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize a merged layer into resolved config.
pub fn finalize(layer: ProviderConfigLayer) -> Result<ProviderConfig, ConfigError> {
	let username = layer.username.ok_or_else(|| missing("username"))?;
	let password = layer.password.ok_or_else(|| missing("password"))?;

	let config = ProviderConfig {
		hostname: layer
			.hostname
			.unwrap_or_else(|| DEFAULT_HOSTNAME.to_string()),
		username,
		password,
		insecure: layer.insecure.unwrap_or(false),
		timeout: Duration::from_secs(layer.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
		scheme: layer
			.scheme
			.unwrap_or_else(|| DEFAULT_SCHEME.to_string())
			.to_ascii_lowercase(),
		log_level: layer
			.log_level
			.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
	};

	validate_config(&config)?;

	info!(
		hostname = %config.hostname,
		username = %config.username,
		password = %config.password,
		insecure = config.insecure,
		timeout_secs = config.timeout.as_secs(),
		"Provider configuration loaded"
	);

	Ok(config)
}

fn missing(key: &str) -> ConfigError {
	ConfigError::MissingValue {
		key: key.to_string(),
		env_var: EnvSource::new().var_name(key),
	}
}

/// Validate cross-field configuration rules.
fn validate_config(config: &ProviderConfig) -> Result<(), ConfigError> {
	if config.hostname.trim().is_empty() {
		return Err(ConfigError::Validation("hostname must not be empty".to_string()));
	}

	if config.hostname.contains("://") {
		return Err(ConfigError::Validation(format!(
			"hostname '{}' must not include a scheme; set D42_SCHEME instead",
			config.hostname
		)));
	}

	if config.username.trim().is_empty() {
		return Err(missing("username"));
	}

	if config.password.is_empty() {
		return Err(missing("password"));
	}

	if config.scheme != "https" && config.scheme != "http" {
		return Err(ConfigError::InvalidValue {
			key: "scheme".to_string(),
			message: format!("expected 'https' or 'http', got '{}'", config.scheme),
		});
	}

	if config.timeout.is_zero() {
		return Err(ConfigError::InvalidValue {
			key: "timeout_secs".to_string(),
			message: "timeout must be greater than zero".to_string(),
		});
	}

	Ok(())
}
