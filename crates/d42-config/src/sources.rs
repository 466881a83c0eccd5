// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files, environment variables
//! and the explicit provider block.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::env::{env_bool, env_var, load_secret_env};
use crate::error::ConfigError;
use crate::layer::ProviderConfigLayer;

/// Prefix for every environment variable read by [`EnvSource::new`].
pub const ENV_PREFIX: &str = "D42_";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	ProviderBlock = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ProviderConfigLayer, ConfigError>;
}

/// Built-in defaults source. Defaults are applied at finalize time, so the layer is empty.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ProviderConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ProviderConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is not an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ProviderConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ProviderConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ProviderConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `{prefix}<FIELD>`, e.g. `D42_HOSTNAME`, `D42_PASSWORD` or `D42_PASSWORD_FILE`.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	pub fn new() -> Self {
		Self::with_prefix(ENV_PREFIX)
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	/// Full variable name for a field, e.g. `D42_USERNAME`.
	pub fn var_name(&self, field: &str) -> String {
		format!("{}{}", self.prefix, field.to_ascii_uppercase())
	}

	fn u64_var(&self, field: &str) -> Result<Option<u64>, ConfigError> {
		let name = self.var_name(field);
		match env_var(&name) {
			Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name,
				message: format!("invalid u64 value '{v}'"),
			}),
			None => Ok(None),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ProviderConfigLayer, ConfigError> {
		debug!(prefix = %self.prefix, "loading environment variables");
		Ok(ProviderConfigLayer {
			hostname: env_var(&self.var_name("hostname")),
			username: env_var(&self.var_name("username")),
			password: load_secret_env(&self.var_name("password"))?,
			insecure: env_bool(&self.var_name("insecure")),
			timeout_secs: self.u64_var("timeout_secs")?,
			scheme: env_var(&self.var_name("scheme")),
			log_level: env_var(&self.var_name("log_level")),
		})
	}
}

/// The provider block handed over by Terraform at configure time.
pub struct ProviderBlockSource {
	layer: ProviderConfigLayer,
}

impl ProviderBlockSource {
	pub fn new(layer: ProviderConfigLayer) -> Self {
		Self { layer }
	}
}

impl ConfigSource for ProviderBlockSource {
	fn name(&self) -> &'static str {
		"provider-block"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ProviderBlock
	}

	fn load(&self) -> Result<ProviderConfigLayer, ConfigError> {
		Ok(self.layer.clone())
	}
}
