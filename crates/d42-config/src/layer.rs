// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use d42_common_secret::SecretString;
use serde::Deserialize;

/// Provider configuration layer. Every field is optional so layers can be merged.
///
/// The same shape is accepted from TOML files and from the provider block
/// supplied by Terraform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfigLayer {
	#[serde(default)]
	pub hostname: Option<String>,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub password: Option<SecretString>,
	#[serde(default)]
	pub insecure: Option<bool>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	#[serde(default)]
	pub scheme: Option<String>,
	#[serde(default)]
	pub log_level: Option<String>,
}

impl ProviderConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ProviderConfigLayer) {
		merge_field(&mut self.hostname, other.hostname);
		merge_field(&mut self.username, other.username);
		merge_field(&mut self.password, other.password);
		merge_field(&mut self.insecure, other.insecure);
		merge_field(&mut self.timeout_secs, other.timeout_secs);
		merge_field(&mut self.scheme, other.scheme);
		merge_field(&mut self.log_level, other.log_level);
	}

	pub fn is_empty(&self) -> bool {
		self.hostname.is_none()
			&& self.username.is_none()
			&& self.password.is_none()
			&& self.insecure.is_none()
			&& self.timeout_secs.is_none()
			&& self.scheme.is_none()
			&& self.log_level.is_none()
	}
}

fn merge_field<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}
