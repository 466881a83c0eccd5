// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider and data source schemas.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ProviderError, Result};

pub const PROVIDER_NAME: &str = "device42";
pub const PASSWORD_DATA_SOURCE: &str = "device42_password";
pub const ATTR_ID: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
	String,
	Int,
	Bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
	#[serde(rename = "type")]
	pub kind: AttributeType,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub required: bool,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub optional: bool,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub computed: bool,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub sensitive: bool,
	#[serde(skip_serializing_if = "str::is_empty")]
	pub description: &'static str,
}

impl Attribute {
	fn new(kind: AttributeType) -> Self {
		Self {
			kind,
			required: false,
			optional: false,
			computed: false,
			sensitive: false,
			description: "",
		}
	}

	pub fn required(kind: AttributeType) -> Self {
		Self {
			required: true,
			..Self::new(kind)
		}
	}

	pub fn optional(kind: AttributeType) -> Self {
		Self {
			optional: true,
			..Self::new(kind)
		}
	}

	pub fn computed(kind: AttributeType) -> Self {
		Self {
			computed: true,
			..Self::new(kind)
		}
	}

	pub fn sensitive(mut self) -> Self {
		self.sensitive = true;
		self
	}

	pub fn describe(mut self, description: &'static str) -> Self {
		self.description = description;
		self
	}
}

/// Attribute set of the provider block or of one data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
	pub attributes: BTreeMap<&'static str, Attribute>,
}

impl Schema {
	pub fn with(mut self, name: &'static str, attribute: Attribute) -> Self {
		self.attributes.insert(name, attribute);
		self
	}

	pub fn attribute(&self, name: &str) -> Option<&Attribute> {
		self.attributes.get(name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSchema {
	pub provider: Schema,
	pub data_sources: BTreeMap<&'static str, Schema>,
}

impl ProviderSchema {
	/// Internal consistency checks, run before the provider serves anything.
	///
	/// Every attribute must be exactly one of required, optional or computed
	/// (optional+computed is allowed), and every data source must be looked
	/// up by a required `id`.
	pub fn validate(&self) -> Result<()> {
		validate_block("provider", &self.provider)?;

		if self.data_sources.is_empty() {
			return Err(ProviderError::Schema("provider has no data sources".to_string()));
		}

		for (name, schema) in &self.data_sources {
			if !name.starts_with(&format!("{PROVIDER_NAME}_")) {
				return Err(ProviderError::Schema(format!(
					"data source {name} is not prefixed with {PROVIDER_NAME}_"
				)));
			}
			validate_block(name, schema)?;

			match schema.attribute(ATTR_ID) {
				Some(id) if id.required => {}
				_ => {
					return Err(ProviderError::Schema(format!(
						"data source {name} must declare a required {ATTR_ID}"
					)));
				}
			}
		}

		Ok(())
	}
}

fn validate_block(block: &str, schema: &Schema) -> Result<()> {
	if schema.attributes.is_empty() {
		return Err(ProviderError::Schema(format!("{block}: no attributes")));
	}

	for (name, attr) in &schema.attributes {
		let invalid = match (attr.required, attr.optional, attr.computed) {
			(true, false, false) | (false, true, _) | (false, false, true) => None,
			(false, false, false) => Some("must be required, optional or computed"),
			(true, true, _) => Some("cannot be both required and optional"),
			(true, false, true) => Some("computed attributes cannot be required"),
		};

		if let Some(reason) = invalid {
			return Err(ProviderError::Schema(format!("{block}.{name}: {reason}")));
		}
	}

	Ok(())
}

/// Schema of the Device42 provider.
pub fn provider_schema() -> ProviderSchema {
	let provider = Schema::default()
		.with(
			"hostname",
			Attribute::optional(AttributeType::String)
				.describe("Device42 host, without scheme. Defaults to D42_HOSTNAME or swaggerdemo.device42.com."),
		)
		.with(
			"username",
			Attribute::required(AttributeType::String).describe("Device42 user. Defaults to D42_USERNAME."),
		)
		.with(
			"password",
			Attribute::required(AttributeType::String)
				.sensitive()
				.describe("Device42 password. Defaults to D42_PASSWORD."),
		)
		.with(
			"insecure",
			Attribute::optional(AttributeType::Bool).describe("Skip TLS certificate verification."),
		)
		.with(
			"timeout_secs",
			Attribute::optional(AttributeType::Int).describe("Request timeout in seconds."),
		)
		.with(
			"scheme",
			Attribute::optional(AttributeType::String)
				.describe("https (default) or http. Defaults to D42_SCHEME."),
		)
		.with(
			"log_level",
			Attribute::optional(AttributeType::String)
				.describe("Log filter used when RUST_LOG is unset. Defaults to D42_LOG_LEVEL."),
		);

	let mut data_sources = BTreeMap::new();
	data_sources.insert(PASSWORD_DATA_SOURCE, password_data_source_schema());

	ProviderSchema {
		provider,
		data_sources,
	}
}

pub fn password_data_source_schema() -> Schema {
	Schema::default()
		.with(
			ATTR_ID,
			Attribute::required(AttributeType::Int).describe("Device42 secret id."),
		)
		.with(
			d42_passwords::ATTR_USERNAME,
			Attribute::computed(AttributeType::String),
		)
		.with(
			d42_passwords::ATTR_PASSWORD,
			Attribute::computed(AttributeType::String).sensitive(),
		)
		.with(d42_passwords::ATTR_LABEL, Attribute::computed(AttributeType::String))
}
