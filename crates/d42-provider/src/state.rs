// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Data source state populated by the field mapper.

use std::collections::BTreeMap;

use d42_common_secret::{SecretString, REDACTED};
use d42_passwords::OutputSink;
use serde_json::{Map, Value};

use crate::schema::ATTR_ID;

/// Attribute values of one data source instance.
///
/// Sensitive values are kept apart so they can only leave through
/// [`DataSourceState::to_json`] with `reveal_sensitive` set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSourceState {
	id: Option<String>,
	strings: BTreeMap<String, String>,
	sensitive: BTreeMap<String, SecretString>,
}

impl DataSourceState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	pub fn get_string(&self, name: &str) -> Option<&str> {
		self.strings.get(name).map(String::as_str)
	}

	pub fn get_sensitive(&self, name: &str) -> Option<&SecretString> {
		self.sensitive.get(name)
	}

	/// Render as a flat JSON object. Sensitive values are replaced with
	/// `[REDACTED]` unless `reveal_sensitive` is set.
	pub fn to_json(&self, reveal_sensitive: bool) -> Value {
		let mut object = Map::new();

		if let Some(id) = &self.id {
			object.insert(ATTR_ID.to_string(), Value::String(id.clone()));
		}
		for (name, value) in &self.strings {
			object.insert(name.clone(), Value::String(value.clone()));
		}
		for (name, value) in &self.sensitive {
			let rendered = if reveal_sensitive {
				value.expose().clone()
			} else {
				REDACTED.to_string()
			};
			object.insert(name.clone(), Value::String(rendered));
		}

		Value::Object(object)
	}
}

impl OutputSink for DataSourceState {
	fn set_string(&mut self, name: &str, value: &str) {
		self.strings.insert(name.to_string(), value.to_string());
	}

	fn set_sensitive(&mut self, name: &str, value: &SecretString) {
		self.sensitive.insert(name.to_string(), value.clone());
	}

	fn set_id(&mut self, id: String) {
		self.id = Some(id);
	}
}
