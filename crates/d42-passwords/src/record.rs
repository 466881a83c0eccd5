// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A single password entry returned by Device42.

use d42_common_secret::SecretString;
use serde::Deserialize;
use serde_json::Value;

/// One credential from the Device42 password store.
///
/// Built from a single API response and dropped once copied into output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
	pub id: i64,
	pub username: String,
	pub password: SecretString,
	pub label: String,
}

/// Wire shape of one `Passwords` element. Only the fields the data source
/// exposes are read; Device42 also returns category, notes, view/edit ACLs etc.
#[derive(Debug, Deserialize)]
struct PasswordEntry {
	id: EntryId,
	#[serde(default)]
	username: Option<String>,
	#[serde(default)]
	password: Option<String>,
	#[serde(default)]
	label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntryId {
	Number(i64),
	Text(String),
}

impl EntryId {
	fn as_i64(&self) -> Option<i64> {
		match self {
			EntryId::Number(n) => Some(*n),
			EntryId::Text(s) => s.trim().parse().ok(),
		}
	}
}

impl SecretRecord {
	/// Decode one `Passwords` element.
	///
	/// Missing or null `username`, `password` and `label` become empty strings.
	/// Returns `None` when the element is not an object or has no usable `id`.
	pub(crate) fn from_entry(entry: &Value) -> Option<Self> {
		let entry = PasswordEntry::deserialize(entry).ok()?;
		Some(SecretRecord {
			id: entry.id.as_i64()?,
			username: entry.username.unwrap_or_default(),
			password: SecretString::new(entry.password.unwrap_or_default()),
			label: entry.label.unwrap_or_default(),
		})
	}

	/// The id as Terraform stores it: canonical decimal.
	pub fn id_string(&self) -> String {
		self.id.to_string()
	}
}
