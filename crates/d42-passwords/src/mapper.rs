// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Copies a [`SecretRecord`] into the caller's output record.

use d42_common_secret::SecretString;

use crate::record::SecretRecord;

pub const ATTR_USERNAME: &str = "username";
pub const ATTR_PASSWORD: &str = "password";
pub const ATTR_LABEL: &str = "label";

/// Destination for a read secret, typically the data source state.
pub trait OutputSink {
	fn set_string(&mut self, name: &str, value: &str);
	fn set_sensitive(&mut self, name: &str, value: &SecretString);
	/// Identity key of the output record.
	fn set_id(&mut self, id: String);
}

/// Copy `record` into `sink` verbatim. Applying the same record twice leaves
/// the sink unchanged.
pub fn apply_to_output<S>(record: &SecretRecord, sink: &mut S)
where
	S: OutputSink + ?Sized,
{
	sink.set_string(ATTR_USERNAME, &record.username);
	sink.set_sensitive(ATTR_PASSWORD, &record.password);
	sink.set_string(ATTR_LABEL, &record.label);
	sink.set_id(record.id_string());
}
