// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The `device42_password` data source.

use d42_passwords::{apply_to_output, PasswordTransport, PasswordsClient};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::schema::ATTR_ID;
use crate::state::DataSourceState;

/// Result of one data source read.
///
/// `state` is `None` whenever `diagnostics` contains an error.
#[derive(Debug, Clone, Default)]
pub struct ReadResult {
	pub state: Option<DataSourceState>,
	pub diagnostics: Diagnostics,
}

impl ReadResult {
	fn failed(diagnostic: Diagnostic) -> Self {
		Self {
			state: None,
			diagnostics: diagnostic.into(),
		}
	}
}

/// Extract the secret id from the data source configuration.
///
/// Terraform numbers may arrive as JSON integers or as decimal strings.
pub fn parse_id(config: &Value) -> Result<i64, Diagnostic> {
	let invalid = |detail: String| {
		Diagnostic::error("Invalid secret id", detail).with_attribute(ATTR_ID)
	};

	match config.get(ATTR_ID) {
		None | Some(Value::Null) => Err(Diagnostic::error(
			"Missing required argument",
			format!("The argument \"{ATTR_ID}\" is required, but no definition was found."),
		)
		.with_attribute(ATTR_ID)),
		Some(Value::Number(n)) => n
			.as_i64()
			.ok_or_else(|| invalid(format!("{n} is not a whole number."))),
		Some(Value::String(s)) => s
			.trim()
			.parse::<i64>()
			.map_err(|_| invalid(format!("\"{s}\" is not a whole number."))),
		Some(other) => Err(invalid(format!("Expected a number, got {other}."))),
	}
}

/// Read one secret and turn the outcome into diagnostics and state.
///
/// Fatal outcomes produce a single error diagnostic and no state. Multiple
/// matches produce a warning and the state of the first match.
#[instrument(skip(client, config))]
pub async fn read_password<T>(client: &PasswordsClient<T>, config: &Value) -> ReadResult
where
	T: PasswordTransport,
{
	let id = match parse_id(config) {
		Ok(id) => id,
		Err(diagnostic) => return ReadResult::failed(diagnostic),
	};

	let outcome = client.read_secret(id).await;
	let mut result = ReadResult::default();

	if let Some(diagnostic) = Diagnostic::from_outcome(&outcome) {
		result.diagnostics.push(diagnostic);
	}
	if outcome.is_fatal() {
		debug!(id, outcome = outcome.kind(), "Skipping state for failed read");
		return result;
	}

	if let Some(record) = outcome.record() {
		let mut state = DataSourceState::new();
		apply_to_output(record, &mut state);
		result.state = Some(state);
	}

	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use d42_passwords::{RawApiResponse, RequestError};
	use serde_json::json;

	use crate::diagnostics::DiagnosticSeverity;

	struct Canned(&'static str);

	#[async_trait]
	impl PasswordTransport for Canned {
		async fn get_password(&self, _id: i64) -> Result<RawApiResponse, RequestError> {
			Ok(RawApiResponse {
				status: reqwest::StatusCode::OK,
				body: self.0.as_bytes().to_vec(),
			})
		}
	}

	struct TimesOut;

	#[async_trait]
	impl PasswordTransport for TimesOut {
		async fn get_password(&self, _id: i64) -> Result<RawApiResponse, RequestError> {
			Err(RequestError::Timeout)
		}
	}

	fn client(body: &'static str) -> PasswordsClient<Canned> {
		PasswordsClient::new(Canned(body))
	}

	#[test]
	fn parse_id_accepts_numbers_and_numeric_strings() {
		assert_eq!(parse_id(&json!({"id": 2})).unwrap(), 2);
		assert_eq!(parse_id(&json!({"id": "42"})).unwrap(), 42);
	}

	#[test]
	fn parse_id_rejects_missing_and_garbage() {
		for config in [json!({}), json!({"id": null}), json!({"id": "abc"}), json!({"id": 1.5}), json!({"id": true})] {
			let diag = parse_id(&config).unwrap_err();
			assert_eq!(diag.severity, DiagnosticSeverity::Error);
			assert_eq!(diag.attribute.as_deref(), Some("id"), "{config}");
		}
	}

	#[tokio::test]
	async fn found_populates_state_without_diagnostics() {
		let result = read_password(
			&client(r#"{"Passwords": [{"id": 2, "username": "root", "password": "password", "label": "test_label"}]}"#),
			&json!({"id": 2}),
		)
		.await;

		assert!(result.diagnostics.is_empty());
		let state = result.state.unwrap();
		assert_eq!(state.id(), Some("2"));
		assert_eq!(state.get_string("username"), Some("root"));
		assert_eq!(state.get_string("label"), Some("test_label"));
	}

	#[tokio::test]
	async fn multiple_matches_warn_and_use_first() {
		let result = read_password(
			&client(r#"{"Passwords": [{"id": 1, "username": "a"}, {"id": 2, "username": "b"}]}"#),
			&json!({"id": 1}),
		)
		.await;

		assert_eq!(result.diagnostics.len(), 1);
		assert!(!result.diagnostics.has_errors());
		assert_eq!(result.state.unwrap().id(), Some("1"));
	}

	#[tokio::test]
	async fn access_denied_skips_state() {
		let result = read_password(
			&client(r#""You don't have permissions to access this resource""#),
			&json!({"id": 1}),
		)
		.await;

		assert!(result.state.is_none());
		assert!(result.diagnostics.has_errors());
		assert_eq!(result.diagnostics.iter().next().unwrap().summary, "Access Denied");
	}

	#[tokio::test]
	async fn not_found_skips_state() {
		let result = read_password(&client(r#"{"total_count": 0}"#), &json!({"id": 9})).await;

		assert!(result.state.is_none());
		assert_eq!(result.diagnostics.len(), 1);
		assert!(result.diagnostics.has_errors());
	}

	#[tokio::test]
	async fn transport_error_is_a_single_error_diagnostic() {
		let result = read_password(&PasswordsClient::new(TimesOut), &json!({"id": 1})).await;

		assert!(result.state.is_none());
		assert_eq!(result.diagnostics.len(), 1);
		assert!(result.diagnostics.has_errors());
	}

	#[tokio::test]
	async fn bad_id_never_reaches_transport() {
		let result = read_password(&PasswordsClient::new(TimesOut), &json!({"id": "x"})).await;

		assert!(result.state.is_none());
		assert_eq!(result.diagnostics.iter().next().unwrap().summary, "Invalid secret id");
	}

	proptest::proptest! {
		#[test]
		fn parse_id_round_trips_any_integer(id in proptest::prelude::any::<i64>()) {
			proptest::prop_assert_eq!(parse_id(&json!({"id": id})).unwrap(), id);
			proptest::prop_assert_eq!(parse_id(&json!({"id": id.to_string()})).unwrap(), id);
		}
	}
}
