// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Classification of raw password API responses.
//!
//! Checks run in a fixed order and the first match wins:
//!
//! | # | Check                                   | Outcome                   |
//! |---|-----------------------------------------|---------------------------|
//! | 1 | transport error                         | `TransportError`          |
//! | 2 | body is the bare permission string      | `AccessDenied`            |
//! | 3 | body is not a JSON object               | `MalformedResponse`       |
//! | 4 | `code == 2`, passphrase `msg`           | `PassphraseNotConfigured` |
//! | 5 | `code == 0`, empty `msg`                | `NoSecretsStored`         |
//! | 6 | `total_count == 0`                      | `NotFound`                |
//! | 7 | `Passwords` list of 0 / 1 / many        | `NotFound` / `Found` / `MultipleMatches` |
//! | 8 | anything else                           | `MalformedResponse`       |

use serde_json::{Map, Value};

use crate::error::RequestError;
use crate::outcome::ClassificationOutcome;
use crate::record::SecretRecord;

/// Body Device42 sends instead of JSON when the user lacks view permission.
pub const ACCESS_DENIED_BODY: &str = "\"You don't have permissions to access this resource\"";

pub const NO_PASSPHRASE_CODE: i64 = 2;
pub const NO_PASSPHRASE_MSG: &str =
	"Please enter passphrase first. Go to Tools > Settings > Password Security";

pub const NO_SECRETS_CODE: i64 = 0;

const PASSWORDS_KEY: &str = "Passwords";
const TOTAL_COUNT_KEY: &str = "total_count";

/// Classify one password API response.
///
/// Pure: never fails and never performs I/O. `transport_error` is the error
/// from issuing the request, if any; `body` is ignored when it is set.
pub fn classify(transport_error: Option<&RequestError>, body: &[u8]) -> ClassificationOutcome {
	if let Some(err) = transport_error {
		return ClassificationOutcome::TransportError(err.to_string());
	}

	if is_access_denied(body) {
		return ClassificationOutcome::AccessDenied;
	}

	let object = match serde_json::from_slice::<Value>(body) {
		Ok(Value::Object(object)) => object,
		_ => return ClassificationOutcome::MalformedResponse,
	};

	classify_object(&object)
}

fn is_access_denied(body: &[u8]) -> bool {
	std::str::from_utf8(body)
		.map(|text| text.trim() == ACCESS_DENIED_BODY)
		.unwrap_or(false)
}

fn classify_object(object: &Map<String, Value>) -> ClassificationOutcome {
	let code = object.get("code").and_then(as_integer);
	let msg = object.get("msg").and_then(Value::as_str);

	match (code, msg) {
		(Some(NO_PASSPHRASE_CODE), Some(NO_PASSPHRASE_MSG)) => {
			return ClassificationOutcome::PassphraseNotConfigured;
		}
		(Some(NO_SECRETS_CODE), Some("")) => return ClassificationOutcome::NoSecretsStored,
		_ => {}
	}

	if object.get(TOTAL_COUNT_KEY).and_then(as_integer) == Some(0) {
		return ClassificationOutcome::NotFound;
	}

	match object.get(PASSWORDS_KEY) {
		Some(Value::Array(entries)) => classify_entries(entries),
		_ => ClassificationOutcome::MalformedResponse,
	}
}

fn classify_entries(entries: &[Value]) -> ClassificationOutcome {
	let Some(first) = entries.first() else {
		return ClassificationOutcome::NotFound;
	};

	let Some(record) = SecretRecord::from_entry(first) else {
		return ClassificationOutcome::MalformedResponse;
	};

	if entries.len() == 1 {
		ClassificationOutcome::Found(record)
	} else {
		ClassificationOutcome::MultipleMatches(record)
	}
}

/// Device42 is inconsistent about numeric fields; `code` and `total_count`
/// arrive as numbers or as numeric strings depending on the endpoint version.
fn as_integer(value: &Value) -> Option<i64> {
	match value {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn classify_json(body: Value) -> ClassificationOutcome {
		classify(None, body.to_string().as_bytes())
	}

	#[test]
	fn single_entry_is_found() {
		let outcome = classify(
			None,
			br#"{"Passwords": [{"id": 1, "username": "validUsername", "password": "validPassword", "label": "validLabel"}]}"#,
		);

		let ClassificationOutcome::Found(record) = outcome else {
			panic!("expected Found, got {outcome:?}");
		};
		assert_eq!(record.id, 1);
		assert_eq!(record.username, "validUsername");
		assert_eq!(record.password.expose(), "validPassword");
		assert_eq!(record.label, "validLabel");
	}

	#[test]
	fn missing_label_and_username_decode_empty() {
		let outcome = classify_json(json!({"Passwords": [{"id": 3, "password": "password"}]}));
		let record = outcome.record().expect("record");
		assert_eq!(record.label, "");
		assert_eq!(record.username, "");
		assert!(matches!(outcome, ClassificationOutcome::Found(_)));
	}

	#[test]
	fn multiple_entries_keep_the_first() {
		let outcome = classify_json(json!({"Passwords": [
			{"id": 1, "username": "a", "password": "p", "label": ""},
			{"id": 2, "username": "b", "password": "q", "label": ""}
		]}));

		let ClassificationOutcome::MultipleMatches(record) = outcome else {
			panic!("expected MultipleMatches, got {outcome:?}");
		};
		assert_eq!(record.id, 1);
		assert_eq!(record.username, "a");
	}

	#[test]
	fn empty_list_is_not_found() {
		assert_eq!(
			classify_json(json!({"Passwords": []})),
			ClassificationOutcome::NotFound
		);
		assert_eq!(
			classify_json(json!({"Passwords": [], "total_count": 5})),
			ClassificationOutcome::NotFound
		);
	}

	#[test]
	fn zero_total_count_is_not_found_without_list() {
		assert_eq!(
			classify_json(json!({"total_count": 0})),
			ClassificationOutcome::NotFound
		);
		assert_eq!(
			classify_json(json!({"total_count": "0"})),
			ClassificationOutcome::NotFound
		);
	}

	#[test]
	fn zero_total_count_wins_over_entries() {
		let outcome = classify_json(json!({
			"total_count": 0,
			"Passwords": [{"id": 1, "password": "p"}]
		}));
		assert_eq!(outcome, ClassificationOutcome::NotFound);
	}

	#[test]
	fn nonzero_total_count_falls_through_to_list() {
		let outcome = classify_json(json!({
			"total_count": 1,
			"Passwords": [{"id": 9, "password": "p"}]
		}));
		assert_eq!(outcome.record().map(|r| r.id), Some(9));
	}

	#[test]
	fn permission_string_is_access_denied() {
		assert_eq!(
			classify(None, b"\"You don't have permissions to access this resource\""),
			ClassificationOutcome::AccessDenied
		);
		assert_eq!(
			classify(
				None,
				b"\"You don't have permissions to access this resource\"\n"
			),
			ClassificationOutcome::AccessDenied
		);
	}

	#[test]
	fn other_bare_strings_are_malformed() {
		assert_eq!(
			classify(None, b"\"Something else\""),
			ClassificationOutcome::MalformedResponse
		);
		assert_eq!(
			classify(None, b"You don't have permissions to access this resource"),
			ClassificationOutcome::MalformedResponse
		);
	}

	#[test]
	fn passphrase_sentinel() {
		let outcome = classify(
			None,
			br#"{"msg": "Please enter passphrase first. Go to Tools > Settings > Password Security", "code": 2}"#,
		);
		assert_eq!(outcome, ClassificationOutcome::PassphraseNotConfigured);

		let stringly = classify_json(json!({"msg": NO_PASSPHRASE_MSG, "code": "2"}));
		assert_eq!(stringly, ClassificationOutcome::PassphraseNotConfigured);
	}

	#[test]
	fn passphrase_code_with_other_message_is_malformed() {
		let outcome = classify_json(json!({"msg": "something else", "code": 2}));
		assert_eq!(outcome, ClassificationOutcome::MalformedResponse);
	}

	#[test]
	fn empty_store_sentinel() {
		assert_eq!(
			classify(None, br#"{"msg": "", "code": 0}"#),
			ClassificationOutcome::NoSecretsStored
		);
	}

	#[test]
	fn code_zero_with_list_message_is_not_empty_store() {
		// Shape of a successful POST, which must not read as an empty store.
		let outcome = classify_json(json!({
			"msg": ["Password added with username testcli (and label )", 2, "testcli", true, true],
			"code": 0
		}));
		assert_eq!(outcome, ClassificationOutcome::MalformedResponse);
	}

	#[test]
	fn sentinels_take_precedence_over_list() {
		let outcome = classify_json(json!({"msg": "", "code": 0, "Passwords": []}));
		assert_eq!(outcome, ClassificationOutcome::NoSecretsStored);
	}

	#[test]
	fn non_json_bodies_are_malformed() {
		let bodies: [&[u8]; 6] = [
			b"<html><body>502 Bad Gateway</body></html>",
			b"{\"Passwords\": [{\"id\": 1",
			b"",
			b"[1, 2, 3]",
			b"null",
			b"\xff\xfe\x00",
		];
		for body in bodies {
			assert_eq!(
				classify(None, body),
				ClassificationOutcome::MalformedResponse,
				"body {:?}",
				String::from_utf8_lossy(body)
			);
		}
	}

	#[test]
	fn unknown_object_shape_is_malformed() {
		assert_eq!(
			classify_json(json!({"detail": "Not found."})),
			ClassificationOutcome::MalformedResponse
		);
		assert_eq!(
			classify_json(json!({"Passwords": "nope"})),
			ClassificationOutcome::MalformedResponse
		);
	}

	#[test]
	fn undecodable_first_entry_is_malformed() {
		assert_eq!(
			classify_json(json!({"Passwords": [{"username": "no id"}]})),
			ClassificationOutcome::MalformedResponse
		);
	}

	#[test]
	fn transport_error_ignores_body() {
		let outcome = classify(
			Some(&RequestError::Timeout),
			br#"{"Passwords": [{"id": 1, "password": "p"}]}"#,
		);
		assert_eq!(
			outcome,
			ClassificationOutcome::TransportError("request to Device42 timed out".to_string())
		);
	}

	proptest! {
		#[test]
		fn single_entry_round_trips_fields(
			id in 0i64..i64::MAX,
			username in ".{0,32}",
			password in ".{0,32}",
			label in ".{0,32}",
		) {
			let body = json!({"Passwords": [{
				"id": id,
				"username": username,
				"password": password,
				"label": label,
			}]});
			let outcome = classify_json(body);
			let ClassificationOutcome::Found(record) = outcome else {
				return Err(TestCaseError::fail(format!("expected Found, got {outcome:?}")));
			};
			prop_assert_eq!(record.id, id);
			prop_assert_eq!(record.username, username);
			prop_assert_eq!(record.password.expose(), &password);
			prop_assert_eq!(record.label, label);
		}

		#[test]
		fn empty_list_is_not_found_for_any_total_count(total in proptest::option::of(0i64..1000)) {
			let mut body = json!({"Passwords": []});
			if let Some(total) = total {
				body["total_count"] = json!(total);
			}
			prop_assert_eq!(classify_json(body), ClassificationOutcome::NotFound);
		}

		#[test]
		fn unparseable_bytes_are_malformed(body in proptest::collection::vec(any::<u8>(), 0..128)) {
			prop_assume!(serde_json::from_slice::<Value>(&body).is_err());
			prop_assert_eq!(classify(None, &body), ClassificationOutcome::MalformedResponse);
		}
	}
}
