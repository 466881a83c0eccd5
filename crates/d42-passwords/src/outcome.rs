// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Classification outcomes and the fixed diagnostic text attached to each.

use crate::record::SecretRecord;

/// How a caller should treat an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Error,
	Warning,
}

/// Immutable diagnostic text for one outcome kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeDescriptor {
	pub severity: Severity,
	pub summary: &'static str,
	pub detail: &'static str,
}

static TRANSPORT_ERROR: OutcomeDescriptor = OutcomeDescriptor {
	severity: Severity::Error,
	summary: "Request to Device42 failed",
	detail: "The HTTP request to the Device42 password API could not be completed (timeout, TLS or connection failure).",
};

static ACCESS_DENIED: OutcomeDescriptor = OutcomeDescriptor {
	severity: Severity::Error,
	summary: "Access Denied",
	detail: "This secret appears to exist, but you do not have view permission to it.",
};

static MALFORMED_RESPONSE: OutcomeDescriptor = OutcomeDescriptor {
	severity: Severity::Error,
	summary: "Unexpected response from Device42",
	detail: "The password API returned a body that is not one of the documented response shapes.",
};

static PASSPHRASE_NOT_CONFIGURED: OutcomeDescriptor = OutcomeDescriptor {
	severity: Severity::Error,
	summary: "Device42 passphrase is not configured",
	detail: "Secrets cannot be read until a passphrase is set in Device42 under Tools > Settings > Password Security.",
};

static NO_SECRETS_STORED: OutcomeDescriptor = OutcomeDescriptor {
	severity: Severity::Error,
	summary: "No secrets are stored in Device42",
	detail: "The Device42 password store is empty. Add the secret in Device42 before reading it.",
};

static NOT_FOUND: OutcomeDescriptor = OutcomeDescriptor {
	severity: Severity::Error,
	summary: "No secret was found",
	detail: "No secret exists in your Device42 instance with that ID.",
};

static MULTIPLE_MATCHES: OutcomeDescriptor = OutcomeDescriptor {
	severity: Severity::Warning,
	summary: "Multiple secrets returned",
	detail: "Device42 returned more than one secret for a unique ID. The first entry was used.",
};

/// Result of classifying one password API response. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
	Found(SecretRecord),
	NotFound,
	AccessDenied,
	PassphraseNotConfigured,
	NoSecretsStored,
	/// More than one entry came back; carries the first one.
	MultipleMatches(SecretRecord),
	MalformedResponse,
	/// Carries the transport error message for diagnostics.
	TransportError(String),
}

impl ClassificationOutcome {
	/// Diagnostic text for this outcome. `Found` produces no diagnostic.
	pub fn descriptor(&self) -> Option<&'static OutcomeDescriptor> {
		match self {
			ClassificationOutcome::Found(_) => None,
			ClassificationOutcome::NotFound => Some(&NOT_FOUND),
			ClassificationOutcome::AccessDenied => Some(&ACCESS_DENIED),
			ClassificationOutcome::PassphraseNotConfigured => Some(&PASSPHRASE_NOT_CONFIGURED),
			ClassificationOutcome::NoSecretsStored => Some(&NO_SECRETS_STORED),
			ClassificationOutcome::MultipleMatches(_) => Some(&MULTIPLE_MATCHES),
			ClassificationOutcome::MalformedResponse => Some(&MALFORMED_RESPONSE),
			ClassificationOutcome::TransportError(_) => Some(&TRANSPORT_ERROR),
		}
	}

	pub fn summary(&self) -> &'static str {
		self.descriptor().map(|d| d.summary).unwrap_or("Secret found")
	}

	/// True when the read must stop without producing state.
	pub fn is_fatal(&self) -> bool {
		matches!(
			self.descriptor(),
			Some(OutcomeDescriptor {
				severity: Severity::Error,
				..
			})
		)
	}

	/// The record to publish, if any. `MultipleMatches` yields its first entry.
	pub fn record(&self) -> Option<&SecretRecord> {
		match self {
			ClassificationOutcome::Found(record) | ClassificationOutcome::MultipleMatches(record) => {
				Some(record)
			}
			_ => None,
		}
	}

	/// Short machine-friendly name, used as a log field.
	pub fn kind(&self) -> &'static str {
		match self {
			ClassificationOutcome::Found(_) => "found",
			ClassificationOutcome::NotFound => "not_found",
			ClassificationOutcome::AccessDenied => "access_denied",
			ClassificationOutcome::PassphraseNotConfigured => "passphrase_not_configured",
			ClassificationOutcome::NoSecretsStored => "no_secrets_stored",
			ClassificationOutcome::MultipleMatches(_) => "multiple_matches",
			ClassificationOutcome::MalformedResponse => "malformed_response",
			ClassificationOutcome::TransportError(_) => "transport_error",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use d42_common_secret::SecretString;

	fn record() -> SecretRecord {
		SecretRecord {
			id: 1,
			username: "a".to_string(),
			password: SecretString::from("p"),
			label: String::new(),
		}
	}

	#[test]
	fn only_found_and_multiple_matches_are_non_fatal() {
		let fatal = [
			ClassificationOutcome::NotFound,
			ClassificationOutcome::AccessDenied,
			ClassificationOutcome::PassphraseNotConfigured,
			ClassificationOutcome::NoSecretsStored,
			ClassificationOutcome::MalformedResponse,
			ClassificationOutcome::TransportError("timeout".to_string()),
		];
		for outcome in fatal {
			assert!(outcome.is_fatal(), "{} should be fatal", outcome.kind());
			assert!(outcome.record().is_none());
		}

		assert!(!ClassificationOutcome::Found(record()).is_fatal());
		assert!(!ClassificationOutcome::MultipleMatches(record()).is_fatal());
	}

	#[test]
	fn multiple_matches_is_a_warning_with_record() {
		let outcome = ClassificationOutcome::MultipleMatches(record());
		assert_eq!(outcome.descriptor().unwrap().severity, Severity::Warning);
		assert_eq!(outcome.record().unwrap().id, 1);
	}

	#[test]
	fn found_has_no_descriptor() {
		assert!(ClassificationOutcome::Found(record()).descriptor().is_none());
	}

	#[test]
	fn passphrase_detail_points_at_settings_page() {
		let detail = ClassificationOutcome::PassphraseNotConfigured
			.descriptor()
			.unwrap()
			.detail;
		assert!(detail.contains("Tools > Settings > Password Security"));
	}
}
