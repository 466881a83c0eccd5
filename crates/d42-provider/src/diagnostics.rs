// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Terraform-style diagnostics.

use d42_passwords::{ClassificationOutcome, Severity};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
	Error,
	Warning,
}

impl From<Severity> for DiagnosticSeverity {
	fn from(severity: Severity) -> Self {
		match severity {
			Severity::Error => DiagnosticSeverity::Error,
			Severity::Warning => DiagnosticSeverity::Warning,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	pub severity: DiagnosticSeverity,
	pub summary: String,
	#[serde(skip_serializing_if = "String::is_empty")]
	pub detail: String,
	/// Attribute the diagnostic refers to, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub attribute: Option<String>,
}

impl Diagnostic {
	pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
		Self {
			severity: DiagnosticSeverity::Error,
			summary: summary.into(),
			detail: detail.into(),
			attribute: None,
		}
	}

	pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
		Self {
			severity: DiagnosticSeverity::Warning,
			..Self::error(summary, detail)
		}
	}

	pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
		self.attribute = Some(attribute.into());
		self
	}

	/// Diagnostic for a classification outcome. `Found` has none.
	///
	/// Transport errors append the underlying error to the fixed detail text.
	pub fn from_outcome(outcome: &ClassificationOutcome) -> Option<Self> {
		let descriptor = outcome.descriptor()?;
		let detail = match outcome {
			ClassificationOutcome::TransportError(cause) => {
				format!("{} Cause: {cause}", descriptor.detail)
			}
			_ => descriptor.detail.to_string(),
		};

		Some(Self {
			severity: descriptor.severity.into(),
			summary: descriptor.summary.to_string(),
			detail,
			attribute: None,
		})
	}
}

/// Ordered collection of diagnostics from one provider operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, diagnostic: Diagnostic) {
		self.0.push(diagnostic);
	}

	pub fn has_errors(&self) -> bool {
		self.0
			.iter()
			.any(|d| d.severity == DiagnosticSeverity::Error)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
		self.0.iter()
	}
}

impl From<Diagnostic> for Diagnostics {
	fn from(diagnostic: Diagnostic) -> Self {
		Self(vec![diagnostic])
	}
}
