// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider error types.

use thiserror::Error;

/// Failures of the provider plumbing itself. Password API outcomes are
/// reported as diagnostics, not as these errors.
#[derive(Debug, Error)]
pub enum ProviderError {
	#[error("unknown data source: {0}")]
	UnknownDataSource(String),

	#[error("provider has not been configured")]
	NotConfigured,

	#[error("invalid provider configuration block: {0}")]
	InvalidBlock(#[from] serde_json::Error),

	#[error(transparent)]
	Config(#[from] d42_config::ConfigError),

	#[error("failed to build Device42 client: {0}")]
	Client(#[from] d42_passwords::RequestError),

	#[error("invalid provider schema: {0}")]
	Schema(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
