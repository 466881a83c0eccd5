// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Environment variable helpers.
//!
//! Secrets follow the `VAR` / `VAR_FILE` convention so the Device42 password
//! can come from a mounted secret file instead of the process environment.

use std::path::PathBuf;
use std::{env, fs};

use d42_common_secret::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Reads a non-empty environment variable.
pub fn env_var(name: &str) -> Option<String> {
	env::var(name).ok().filter(|s| !s.is_empty())
}

/// Reads a boolean flag. `true` (any case) and `1` are truthy, anything else is false.
pub fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

/// Load a secret from `{var}_FILE` if set, otherwise from `{var}`.
///
/// A single trailing newline is stripped from file content.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|e| SecretEnvError::Io {
			path: path.clone(),
			source: e,
		})?;

		let secret = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(secret)));
	}

	Ok(env_var(var).map(SecretString::new))
}
