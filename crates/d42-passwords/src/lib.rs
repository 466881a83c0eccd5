// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the Device42 password API.
//!
//! The Device42 `/api/1.0/passwords/` endpoint answers a lookup by id with
//! several unrelated shapes: a `Passwords` list, a `code`/`msg` object, a
//! `total_count` of zero, or a bare JSON string when permission is denied.
//! This crate turns each response into exactly one [`ClassificationOutcome`]:
//!
//! 1. [`PasswordTransport`] issues the GET request ([`ReqwestTransport`] in production)
//! 2. [`classify`] inspects the transport result and body
//! 3. [`apply_to_output`] copies a found [`SecretRecord`] into an [`OutputSink`]
//!
//! # Example
//!
//! ```ignore
//! use d42_passwords::{PasswordsClient, ReqwestTransport};
//!
//! let transport = ReqwestTransport::new(base_url, "admin", password, options)?;
//! let client = PasswordsClient::new(transport);
//!
//! match client.read_secret(42).await {
//!     outcome if outcome.is_fatal() => eprintln!("{}", outcome.summary()),
//!     outcome => println!("{:?}", outcome.record()),
//! }
//! ```

mod classify;
mod client;
mod error;
mod mapper;
mod outcome;
mod record;
mod transport;

pub use classify::{
	classify, ACCESS_DENIED_BODY, NO_PASSPHRASE_CODE, NO_PASSPHRASE_MSG, NO_SECRETS_CODE,
};
pub use client::PasswordsClient;
pub use d42_common_secret::SecretString;
pub use error::RequestError;
pub use mapper::{apply_to_output, OutputSink, ATTR_LABEL, ATTR_PASSWORD, ATTR_USERNAME};
pub use outcome::{ClassificationOutcome, OutcomeDescriptor, Severity};
pub use record::SecretRecord;
pub use transport::{PasswordTransport, RawApiResponse, ReqwestTransport, PASSWORDS_PATH};
