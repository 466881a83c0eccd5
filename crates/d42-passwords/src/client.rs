// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `read_secret`: one request, one classification.

use tracing::{debug, instrument, warn};

use crate::classify::classify;
use crate::outcome::ClassificationOutcome;
use crate::transport::{PasswordTransport, ReqwestTransport};

/// Reads secrets by id through a [`PasswordTransport`].
#[derive(Debug, Clone)]
pub struct PasswordsClient<T = ReqwestTransport> {
	transport: T,
}

impl<T> PasswordsClient<T>
where
	T: PasswordTransport,
{
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	/// Fetch the secret with the given id and classify the response.
	///
	/// Never fails: every failure mode is a [`ClassificationOutcome`] variant.
	#[instrument(skip(self))]
	pub async fn read_secret(&self, id: i64) -> ClassificationOutcome {
		let outcome = match self.transport.get_password(id).await {
			Ok(response) => {
				debug!(status = %response.status, "Classifying password response");
				classify(None, &response.body)
			}
			Err(err) => classify(Some(&err), &[]),
		};

		match &outcome {
			ClassificationOutcome::MultipleMatches(record) => {
				warn!(
					id,
					used_id = record.id,
					"Device42 returned several secrets for a unique id, using the first"
				);
			}
			other => debug!(outcome = other.kind(), "Password response classified"),
		}

		outcome
	}
}
