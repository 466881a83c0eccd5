// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction for the Device42 provider.
//!
//! Every client carries the same `User-Agent` and, when requested, skips TLS
//! certificate verification for self-signed Device42 appliances.

mod client;

pub use client::{builder, user_agent, ClientOptions};
