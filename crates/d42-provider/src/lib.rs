// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Device42 provider boundary.
//!
//! Exposes the provider schema, provider configuration and the
//! `device42_password` data source. Read outcomes are reported as
//! Terraform-style [`Diagnostics`]; state is only produced when no error
//! diagnostic was raised.

pub mod data_source;
pub mod diagnostics;
pub mod error;
pub mod provider;
pub mod schema;
pub mod state;

pub use data_source::{parse_id, read_password, ReadResult};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use error::{ProviderError, Result};
pub use provider::Device42Provider;
pub use schema::{provider_schema, ProviderSchema, PASSWORD_DATA_SOURCE, PROVIDER_NAME};
pub use state::DataSourceState;
