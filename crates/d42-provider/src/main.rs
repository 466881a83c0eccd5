// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `terraform-provider-device42` command line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use d42_config::{
	ConfigSource, DefaultsSource, EnvSource, ProviderBlockSource, ProviderConfigLayer, TomlSource,
	DEFAULT_LOG_LEVEL,
};
use d42_provider::{provider_schema, Device42Provider, PASSWORD_DATA_SOURCE};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Device42 Terraform provider.
#[derive(Parser, Debug)]
#[command(
	name = "terraform-provider-device42",
	about = "Read secrets from the Device42 password store",
	version
)]
struct Args {
	/// TOML file with provider settings, applied below the D42_* environment
	#[arg(long, global = true, env = "D42_CONFIG_FILE")]
	config: Option<PathBuf>,

	/// Device42 host, overrides D42_HOSTNAME
	#[arg(long, global = true)]
	hostname: Option<String>,

	/// Skip TLS certificate verification
	#[arg(long, global = true)]
	insecure: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the provider schema as JSON
	Schema,

	/// Read one secret through the device42_password data source
	ReadPassword {
		/// Device42 secret id
		#[arg(long)]
		id: i64,

		/// Print the password instead of [REDACTED]
		#[arg(long)]
		show_password: bool,
	},
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	match args.command {
		Command::Schema => {
			let level = d42_config::env::env_var("D42_LOG_LEVEL")
				.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
			init_tracing(&level);

			let schema = provider_schema();
			schema.validate().context("provider schema is inconsistent")?;
			println!("{}", serde_json::to_string_pretty(&schema)?);
			Ok(ExitCode::SUCCESS)
		}
		Command::ReadPassword { id, show_password } => {
			let overrides = ProviderConfigLayer {
				hostname: args.hostname,
				insecure: args.insecure.then_some(true),
				..Default::default()
			};

			let mut sources: Vec<Box<dyn ConfigSource>> =
				vec![Box::new(DefaultsSource), Box::new(EnvSource::new())];
			if let Some(path) = args.config {
				sources.push(Box::new(TomlSource::new(path)));
			}
			sources.push(Box::new(ProviderBlockSource::new(overrides)));

			let config = d42_config::load_from_sources(sources)
				.context("failed to resolve Device42 provider configuration")?;
			init_tracing(&config.log_level);

			let mut provider: Device42Provider = Device42Provider::new()?;
			provider
				.configure_with(&config)
				.context("failed to configure the Device42 provider")?;

			let result = provider
				.read_data_source(PASSWORD_DATA_SOURCE, &json!({ "id": id }))
				.await?;

			let output = json!({
				"state": result.state.as_ref().map(|state| state.to_json(show_password)),
				"diagnostics": &result.diagnostics,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);

			if result.diagnostics.has_errors() {
				Ok(ExitCode::FAILURE)
			} else {
				Ok(ExitCode::SUCCESS)
			}
		}
	}
}

/// Logs go to stderr, stdout carries the command output.
fn init_tracing(default_level: &str) {
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}
