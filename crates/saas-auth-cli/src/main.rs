// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator tool for inspecting the authorization policy and checking
//! individual decisions.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use saas_auth::abac::Action;
use saas_auth::Role;
use saas_auth_config::{LogFormat, LoggingConfig, TomlSource};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

mod commands;

use commands::{CheckRequest, SubjectArgs};

#[derive(Parser, Debug)]
#[command(name = "saas-authz", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Print machine-readable JSON instead of text
	#[arg(long, global = true)]
	json: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show the registry entry for a subject kind, or all of them
	Describe {
		/// Subject kind (User, Organization, Project, Invite, Billing)
		kind: Option<String>,
	},

	/// List the grants of the built-in policy table
	Grants {
		/// Only show grants of this role
		#[arg(long)]
		role: Option<Role>,
	},

	/// Evaluate one permission question; exits 1 on deny
	Check {
		/// Role of the acting membership
		#[arg(long)]
		role: Role,

		/// Action to check (manage, get, create, update, delete, transfer, invite)
		#[arg(long)]
		action: Action,

		/// Subject kind
		#[arg(long)]
		subject: String,

		/// User id of the actor
		#[arg(long)]
		actor: Uuid,

		/// Organization the actor's membership belongs to
		#[arg(long)]
		member_org: Option<Uuid>,

		/// Subject id
		#[arg(long)]
		id: Option<Uuid>,

		/// Subject owner
		#[arg(long)]
		owner: Option<Uuid>,

		/// Organization the subject belongs to
		#[arg(long)]
		org: Option<Uuid>,

		/// Invite author
		#[arg(long)]
		author: Option<Uuid>,
	},
}

fn main() -> ExitCode {
	match run(Args::parse()) {
		Ok(code) => code,
		Err(err) => {
			eprintln!("error: {err:#}");
			ExitCode::from(2)
		}
	}
}

fn run(args: Args) -> Result<ExitCode> {
	let config = match &args.config {
		Some(path) => saas_auth_config::load_config_with_file(path),
		None => saas_auth_config::load_config(),
	}
	.context("failed to load configuration")?;

	// The subscriber depends on the loaded config, so loading itself is not
	// traced. Report what it resolved to instead.
	init_tracing(&config.logging);
	tracing::debug!(
		file = %config_file(args.config.as_deref()),
		strict_actions = config.authz.strict_actions,
		audit_decisions = config.authz.audit_decisions,
		log_level = %config.logging.level,
		log_format = %config.logging.format,
		"configuration loaded"
	);

	match args.command {
		Command::Describe { kind } => {
			println!("{}", commands::describe_kinds(kind.as_deref(), args.json)?);
			Ok(ExitCode::SUCCESS)
		}
		Command::Grants { role } => {
			println!("{}", commands::list_grants(role, args.json)?);
			Ok(ExitCode::SUCCESS)
		}
		Command::Check {
			role,
			action,
			subject,
			actor,
			member_org,
			id,
			owner,
			org,
			author,
		} => {
			let request = CheckRequest {
				role,
				action,
				kind: subject,
				actor,
				member_org,
				subject: SubjectArgs {
					id,
					owner,
					organization: org,
					author,
				},
			};
			let report = commands::check(&request, &config.authz)?;
			if args.json {
				println!("{}", serde_json::to_string_pretty(&report)?);
			} else {
				println!("{}", report.render());
			}
			Ok(if report.allowed {
				ExitCode::SUCCESS
			} else {
				ExitCode::from(1)
			})
		}
	}
}

/// The config file consulted: the `--config` path, else the per-user default.
fn config_file(explicit: Option<&Path>) -> String {
	match explicit {
		Some(path) => path.display().to_string(),
		None => TomlSource::user()
			.map(|source| source.path().display().to_string())
			.unwrap_or_else(|| "none".to_string()),
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}
