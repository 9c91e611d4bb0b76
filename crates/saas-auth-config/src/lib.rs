// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the authorization operator tooling.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Consistent environment variable naming (`SAAS_AUTHZ_*`)
//!
//! # Usage
//!
//! ```ignore
//! use saas_auth_config::load_config;
//!
//! let config = load_config()?;
//! println!("strict actions: {}", config.authz.strict_actions);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::AuthzCliConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::debug;

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthzCliConfig {
	pub authz: AuthzConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`SAAS_AUTHZ_*`)
/// 2. Config file (`$XDG_CONFIG_HOME/saas/authz.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<AuthzCliConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource), Box::new(EnvSource)];
	if let Some(file) = TomlSource::user() {
		sources.push(Box::new(file));
	}
	load_sources(sources)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<AuthzCliConfig, ConfigError> {
	load_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<AuthzCliConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = AuthzCliConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	Ok(finalize(merged))
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: AuthzCliConfigLayer) -> AuthzCliConfig {
	let authz = layer.authz.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	debug!(
		strict_actions = authz.strict_actions,
		audit_decisions = authz.audit_decisions,
		log_level = %logging.level,
		log_format = %logging.format,
		"configuration loaded"
	);

	AuthzCliConfig { authz, logging }
}
