// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, a TOML file and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::AuthzCliConfigLayer;
use crate::sections::{AuthzConfigLayer, LogFormat, LoggingConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<AuthzCliConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<AuthzCliConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(AuthzCliConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// `$XDG_CONFIG_HOME/saas/authz.toml`, or `None` when the platform has no
	/// config directory.
	pub fn user() -> Option<Self> {
		dirs::config_dir().map(|dir| Self::new(dir.join("saas").join("authz.toml")))
	}

	pub fn path(&self) -> &std::path::Path {
		&self.path
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<AuthzCliConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(AuthzCliConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: AuthzCliConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: SAAS_AUTHZ_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<AuthzCliConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from(|name| std::env::var(name).ok())
	}
}

fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<AuthzCliConfigLayer, ConfigError> {
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

	let authz = AuthzConfigLayer {
		strict_actions: parse_bool("SAAS_AUTHZ_STRICT_ACTIONS", var("SAAS_AUTHZ_STRICT_ACTIONS"))?,
		audit_decisions: parse_bool("SAAS_AUTHZ_AUDIT_DECISIONS", var("SAAS_AUTHZ_AUDIT_DECISIONS"))?,
	};

	let format = match var("SAAS_AUTHZ_LOG_FORMAT") {
		Some(v) => Some(v.parse::<LogFormat>().map_err(|message| ConfigError::InvalidValue {
			key: "SAAS_AUTHZ_LOG_FORMAT".to_string(),
			message,
		})?),
		None => None,
	};
	let logging = LoggingConfigLayer {
		level: var("SAAS_AUTHZ_LOG_LEVEL"),
		format,
	};

	Ok(AuthzCliConfigLayer {
		authz: Some(authz),
		logging: Some(logging),
	})
}

fn parse_bool(name: &str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
	match value {
		None => Ok(None),
		Some(v) => match v.to_ascii_lowercase().as_str() {
			"true" | "1" | "yes" => Ok(Some(true)),
			"false" | "0" | "no" => Ok(Some(false)),
			_ => Err(ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("invalid boolean value '{v}'"),
			}),
		},
	}
}
