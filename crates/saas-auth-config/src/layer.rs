// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer merged across sources.

use serde::Deserialize;

use crate::sections::{AuthzConfigLayer, LoggingConfigLayer};

/// One source's view of the configuration. Every section is optional so a
/// source only overrides what it actually sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthzCliConfigLayer {
	#[serde(default)]
	pub authz: Option<AuthzConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl AuthzCliConfigLayer {
	/// Merge a higher-precedence layer into this one.
	pub fn merge(&mut self, other: AuthzCliConfigLayer) {
		merge_option(&mut self.authz, other.authz, AuthzConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T>(base: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(b), Some(o)) => merge(b, o),
		(None, Some(o)) => *base = Some(o),
		(_, None) => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sections::LogFormat;

	#[test]
	fn test_merge_fills_missing_sections() {
		let mut base = AuthzCliConfigLayer::default();
		base.merge(AuthzCliConfigLayer {
			authz: Some(AuthzConfigLayer {
				strict_actions: Some(true),
				audit_decisions: None,
			}),
			logging: None,
		});
		assert_eq!(base.authz.unwrap().strict_actions, Some(true));
		assert!(base.logging.is_none());
	}

	#[test]
	fn test_merge_combines_fields_within_section() {
		let mut base: AuthzCliConfigLayer = toml::from_str(
			r#"
			[logging]
			level = "debug"
			format = "json"
			"#,
		)
		.unwrap();
		base.merge(AuthzCliConfigLayer {
			authz: None,
			logging: Some(LoggingConfigLayer {
				level: Some("trace".to_string()),
				format: None,
			}),
		});
		let logging = base.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("trace"));
		assert_eq!(logging.format, Some(LogFormat::Json));
	}

	#[test]
	fn test_empty_toml_is_empty_layer() {
		let layer: AuthzCliConfigLayer = toml::from_str("").unwrap();
		assert!(layer.authz.is_none());
		assert!(layer.logging.is_none());
	}
}
