// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization behaviour configuration.

use serde::Deserialize;

/// Authorization configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthzConfig {
	/// Report an action that does not apply to the subject kind as an error
	/// instead of a plain deny.
	pub strict_actions: bool,
	/// Log every decision at info level instead of debug.
	pub audit_decisions: bool,
}

/// Authorization configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthzConfigLayer {
	#[serde(default)]
	pub strict_actions: Option<bool>,
	#[serde(default)]
	pub audit_decisions: Option<bool>,
}

impl AuthzConfigLayer {
	pub fn merge(&mut self, other: AuthzConfigLayer) {
		if other.strict_actions.is_some() {
			self.strict_actions = other.strict_actions;
		}
		if other.audit_decisions.is_some() {
			self.audit_decisions = other.audit_decisions;
		}
	}

	pub fn finalize(self) -> AuthzConfig {
		AuthzConfig {
			strict_actions: self.strict_actions.unwrap_or(false),
			audit_decisions: self.audit_decisions.unwrap_or(false),
		}
	}
}
