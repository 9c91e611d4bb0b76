// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization error types.
//!
//! A deny decision is not an error: [`crate::Ability::can`] returns `false`.
//! These errors describe malformed input, an invalid policy definition, or a
//! deny that a route helper has turned into a rejection.

use thiserror::Error;

use crate::abac::{Action, Attribute, SubjectKind};

/// Errors raised by the authorization core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
	// =========================================================================
	// Malformed input
	// =========================================================================
	/// The role name is not declared.
	#[error("unknown role: {0}")]
	UnknownRole(String),

	/// The subject kind is not declared in the registry.
	#[error("unknown subject kind: {0}")]
	UnknownSubjectKind(String),

	/// The action verb is not declared.
	#[error("unknown action: {0}")]
	UnknownAction(String),

	/// The action exists but does not apply to the subject kind.
	#[error("action '{action}' is not valid for subject '{kind}'")]
	InvalidAction { action: Action, kind: SubjectKind },

	/// A record lacks an attribute the registry requires for its kind.
	#[error("subject '{kind}' is missing required attribute '{attribute}'")]
	MissingAttribute {
		kind: SubjectKind,
		attribute: Attribute,
	},

	/// The request cannot be carried out as asked.
	#[error("{0}")]
	BadRequest(String),

	// =========================================================================
	// Authorization
	// =========================================================================
	/// The policy denied the action.
	#[error("{0}")]
	Unauthorized(String),

	// =========================================================================
	// Policy definition
	// =========================================================================
	/// The policy definition is invalid.
	#[error("policy configuration error: {0}")]
	Configuration(String),
}

impl AuthzError {
	/// Returns true if this error indicates a programming or deployment fault.
	pub fn is_internal(&self) -> bool {
		matches!(self, AuthzError::Configuration(_))
	}

	/// Returns the HTTP status code the route layer should answer with.
	pub fn status_code(&self) -> u16 {
		match self {
			AuthzError::UnknownRole(_)
			| AuthzError::UnknownSubjectKind(_)
			| AuthzError::UnknownAction(_)
			| AuthzError::InvalidAction { .. }
			| AuthzError::MissingAttribute { .. }
			| AuthzError::BadRequest(_) => 400,

			AuthzError::Unauthorized(_) => 401,

			AuthzError::Configuration(_) => 500,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn malformed_input_is_400() {
		assert_eq!(AuthzError::UnknownRole("x".into()).status_code(), 400);
		assert_eq!(AuthzError::UnknownSubjectKind("x".into()).status_code(), 400);
		assert_eq!(AuthzError::UnknownAction("x".into()).status_code(), 400);
		assert_eq!(
			AuthzError::InvalidAction {
				action: Action::Transfer,
				kind: SubjectKind::Project,
			}
			.status_code(),
			400
		);
		assert_eq!(AuthzError::BadRequest("x".into()).status_code(), 400);
	}

	#[test]
	fn unauthorized_is_401() {
		assert_eq!(AuthzError::Unauthorized("no".into()).status_code(), 401);
	}

	#[test]
	fn configuration_errors_are_flagged() {
		let err = AuthzError::Configuration("bad".into());
		assert!(err.is_internal());
		assert_eq!(err.status_code(), 500);
		assert!(!AuthzError::Unauthorized("no".into()).is_internal());
	}

	#[test]
	fn messages_name_the_offending_values() {
		let err = AuthzError::MissingAttribute {
			kind: SubjectKind::Project,
			attribute: Attribute::OwnerId,
		};
		assert_eq!(
			err.to_string(),
			"subject 'Project' is missing required attribute 'ownerId'"
		);
	}
}
