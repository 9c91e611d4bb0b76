// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission evaluation.
//!
//! [`Ability`] binds an [`Actor`] to a [`PolicyTable`] and answers
//! `can`/`cannot` questions about subjects. Evaluation is a permissive union:
//! the first matching grant whose conditions hold allows the action. There
//! are no deny grants; the absence of an allow is the deny.
//!
//! Malformed requests (an action that does not apply to the subject kind, a
//! role the table does not know) never allow. [`Ability::check`] reports them
//! as errors, [`Ability::can`] reports them as `false`.

use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument, warn};

use super::grant::Grant;
use super::policy::PolicyTable;
use super::subject::{describe, Subject};
use super::types::{Action, Actor};
use crate::error::AuthzError;
use crate::org::Membership;
use crate::{Role, UserId};

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DecisionReason {
	/// This grant authorized the action.
	Granted { grant: Grant },
	/// The role has no grant for the action on this kind.
	NoMatchingGrant,
	/// Grants matched, but none had all of its conditions satisfied.
	ConditionsNotMet,
}

impl fmt::Display for DecisionReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DecisionReason::Granted { grant } => write!(f, "granted by '{grant}'"),
			DecisionReason::NoMatchingGrant => f.write_str("no matching grant"),
			DecisionReason::ConditionsNotMet => f.write_str("conditions not met"),
		}
	}
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
	pub allowed: bool,
	pub reason: DecisionReason,
}

impl Decision {
	fn allow(grant: Grant) -> Self {
		Self {
			allowed: true,
			reason: DecisionReason::Granted { grant },
		}
	}

	fn deny(reason: DecisionReason) -> Self {
		Self {
			allowed: false,
			reason,
		}
	}

	pub fn is_allowed(&self) -> bool {
		self.allowed
	}
}

/// What one actor may do, according to one policy table.
#[derive(Debug, Clone, Copy)]
pub struct Ability<'a> {
	table: &'a PolicyTable,
	actor: Actor,
}

impl<'a> Ability<'a> {
	pub fn new(table: &'a PolicyTable, actor: Actor) -> Self {
		Self { table, actor }
	}

	pub fn actor(&self) -> &Actor {
		&self.actor
	}

	/// Evaluates `action` on `subject` and explains the outcome.
	///
	/// # Errors
	///
	/// - [`AuthzError::InvalidAction`] if the action does not apply to the subject kind
	/// - [`AuthzError::UnknownRole`] if the table has no entry for the actor's role
	#[instrument(
		level = "debug",
		skip(self, subject),
		fields(
			user_id = %self.actor.user_id,
			role = %self.actor.role,
			action = %action,
			kind = %subject.kind(),
		)
	)]
	pub fn check(&self, action: Action, subject: &Subject) -> Result<Decision, AuthzError> {
		let kind = subject.kind();
		if !describe(kind).supports(action) {
			return Err(AuthzError::InvalidAction { action, kind });
		}

		let grants = self.table.grants_for(self.actor.role)?;

		let mut matched = false;
		for grant in grants.iter().filter(|grant| grant.matches(action, kind)) {
			matched = true;
			if grant.conditions_hold(&self.actor, subject) {
				debug!(grant = %grant, "allowed");
				return Ok(Decision::allow(*grant));
			}
		}

		let reason = if matched {
			DecisionReason::ConditionsNotMet
		} else {
			DecisionReason::NoMatchingGrant
		};
		debug!(reason = %reason, "denied");
		Ok(Decision::deny(reason))
	}

	/// Returns true if the actor may perform `action` on `subject`.
	///
	/// Fails closed: anything [`Ability::check`] would reject is `false`.
	pub fn can(&self, action: Action, subject: &Subject) -> bool {
		match self.check(action, subject) {
			Ok(decision) => decision.allowed,
			Err(err) => {
				warn!(
					user_id = %self.actor.user_id,
					role = %self.actor.role,
					error = %err,
					"authorization check failed closed"
				);
				false
			}
		}
	}

	pub fn cannot(&self, action: Action, subject: &Subject) -> bool {
		!self.can(action, subject)
	}

	/// Route-layer guard: a deny becomes [`AuthzError::Unauthorized`] carrying
	/// `message`; malformed requests keep their own error.
	pub fn ensure(
		&self,
		action: Action,
		subject: &Subject,
		message: impl Into<String>,
	) -> Result<(), AuthzError> {
		if self.check(action, subject)?.allowed {
			Ok(())
		} else {
			Err(AuthzError::Unauthorized(message.into()))
		}
	}
}

impl Ability<'static> {
	/// Binds a user and role to the built-in policy.
	pub fn for_user(user_id: UserId, role: Role) -> Self {
		Self::new(PolicyTable::standard(), Actor::new(user_id, role))
	}

	/// Binds a membership (user, role and organization) to the built-in policy.
	pub fn for_membership(membership: &Membership) -> Self {
		Self::new(PolicyTable::standard(), membership.actor())
	}
}

/// Evaluates one request against the built-in policy.
pub fn is_allowed(actor: &Actor, action: Action, subject: &Subject) -> bool {
	Ability::new(PolicyTable::standard(), *actor).can(action, subject)
}
