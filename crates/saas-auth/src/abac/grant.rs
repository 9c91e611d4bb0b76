// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Grants and the conditions that guard them.

use serde::Serialize;
use std::fmt;

use super::subject::Subject;
use super::types::{Action, Actor, SubjectKind};
use crate::Role;

/// Ownership or tenancy predicate evaluated against the actor and the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
	/// The subject's owner (or invite author) is the acting user.
	Owner,
	/// The subject belongs to the organization of the actor's membership.
	SameOrganization,
}

impl Condition {
	pub fn holds(&self, actor: &Actor, subject: &Subject) -> bool {
		match self {
			Condition::Owner => subject.owner_id() == Some(actor.user_id),
			Condition::SameOrganization => match (actor.organization_id, subject.organization_id()) {
				(Some(member_org), Some(subject_org)) => member_org == subject_org,
				_ => false,
			},
		}
	}

	/// Returns true if subjects of `kind` carry the attributes this condition reads.
	pub fn applies_to(&self, kind: SubjectKind) -> bool {
		match self {
			Condition::Owner => matches!(
				kind,
				SubjectKind::Organization | SubjectKind::Project | SubjectKind::Invite
			),
			Condition::SameOrganization => kind != SubjectKind::User,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Condition::Owner => "owner",
			Condition::SameOrganization => "same_organization",
		}
	}
}

impl fmt::Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One declarative line of a role definition, before it is bound to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
	pub action: Action,
	pub kind: SubjectKind,
	pub conditions: &'static [Condition],
}

impl Rule {
	/// An unconditional rule.
	pub const fn allow(action: Action, kind: SubjectKind) -> Self {
		Self {
			action,
			kind,
			conditions: &[],
		}
	}

	/// Builder: guard the rule; every condition must hold.
	pub const fn when(self, conditions: &'static [Condition]) -> Self {
		Self { conditions, ..self }
	}
}

/// A rule bound to a role: `role` may perform `action` on `kind` when every
/// condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grant {
	pub role: Role,
	pub action: Action,
	pub kind: SubjectKind,
	pub conditions: &'static [Condition],
}

impl Grant {
	pub fn bind(role: Role, rule: Rule) -> Self {
		Self {
			role,
			action: rule.action,
			kind: rule.kind,
			conditions: rule.conditions,
		}
	}

	/// Returns true if this grant applies to a request for `action` on `kind`.
	pub fn matches(&self, action: Action, kind: SubjectKind) -> bool {
		self.kind == kind && self.action.covers(action)
	}

	pub fn is_unconditional(&self) -> bool {
		self.conditions.is_empty()
	}

	/// Returns true if every condition holds for this actor and subject.
	pub fn conditions_hold(&self, actor: &Actor, subject: &Subject) -> bool {
		self
			.conditions
			.iter()
			.all(|condition| condition.holds(actor, subject))
	}
}

impl fmt::Display for Grant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} can {} {}", self.role, self.action, self.kind)?;
		if !self.conditions.is_empty() {
			let conditions: Vec<&str> = self.conditions.iter().map(Condition::as_str).collect();
			write!(f, " when {}", conditions.join(" and "))?;
		}
		Ok(())
	}
}
