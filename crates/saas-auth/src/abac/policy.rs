// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role policy table.
//!
//! The table is built once from a static list of [`RoleDefinition`]s and is
//! immutable afterwards. Building validates every rule against the subject
//! registry, so a table that exists is a table whose grants can all apply.

use std::sync::OnceLock;

use tracing::debug;

use super::grant::{Grant, Rule};
use super::policies;
use super::subject::describe;
use super::types::{Action, SubjectKind};
use crate::error::AuthzError;
use crate::Role;

/// Declarative rules for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefinition {
	pub role: Role,
	pub rules: &'static [Rule],
}

impl RoleDefinition {
	pub const fn new(role: Role, rules: &'static [Rule]) -> Self {
		Self { role, rules }
	}
}

/// Immutable mapping from role to its ordered grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
	owner_role: Role,
	entries: Vec<(Role, Vec<Grant>)>,
}

impl PolicyTable {
	/// The built-in policy, built on first use and shared afterwards.
	pub fn standard() -> &'static PolicyTable {
		static STANDARD: OnceLock<PolicyTable> = OnceLock::new();
		STANDARD.get_or_init(|| {
			PolicyTable::build(policies::STANDARD, policies::OWNER_ROLE)
				.expect("built-in role definitions are valid")
		})
	}

	/// Builds a table from role definitions.
	///
	/// The definition of `owner_role` is replaced by an unconditional `manage`
	/// grant on every subject kind. Fails with [`AuthzError::Configuration`]
	/// when a role is defined twice, the owner role is not defined, a rule's
	/// action does not apply to its kind, or a rule's condition can never hold
	/// for its kind.
	pub fn build(definitions: &[RoleDefinition], owner_role: Role) -> Result<Self, AuthzError> {
		let mut entries: Vec<(Role, Vec<Grant>)> = Vec::with_capacity(definitions.len());

		for definition in definitions {
			let role = definition.role;
			if entries.iter().any(|(existing, _)| *existing == role) {
				return Err(AuthzError::Configuration(format!(
					"role {role} is defined more than once"
				)));
			}

			for rule in definition.rules {
				validate_rule(role, rule)?;
			}

			let grants = if role == owner_role {
				if !definition.rules.is_empty() {
					debug!(
						role = %role,
						superseded = definition.rules.len(),
						"owner role rules superseded by implicit manage"
					);
				}
				SubjectKind::all()
					.iter()
					.map(|kind| Grant::bind(role, Rule::allow(Action::Manage, *kind)))
					.collect()
			} else {
				definition
					.rules
					.iter()
					.map(|rule| Grant::bind(role, *rule))
					.collect()
			};

			entries.push((role, grants));
		}

		if !entries.iter().any(|(role, _)| *role == owner_role) {
			return Err(AuthzError::Configuration(format!(
				"owner role {owner_role} has no definition"
			)));
		}

		let table = Self {
			owner_role,
			entries,
		};
		debug!(
			roles = table.entries.len(),
			grants = table.grants().count(),
			owner_role = %owner_role,
			"policy table built"
		);
		Ok(table)
	}

	/// Returns the ordered grants of `role`.
	pub fn grants_for(&self, role: Role) -> Result<&[Grant], AuthzError> {
		self
			.entries
			.iter()
			.find(|(r, _)| *r == role)
			.map(|(_, grants)| grants.as_slice())
			.ok_or_else(|| AuthzError::UnknownRole(role.to_string()))
	}

	/// Roles in definition order.
	pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
		self.entries.iter().map(|(role, _)| *role)
	}

	/// Every grant in the table, role by role.
	pub fn grants(&self) -> impl Iterator<Item = &Grant> + '_ {
		self.entries.iter().flat_map(|(_, grants)| grants.iter())
	}

	pub fn owner_role(&self) -> Role {
		self.owner_role
	}
}

fn validate_rule(role: Role, rule: &Rule) -> Result<(), AuthzError> {
	if !describe(rule.kind).supports(rule.action) {
		return Err(AuthzError::Configuration(format!(
			"{role}: action '{}' is not valid for subject '{}'",
			rule.action, rule.kind
		)));
	}

	if let Some(condition) = rule
		.conditions
		.iter()
		.find(|condition| !condition.applies_to(rule.kind))
	{
		return Err(AuthzError::Configuration(format!(
			"{role}: condition '{condition}' can never hold for subject '{}'",
			rule.kind
		)));
	}

	Ok(())
}
