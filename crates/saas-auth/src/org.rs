// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization memberships and ownership transfer.
//!
//! A membership ties one user to one organization with exactly one [`Role`].
//! Ownership transfer is planned here as a single change set that the caller
//! applies in one transaction; nothing in this module touches storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::abac::{Ability, Action, Actor, OrganizationAttrs, Subject};
use crate::error::AuthzError;
use crate::types::{OrgId, Role, UserId};

// =============================================================================
// Membership
// =============================================================================

/// A user's membership in an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
	pub org_id: OrgId,
	pub user_id: UserId,
	pub role: Role,
	pub created_at: DateTime<Utc>,
}

impl Membership {
	pub fn new(org_id: OrgId, user_id: UserId, role: Role) -> Self {
		Self {
			org_id,
			user_id,
			role,
			created_at: Utc::now(),
		}
	}

	/// Create the owner membership of a new organization.
	pub fn new_owner(org_id: OrgId, user_id: UserId) -> Self {
		Self::new(org_id, user_id, Role::Owner)
	}

	/// The actor this membership authorizes as.
	pub fn actor(&self) -> Actor {
		Actor::new(self.user_id, self.role).in_organization(self.org_id)
	}
}

// =============================================================================
// Ownership transfer
// =============================================================================

/// One membership role update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleChange {
	pub user_id: UserId,
	pub from: Role,
	pub to: Role,
}

/// Everything that changes when an organization changes hands.
///
/// Apply all of it in one transaction or none of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipTransfer {
	pub org_id: OrgId,
	pub previous_owner: UserId,
	pub new_owner: UserId,
	/// At most one entry per user.
	pub role_changes: Vec<RoleChange>,
}

impl OwnershipTransfer {
	/// The organization's attributes once the transfer is applied.
	pub fn organization_after(&self) -> OrganizationAttrs {
		OrganizationAttrs {
			id: self.org_id,
			owner_id: self.new_owner,
		}
	}
}

/// Plans the transfer of `organization` from its current owner to `target`.
///
/// The previous owner is demoted to [`Role::Admin`] and the target becomes
/// [`Role::Owner`]; role updates that would not change anything are left out.
///
/// # Errors
///
/// - [`AuthzError::Unauthorized`] if `ability` may not transfer the organization,
///   or acts through a membership of another organization
/// - [`AuthzError::BadRequest`] if `current_owner` is not the organization's
///   owner membership, `target` belongs to another organization, or `target`
///   already owns it
pub fn plan_ownership_transfer(
	ability: &Ability<'_>,
	organization: &OrganizationAttrs,
	current_owner: &Membership,
	target: &Membership,
) -> Result<OwnershipTransfer, AuthzError> {
	const DENIED: &str = "You're not allowed to transfer this organization ownership";

	ability.ensure(Action::Transfer, &Subject::Organization(*organization), DENIED)?;

	// Owner grants are unconditional, so the membership scope is checked here.
	if let Some(member_org) = ability.actor().organization_id {
		if member_org != organization.id {
			return Err(AuthzError::Unauthorized(DENIED.to_string()));
		}
	}

	if current_owner.org_id != organization.id || current_owner.user_id != organization.owner_id {
		return Err(AuthzError::BadRequest(
			"Current owner membership does not match this organization".to_string(),
		));
	}

	if target.org_id != organization.id {
		return Err(AuthzError::BadRequest(
			"Target user is not member of this organization".to_string(),
		));
	}

	if target.user_id == organization.owner_id {
		return Err(AuthzError::BadRequest(
			"Target user already owns this organization".to_string(),
		));
	}

	let role_changes = [
		RoleChange {
			user_id: current_owner.user_id,
			from: current_owner.role,
			to: Role::Admin,
		},
		RoleChange {
			user_id: target.user_id,
			from: target.role,
			to: Role::Owner,
		},
	]
	.into_iter()
	.filter(|change| change.from != change.to)
	.collect();

	let plan = OwnershipTransfer {
		org_id: organization.id,
		previous_owner: organization.owner_id,
		new_owner: target.user_id,
		role_changes,
	};

	info!(
		org_id = %plan.org_id,
		actor = %ability.actor().user_id,
		previous_owner = %plan.previous_owner,
		new_owner = %plan.new_owner,
		role_changes = plan.role_changes.len(),
		"planned organization ownership transfer"
	);

	Ok(plan)
}
