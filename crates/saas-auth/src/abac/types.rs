// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for policy evaluation.
//!
//! - [`Actor`]: Who is acting (user id, membership role, membership organization)
//! - [`SubjectKind`]: The closed set of resource kinds that can be protected
//! - [`Action`]: The closed set of verbs
//! - [`Attribute`]: The authorization-relevant attributes a subject can carry
//!
//! All names parse from and display as the strings used on the wire and in
//! persisted records, so route handlers can convert untrusted input once and
//! work with closed enums afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthzError;
use crate::{OrgId, Role, UserId};

/// The acting party of an authorization decision.
///
/// Built by the caller from the authenticated user id and the membership the
/// role was read from. Nothing here is read from ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
	pub user_id: UserId,
	pub role: Role,
	/// Organization of the membership the role belongs to, when known.
	pub organization_id: Option<OrgId>,
}

impl Actor {
	/// Creates an actor with no membership organization attached.
	pub fn new(user_id: UserId, role: Role) -> Self {
		Self {
			user_id,
			role,
			organization_id: None,
		}
	}

	/// Builder: set the membership organization.
	pub fn in_organization(mut self, org_id: OrgId) -> Self {
		self.organization_id = Some(org_id);
		self
	}
}

/// Kinds of resources that can be protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubjectKind {
	User,
	Organization,
	Project,
	Invite,
	Billing,
}

impl SubjectKind {
	/// Returns all subject kinds in registry order.
	pub fn all() -> &'static [SubjectKind] {
		&[
			SubjectKind::User,
			SubjectKind::Organization,
			SubjectKind::Project,
			SubjectKind::Invite,
			SubjectKind::Billing,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			SubjectKind::User => "User",
			SubjectKind::Organization => "Organization",
			SubjectKind::Project => "Project",
			SubjectKind::Invite => "Invite",
			SubjectKind::Billing => "Billing",
		}
	}
}

impl fmt::Display for SubjectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SubjectKind {
	type Err = AuthzError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SubjectKind::all()
			.iter()
			.copied()
			.find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| AuthzError::UnknownSubjectKind(s.to_string()))
	}
}

/// Actions that can be performed on subjects.
///
/// `Manage` is the wildcard: a grant on `Manage` matches every action valid
/// for its subject kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	Manage,
	Get,
	Create,
	Update,
	Delete,
	Transfer,
	Invite,
}

impl Action {
	/// Returns all actions.
	pub fn all() -> &'static [Action] {
		&[
			Action::Manage,
			Action::Get,
			Action::Create,
			Action::Update,
			Action::Delete,
			Action::Transfer,
			Action::Invite,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Action::Manage => "manage",
			Action::Get => "get",
			Action::Create => "create",
			Action::Update => "update",
			Action::Delete => "delete",
			Action::Transfer => "transfer",
			Action::Invite => "invite",
		}
	}

	/// Returns true if a grant on `self` covers a request for `requested`.
	pub fn covers(&self, requested: Action) -> bool {
		*self == Action::Manage || *self == requested
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Action {
	type Err = AuthzError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Action::all()
			.iter()
			.copied()
			.find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| AuthzError::UnknownAction(s.to_string()))
	}
}

/// Attributes a subject carries for ownership and tenancy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
	Id,
	OwnerId,
	OrganizationId,
	AuthorId,
}

impl Attribute {
	/// Record key in the camelCase form persistence records use.
	pub fn as_str(&self) -> &'static str {
		match self {
			Attribute::Id => "id",
			Attribute::OwnerId => "ownerId",
			Attribute::OrganizationId => "organizationId",
			Attribute::AuthorId => "authorId",
		}
	}

	/// Keys accepted when reading this attribute from a record.
	pub fn record_keys(&self) -> &'static [&'static str] {
		match self {
			Attribute::Id => &["id"],
			Attribute::OwnerId => &["ownerId", "owner_id"],
			Attribute::OrganizationId => &["organizationId", "organization_id"],
			Attribute::AuthorId => &["authorId", "author_id"],
		}
	}
}

impl fmt::Display for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
