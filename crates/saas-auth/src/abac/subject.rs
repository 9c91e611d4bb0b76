// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subject registry and subject instances.
//!
//! The registry is a static table describing, per [`SubjectKind`], which
//! actions apply and which attributes an instance must carry. A [`Subject`]
//! is the transient, typed view of a domain record built at decision time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::types::{Action, Attribute, SubjectKind};
use crate::error::AuthzError;
use crate::{InviteId, OrgId, ProjectId, UserId};

// =============================================================================
// Registry
// =============================================================================

/// Static description of one subject kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubjectDescriptor {
	pub kind: SubjectKind,
	pub valid_actions: &'static [Action],
	pub required_attributes: &'static [Attribute],
}

impl SubjectDescriptor {
	/// Returns true if `action` may be requested on this kind.
	pub fn supports(&self, action: Action) -> bool {
		self.valid_actions.contains(&action)
	}
}

const USER: SubjectDescriptor = SubjectDescriptor {
	kind: SubjectKind::User,
	valid_actions: &[Action::Manage, Action::Get, Action::Create, Action::Delete],
	required_attributes: &[Attribute::Id],
};

const ORGANIZATION: SubjectDescriptor = SubjectDescriptor {
	kind: SubjectKind::Organization,
	valid_actions: &[
		Action::Manage,
		Action::Get,
		Action::Update,
		Action::Delete,
		Action::Transfer,
		Action::Invite,
	],
	required_attributes: &[Attribute::Id, Attribute::OwnerId],
};

const PROJECT: SubjectDescriptor = SubjectDescriptor {
	kind: SubjectKind::Project,
	valid_actions: &[
		Action::Manage,
		Action::Get,
		Action::Create,
		Action::Update,
		Action::Delete,
	],
	required_attributes: &[Attribute::Id, Attribute::OrganizationId, Attribute::OwnerId],
};

const INVITE: SubjectDescriptor = SubjectDescriptor {
	kind: SubjectKind::Invite,
	valid_actions: &[Action::Manage, Action::Get, Action::Create, Action::Delete],
	required_attributes: &[Attribute::Id, Attribute::OrganizationId],
};

const BILLING: SubjectDescriptor = SubjectDescriptor {
	kind: SubjectKind::Billing,
	valid_actions: &[Action::Manage, Action::Get, Action::Update],
	required_attributes: &[Attribute::OrganizationId],
};

/// Describes a subject kind.
pub fn describe(kind: SubjectKind) -> SubjectDescriptor {
	match kind {
		SubjectKind::User => USER,
		SubjectKind::Organization => ORGANIZATION,
		SubjectKind::Project => PROJECT,
		SubjectKind::Invite => INVITE,
		SubjectKind::Billing => BILLING,
	}
}

/// Describes a subject kind given by name.
///
/// Fails with [`AuthzError::UnknownSubjectKind`] for undeclared kinds.
pub fn describe_named(name: &str) -> Result<SubjectDescriptor, AuthzError> {
	Ok(describe(name.parse()?))
}

// =============================================================================
// Subject instances
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttrs {
	pub id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAttrs {
	pub id: OrgId,
	pub owner_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAttrs {
	pub id: ProjectId,
	pub organization_id: OrgId,
	pub owner_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteAttrs {
	pub id: InviteId,
	pub organization_id: OrgId,
	#[serde(default)]
	pub author_id: Option<UserId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAttrs {
	pub organization_id: OrgId,
}

/// A resource instance being acted upon, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Subject {
	User(UserAttrs),
	Organization(OrganizationAttrs),
	Project(ProjectAttrs),
	Invite(InviteAttrs),
	Billing(BillingAttrs),
}

impl Subject {
	pub fn user(id: UserId) -> Self {
		Subject::User(UserAttrs { id })
	}

	pub fn organization(id: OrgId, owner_id: UserId) -> Self {
		Subject::Organization(OrganizationAttrs { id, owner_id })
	}

	pub fn project(id: ProjectId, organization_id: OrgId, owner_id: UserId) -> Self {
		Subject::Project(ProjectAttrs {
			id,
			organization_id,
			owner_id,
		})
	}

	pub fn invite(id: InviteId, organization_id: OrgId) -> Self {
		Subject::Invite(InviteAttrs {
			id,
			organization_id,
			author_id: None,
		})
	}

	pub fn billing(organization_id: OrgId) -> Self {
		Subject::Billing(BillingAttrs { organization_id })
	}

	/// Builder: set the author of an invite. No effect on other kinds.
	pub fn with_author(mut self, author: UserId) -> Self {
		if let Subject::Invite(ref mut attrs) = self {
			attrs.author_id = Some(author);
		}
		self
	}

	pub fn kind(&self) -> SubjectKind {
		match self {
			Subject::User(_) => SubjectKind::User,
			Subject::Organization(_) => SubjectKind::Organization,
			Subject::Project(_) => SubjectKind::Project,
			Subject::Invite(_) => SubjectKind::Invite,
			Subject::Billing(_) => SubjectKind::Billing,
		}
	}

	/// The user who owns (or authored) this subject, if the kind has one.
	pub fn owner_id(&self) -> Option<UserId> {
		match self {
			Subject::Organization(attrs) => Some(attrs.owner_id),
			Subject::Project(attrs) => Some(attrs.owner_id),
			Subject::Invite(attrs) => attrs.author_id,
			Subject::User(_) | Subject::Billing(_) => None,
		}
	}

	/// The organization this subject belongs to (an organization belongs to itself).
	pub fn organization_id(&self) -> Option<OrgId> {
		match self {
			Subject::Organization(attrs) => Some(attrs.id),
			Subject::Project(attrs) => Some(attrs.organization_id),
			Subject::Invite(attrs) => Some(attrs.organization_id),
			Subject::Billing(attrs) => Some(attrs.organization_id),
			Subject::User(_) => None,
		}
	}

	/// The user this subject is, for `User` subjects.
	pub fn user_id(&self) -> Option<UserId> {
		match self {
			Subject::User(attrs) => Some(attrs.id),
			_ => None,
		}
	}

	/// Shapes a loosely-typed persistence record into a subject.
	///
	/// Attribute keys are read in camelCase (`ownerId`) or snake_case
	/// (`owner_id`); unrelated fields are ignored. A required attribute that is
	/// absent, null, or not a UUID fails with [`AuthzError::MissingAttribute`].
	pub fn from_record(kind: &str, record: &Value) -> Result<Self, AuthzError> {
		let descriptor = describe_named(kind)?;
		let reader = RecordReader {
			kind: descriptor.kind,
			record,
		};

		for attribute in descriptor.required_attributes {
			reader.require(*attribute)?;
		}

		let subject = match descriptor.kind {
			SubjectKind::User => Subject::user(reader.require(Attribute::Id)?.into()),
			SubjectKind::Organization => Subject::organization(
				reader.require(Attribute::Id)?.into(),
				reader.require(Attribute::OwnerId)?.into(),
			),
			SubjectKind::Project => Subject::project(
				reader.require(Attribute::Id)?.into(),
				reader.require(Attribute::OrganizationId)?.into(),
				reader.require(Attribute::OwnerId)?.into(),
			),
			SubjectKind::Invite => Subject::Invite(InviteAttrs {
				id: reader.require(Attribute::Id)?.into(),
				organization_id: reader.require(Attribute::OrganizationId)?.into(),
				author_id: reader.optional(Attribute::AuthorId)?.map(UserId::from),
			}),
			SubjectKind::Billing => {
				Subject::billing(reader.require(Attribute::OrganizationId)?.into())
			}
		};

		Ok(subject)
	}
}

struct RecordReader<'a> {
	kind: SubjectKind,
	record: &'a Value,
}

impl RecordReader<'_> {
	fn raw(&self, attribute: Attribute) -> Option<&Value> {
		attribute
			.record_keys()
			.iter()
			.filter_map(|key| self.record.get(key))
			.find(|value| !value.is_null())
	}

	fn optional(&self, attribute: Attribute) -> Result<Option<Uuid>, AuthzError> {
		match self.raw(attribute) {
			None => Ok(None),
			Some(value) => value
				.as_str()
				.and_then(|s| Uuid::parse_str(s).ok())
				.map(Some)
				.ok_or(AuthzError::MissingAttribute {
					kind: self.kind,
					attribute,
				}),
		}
	}

	fn require(&self, attribute: Attribute) -> Result<Uuid, AuthzError> {
		self.optional(attribute)?.ok_or(AuthzError::MissingAttribute {
			kind: self.kind,
			attribute,
		})
	}
}
