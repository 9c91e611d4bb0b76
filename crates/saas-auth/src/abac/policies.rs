// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Built-in role definitions.
//!
//! The owner role carries no rules of its own: the table expands it to
//! `manage` on every subject kind.

use super::grant::{Condition, Rule};
use super::policy::RoleDefinition;
use super::types::{Action, SubjectKind};
use crate::Role;

const ADMIN: &[Rule] = &[
	Rule::allow(Action::Manage, SubjectKind::User),
	Rule::allow(Action::Get, SubjectKind::Organization),
	Rule::allow(Action::Update, SubjectKind::Organization),
	Rule::allow(Action::Delete, SubjectKind::Organization),
	Rule::allow(Action::Invite, SubjectKind::Organization),
	Rule::allow(Action::Transfer, SubjectKind::Organization).when(&[Condition::Owner]),
	Rule::allow(Action::Manage, SubjectKind::Project),
	Rule::allow(Action::Manage, SubjectKind::Invite),
	Rule::allow(Action::Manage, SubjectKind::Billing),
];

const MEMBER: &[Rule] = &[
	Rule::allow(Action::Get, SubjectKind::User),
	Rule::allow(Action::Get, SubjectKind::Organization).when(&[Condition::SameOrganization]),
	Rule::allow(Action::Get, SubjectKind::Project).when(&[Condition::SameOrganization]),
	Rule::allow(Action::Create, SubjectKind::Project).when(&[Condition::SameOrganization]),
	Rule::allow(Action::Update, SubjectKind::Project).when(&[Condition::Owner]),
	Rule::allow(Action::Delete, SubjectKind::Project).when(&[Condition::Owner]),
];

const BILLING: &[Rule] = &[
	Rule::allow(Action::Get, SubjectKind::User),
	Rule::allow(Action::Get, SubjectKind::Organization).when(&[Condition::SameOrganization]),
	Rule::allow(Action::Manage, SubjectKind::Billing).when(&[Condition::SameOrganization]),
];

/// The role definitions the service ships with, in table order.
pub const STANDARD: &[RoleDefinition] = &[
	RoleDefinition::new(Role::Owner, &[]),
	RoleDefinition::new(Role::Admin, ADMIN),
	RoleDefinition::new(Role::Member, MEMBER),
	RoleDefinition::new(Role::Billing, BILLING),
];

/// Role whose members implicitly manage every subject kind.
pub const OWNER_ROLE: Role = Role::Owner;
