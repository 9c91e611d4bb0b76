// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization core for the multi-tenant SaaS backend.
//!
//! This crate provides:
//! - Tenant entity identifiers and membership roles
//! - The subject registry: resource kinds, their actions and attributes
//! - The role policy table: a static, validated role → grants mapping
//! - The permission evaluator: `can`/`cannot` over typed subjects
//! - Organization memberships and ownership transfer planning
//!
//! # Calling Convention
//!
//! Route handlers own everything around a decision. They authenticate the
//! user, load the membership and the target record, and then ask:
//!
//! ```
//! use saas_auth::abac::{Ability, Action, Subject};
//! use saas_auth::{Membership, OrgId, ProjectId, Role, UserId};
//!
//! let org_id = OrgId::generate();
//! let membership = Membership::new(org_id, UserId::generate(), Role::Member);
//! let project = Subject::project(ProjectId::generate(), org_id, UserId::generate());
//!
//! let ability = Ability::for_membership(&membership);
//! let result = ability.ensure(Action::Update, &project, "You're not allowed to update this project.");
//! assert_eq!(result.unwrap_err().status_code(), 401);
//! ```
//!
//! A deny must stop the handler before any mutation begins.

pub mod abac;
pub mod error;
pub mod org;
pub mod types;

pub use abac::{
	describe, is_allowed, Ability, Action, Actor, Decision, DecisionReason, Grant, PolicyTable,
	Subject, SubjectKind,
};
pub use error::AuthzError;
pub use org::{plan_ownership_transfer, Membership, OwnershipTransfer, RoleChange};
pub use types::*;
