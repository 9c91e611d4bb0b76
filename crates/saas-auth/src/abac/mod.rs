// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute-Based Access Control (ABAC) engine.
//!
//! This module decides which role may perform which action on which resource,
//! given the resource's ownership and tenancy attributes.
//!
//! # Architecture
//!
//! 1. **Types** ([`types`]): Actors, subject kinds, actions, attributes
//! 2. **Subjects** ([`subject`]): The static subject registry and typed subject instances
//! 3. **Grants** ([`grant`]): Rules, grants and the conditions guarding them
//! 4. **Policy** ([`policy`], [`policies`]): The immutable role → grants table
//! 5. **Engine** ([`engine`]): [`Ability`] and the `can`/`cannot` decision
//!
//! # Evaluation Flow
//!
//! ```text
//! Ability::check(action, subject)
//!     │
//!     ├── registry: does `action` apply to `subject.kind()`?  (no → InvalidAction)
//!     ├── table: grants_for(actor.role)                        (none → UnknownRole)
//!     └── for each grant with kind == subject.kind()
//!               and (grant.action == action or grant.action == manage):
//!             all conditions hold? → allow
//!         otherwise → deny
//! ```
//!
//! # Example
//!
//! ```
//! use saas_auth::abac::{Ability, Action, Subject};
//! use saas_auth::{OrgId, ProjectId, Role, UserId};
//!
//! let user_id = UserId::generate();
//! let project = Subject::project(ProjectId::generate(), OrgId::generate(), user_id);
//!
//! let ability = Ability::for_user(user_id, Role::Member);
//! assert!(ability.can(Action::Update, &project));
//!
//! let someone_else = Ability::for_user(UserId::generate(), Role::Member);
//! assert!(someone_else.cannot(Action::Update, &project));
//! ```

pub mod engine;
pub mod grant;
pub mod policies;
pub mod policy;
pub mod subject;
pub mod types;

pub use engine::{is_allowed, Ability, Decision, DecisionReason};
pub use grant::{Condition, Grant, Rule};
pub use policy::{PolicyTable, RoleDefinition};
pub use subject::{
	describe, describe_named, BillingAttrs, InviteAttrs, OrganizationAttrs, ProjectAttrs, Subject,
	SubjectDescriptor, UserAttrs,
};
pub use types::{Action, Actor, Attribute, SubjectKind};
