// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions shared by the authorization core.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for the tenant entities
//!   ([`UserId`], [`OrgId`], [`ProjectId`], [`InviteId`]) preventing accidental mixing
//! - **Role**: The per-membership permission tier ([`Role`])
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AuthzError;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(OrgId, "Unique identifier for an organization.");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(InviteId, "Unique identifier for an organization invite.");

// =============================================================================
// Roles
// =============================================================================

/// Permission tier held by a user within one organization.
///
/// Exactly one role exists per (user, organization) membership. Persisted
/// membership records store the role in upper case (`"OWNER"`), which is also
/// the serde representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
	/// Holds the organization; implicitly manages everything in it.
	Owner,
	/// Manages members, projects and billing.
	Admin,
	/// Standard member access.
	Member,
	/// Billing contact; manages the organization's billing only.
	Billing,
}

impl Role {
	/// Returns all available roles.
	pub fn all() -> &'static [Role] {
		&[Role::Owner, Role::Admin, Role::Member, Role::Billing]
	}

	/// Upper-case name as stored on membership records.
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Owner => "OWNER",
			Role::Admin => "ADMIN",
			Role::Member => "MEMBER",
			Role::Billing => "BILLING",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = AuthzError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::all()
			.iter()
			.copied()
			.find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| AuthzError::UnknownRole(s.to_string()))
	}
}
