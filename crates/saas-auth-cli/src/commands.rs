// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subcommand implementations. Each returns the text to print so the
//! binary only deals with I/O and exit codes.

use anyhow::{Context, Result};
use saas_auth::abac::{describe, describe_named, Ability, Action, Actor, Subject, SubjectKind};
use saas_auth::{AuthzError, OrgId, PolicyTable, Role, UserId};
use saas_auth_config::AuthzConfig;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

/// Registry entries for one kind, or every kind.
pub fn describe_kinds(kind: Option<&str>, as_json: bool) -> Result<String> {
	let descriptors = match kind {
		Some(name) => vec![describe_named(name)?],
		None => SubjectKind::all().iter().map(|kind| describe(*kind)).collect(),
	};

	if as_json {
		return Ok(serde_json::to_string_pretty(&descriptors)?);
	}

	let lines: Vec<String> = descriptors
		.iter()
		.map(|d| {
			let actions: Vec<&str> = d.valid_actions.iter().map(|a| a.as_str()).collect();
			let attributes: Vec<&str> = d.required_attributes.iter().map(|a| a.as_str()).collect();
			format!(
				"{:<13} actions: {:<44} requires: {}",
				d.kind.as_str(),
				actions.join(", "),
				attributes.join(", ")
			)
		})
		.collect();
	Ok(lines.join("\n"))
}

/// The standard policy table, optionally narrowed to one role.
pub fn list_grants(role: Option<Role>, as_json: bool) -> Result<String> {
	let table = PolicyTable::standard();
	let grants: Vec<_> = match role {
		Some(role) => table.grants_for(role)?.to_vec(),
		None => table.grants().copied().collect(),
	};

	if as_json {
		return Ok(serde_json::to_string_pretty(&grants)?);
	}

	Ok(grants
		.iter()
		.map(|grant| grant.to_string())
		.collect::<Vec<_>>()
		.join("\n"))
}

/// Attributes of the subject under test, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SubjectArgs {
	pub id: Option<Uuid>,
	pub owner: Option<Uuid>,
	pub organization: Option<Uuid>,
	pub author: Option<Uuid>,
}

impl SubjectArgs {
	fn to_record(&self) -> Value {
		let mut record = Map::new();
		let fields = [
			("id", self.id),
			("ownerId", self.owner),
			("organizationId", self.organization),
			("authorId", self.author),
		];
		for (key, value) in fields {
			if let Some(value) = value {
				record.insert(key.to_string(), json!(value.to_string()));
			}
		}
		Value::Object(record)
	}
}

/// One permission question.
#[derive(Debug, Clone)]
pub struct CheckRequest {
	pub role: Role,
	pub action: Action,
	pub kind: String,
	pub actor: Uuid,
	pub member_org: Option<Uuid>,
	pub subject: SubjectArgs,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
	pub actor: Actor,
	pub action: Action,
	pub subject: Subject,
	pub allowed: bool,
	pub reason: String,
}

impl CheckReport {
	pub fn render(&self) -> String {
		let verdict = if self.allowed { "allow" } else { "deny" };
		format!(
			"{verdict}: {} {} {} ({})",
			self.actor.role,
			self.action,
			self.subject.kind(),
			self.reason
		)
	}
}

/// Evaluates one request against the standard table.
///
/// An action the subject kind does not support is a deny, unless
/// `strict_actions` is set, in which case it is reported as an error.
pub fn check(request: &CheckRequest, config: &AuthzConfig) -> Result<CheckReport> {
	let subject = Subject::from_record(&request.kind, &request.subject.to_record())
		.with_context(|| format!("cannot build a {} subject from the given attributes", request.kind))?;

	let mut actor = Actor::new(UserId::new(request.actor), request.role);
	if let Some(org) = request.member_org {
		actor = actor.in_organization(OrgId::new(org));
	}

	let ability = Ability::new(PolicyTable::standard(), actor);
	let (allowed, reason) = match ability.check(request.action, &subject) {
		Ok(decision) => (decision.allowed, decision.reason.to_string()),
		Err(err @ AuthzError::InvalidAction { .. }) if !config.strict_actions => {
			debug!(error = %err, "treating inapplicable action as deny");
			(false, err.to_string())
		}
		Err(err) => return Err(err.into()),
	};

	if config.audit_decisions {
		info!(
			user_id = %actor.user_id,
			role = %actor.role,
			action = %request.action,
			kind = %subject.kind(),
			allowed,
			reason = %reason,
			"authorization decision"
		);
	} else {
		debug!(allowed, reason = %reason, "authorization decision");
	}

	Ok(CheckReport {
		actor,
		action: request.action,
		subject,
		allowed,
		reason,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn request(role: Role, action: Action, kind: &str, subject: SubjectArgs) -> CheckRequest {
		CheckRequest {
			role,
			action,
			kind: kind.to_string(),
			actor: Uuid::new_v4(),
			member_org: None,
			subject,
		}
	}

	fn project(owner: Uuid) -> SubjectArgs {
		SubjectArgs {
			id: Some(Uuid::new_v4()),
			owner: Some(owner),
			organization: Some(Uuid::new_v4()),
			author: None,
		}
	}

	mod describe_cmd {
		use super::*;

		#[test]
		fn lists_every_kind() {
			let out = describe_kinds(None, false).unwrap();
			assert_eq!(out.lines().count(), SubjectKind::all().len());
			assert!(out.contains("Project"));
			assert!(out.contains("transfer"));
		}

		#[test]
		fn unknown_kind_fails() {
			assert!(describe_kinds(Some("Widget"), false).is_err());
		}

		#[test]
		fn json_output_parses() {
			let out = describe_kinds(Some("billing"), true).unwrap();
			let value: Value = serde_json::from_str(&out).unwrap();
			assert_eq!(value[0]["kind"], "Billing");
		}
	}

	mod grants_cmd {
		use super::*;

		#[test]
		fn member_grants_mention_ownership() {
			let out = list_grants(Some(Role::Member), false).unwrap();
			assert!(out.contains("MEMBER can update Project when owner"));
		}

		#[test]
		fn full_table_covers_every_role() {
			let out = list_grants(None, false).unwrap();
			for role in Role::all() {
				assert!(out.contains(role.as_str()), "missing {role}");
			}
		}
	}

	mod check_cmd {
		use super::*;

		#[test]
		fn owner_of_project_may_update() {
			let mut req = request(Role::Member, Action::Update, "Project", SubjectArgs::default());
			req.subject = project(req.actor);
			let report = check(&req, &AuthzConfig::default()).unwrap();
			assert!(report.allowed);
			assert!(report.render().starts_with("allow: MEMBER update Project"));
		}

		#[test]
		fn non_owner_member_is_denied() {
			let req = request(Role::Member, Action::Update, "Project", project(Uuid::new_v4()));
			let report = check(&req, &AuthzConfig::default()).unwrap();
			assert!(!report.allowed);
		}

		#[test]
		fn missing_attribute_is_an_error() {
			let req = request(Role::Admin, Action::Get, "Project", SubjectArgs::default());
			assert!(check(&req, &AuthzConfig::default()).is_err());
		}

		#[test]
		fn inapplicable_action_depends_on_strictness() {
			let req = request(Role::Owner, Action::Transfer, "Project", project(Uuid::new_v4()));

			let lenient = check(&req, &AuthzConfig::default()).unwrap();
			assert!(!lenient.allowed);

			let strict = AuthzConfig {
				strict_actions: true,
				..Default::default()
			};
			assert!(check(&req, &strict).is_err());
		}

		#[test]
		fn member_org_scopes_organization_reads() {
			let org = Uuid::new_v4();
			let mut req = request(
				Role::Member,
				Action::Get,
				"Organization",
				SubjectArgs {
					id: Some(org),
					owner: Some(Uuid::new_v4()),
					..Default::default()
				},
			);
			assert!(!check(&req, &AuthzConfig::default()).unwrap().allowed);

			req.member_org = Some(org);
			assert!(check(&req, &AuthzConfig::default()).unwrap().allowed);
		}

		#[test]
		fn report_serializes() {
			let req = request(Role::Admin, Action::Manage, "Billing", SubjectArgs {
				organization: Some(Uuid::new_v4()),
				..Default::default()
			});
			let report = check(&req, &AuthzConfig::default()).unwrap();
			let value = serde_json::to_value(&report).unwrap();
			assert_eq!(value["allowed"], true);
			assert_eq!(value["action"], "manage");
		}
	}
}
