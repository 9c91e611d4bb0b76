// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end authorization scenarios, written the way route handlers call in.

use saas_auth::abac::{describe, Ability, Action, Actor, Subject, SubjectKind};
use saas_auth::{
	is_allowed, plan_ownership_transfer, AuthzError, Membership, OrgId, ProjectId, Role, UserId,
};
use serde_json::json;

mod organizations {
	use super::*;

	#[test]
	fn admin_updates_organization() {
		let admin = Ability::for_user(UserId::generate(), Role::Admin);
		let org = Subject::organization(OrgId::generate(), UserId::generate());
		assert!(admin.can(Action::Update, &org));
	}

	#[test]
	fn member_cannot_transfer_someone_elses_organization() {
		let member = Ability::for_user(UserId::generate(), Role::Member);
		let org = Subject::organization(OrgId::generate(), UserId::generate());
		assert!(member.cannot(Action::Transfer, &org));
	}

	#[test]
	fn transfer_route_flow() {
		let org_id = OrgId::generate();
		let owner = Membership::new_owner(org_id, UserId::generate());
		let target = Membership::new(org_id, UserId::generate(), Role::Member);

		let record = json!({
			"id": org_id.to_string(),
			"name": "Acme",
			"slug": "acme",
			"ownerId": owner.user_id.to_string(),
			"shouldAttachUsersByDomain": false,
		});
		let Subject::Organization(org) = Subject::from_record("Organization", &record).unwrap()
		else {
			panic!("expected an organization subject");
		};

		let plan =
			plan_ownership_transfer(&Ability::for_membership(&owner), &org, &owner, &target)
				.unwrap();
		assert_eq!(plan.new_owner, target.user_id);

		// After the change set is applied, the new owner can transfer again.
		let promoted = Membership::new_owner(org_id, target.user_id);
		let after = Subject::Organization(plan.organization_after());
		assert!(Ability::for_membership(&promoted).can(Action::Transfer, &after));
	}
}

mod projects {
	use super::*;

	#[test]
	fn member_updates_own_project() {
		let user = UserId::generate();
		let project = Subject::project(ProjectId::generate(), OrgId::generate(), user);

		assert!(Ability::for_user(user, Role::Member).can(Action::Update, &project));
		assert!(Ability::for_user(UserId::generate(), Role::Member).cannot(Action::Update, &project));
	}

	#[test]
	fn update_project_route_flow() {
		let org_id = OrgId::generate();
		let author = UserId::generate();
		let record = json!({
			"id": ProjectId::generate().to_string(),
			"name": "Website",
			"description": "Marketing site",
			"organizationId": org_id.to_string(),
			"ownerId": author.to_string(),
		});
		let project = Subject::from_record("Project", &record).unwrap();

		let author_membership = Membership::new(org_id, author, Role::Member);
		assert!(Ability::for_membership(&author_membership)
			.ensure(Action::Update, &project, "You're not allowed to update this project.")
			.is_ok());

		let colleague = Membership::new(org_id, UserId::generate(), Role::Member);
		let err = Ability::for_membership(&colleague)
			.ensure(Action::Update, &project, "You're not allowed to update this project.")
			.unwrap_err();
		assert_eq!(err.status_code(), 401);
	}

	#[test]
	fn members_stay_inside_their_tenant() {
		let home = OrgId::generate();
		let elsewhere = OrgId::generate();
		let member = Membership::new(home, UserId::generate(), Role::Member);
		let ability = Ability::for_membership(&member);

		let local = Subject::project(ProjectId::generate(), home, UserId::generate());
		let remote = Subject::project(ProjectId::generate(), elsewhere, UserId::generate());

		for action in [Action::Get, Action::Create] {
			assert!(ability.can(action, &local), "{action} in own organization");
			assert!(ability.cannot(action, &remote), "{action} in another organization");
		}
		assert!(ability.cannot(Action::Get, &Subject::organization(elsewhere, UserId::generate())));
	}
}

mod malformed_requests {
	use super::*;

	#[test]
	fn unknown_names_map_to_bad_request() {
		let errors = [
			"OWNERISH".parse::<Role>().unwrap_err(),
			"archive".parse::<Action>().unwrap_err(),
			"Workspace".parse::<SubjectKind>().unwrap_err(),
			Subject::from_record("Project", &json!({ "id": "x" })).unwrap_err(),
		];
		for err in errors {
			assert_eq!(err.status_code(), 400, "{err}");
		}
	}

	#[test]
	fn inapplicable_action_never_allows() {
		let actor = Actor::new(UserId::generate(), Role::Owner);
		for kind in SubjectKind::all() {
			let subject = sample_subject(*kind, actor.user_id);
			for action in Action::all() {
				if !describe(*kind).supports(*action) {
					assert!(!is_allowed(&actor, *action, &subject), "{action} {kind}");
					assert!(matches!(
						Ability::for_user(actor.user_id, Role::Owner).check(*action, &subject),
						Err(AuthzError::InvalidAction { .. })
					));
				}
			}
		}
	}
}

fn sample_subject(kind: SubjectKind, owner: UserId) -> Subject {
	let org_id = OrgId::generate();
	match kind {
		SubjectKind::User => Subject::user(owner),
		SubjectKind::Organization => Subject::organization(org_id, owner),
		SubjectKind::Project => Subject::project(ProjectId::generate(), org_id, owner),
		SubjectKind::Invite => {
			Subject::invite(saas_auth::InviteId::generate(), org_id).with_author(owner)
		}
		SubjectKind::Billing => Subject::billing(org_id),
	}
}
