// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property tests over the built-in policy table.

use proptest::prelude::*;
use proptest::sample::select;
use saas_auth::abac::{describe, Ability, Action, Actor, PolicyTable, Subject, SubjectKind};
use saas_auth::{InviteId, OrgId, ProjectId, Role, UserId};
use uuid::Uuid;

fn user_id() -> impl Strategy<Value = UserId> {
	any::<u128>().prop_map(|n| UserId::new(Uuid::from_u128(n)))
}

fn org_id() -> impl Strategy<Value = OrgId> {
	any::<u128>().prop_map(|n| OrgId::new(Uuid::from_u128(n)))
}

fn subject() -> impl Strategy<Value = Subject> {
	(select(SubjectKind::all()), any::<u128>(), org_id(), user_id(), any::<bool>()).prop_map(
		|(kind, id, org_id, owner, authored)| {
			let id = Uuid::from_u128(id);
			match kind {
				SubjectKind::User => Subject::user(id.into()),
				SubjectKind::Organization => Subject::organization(id.into(), owner),
				SubjectKind::Project => Subject::project(ProjectId::new(id), org_id, owner),
				SubjectKind::Invite if authored => {
					Subject::invite(InviteId::new(id), org_id).with_author(owner)
				}
				SubjectKind::Invite => Subject::invite(InviteId::new(id), org_id),
				SubjectKind::Billing => Subject::billing(org_id),
			}
		},
	)
}

fn actor() -> impl Strategy<Value = Actor> {
	(user_id(), select(Role::all()), proptest::option::of(org_id())).prop_map(
		|(user_id, role, org)| {
			let actor = Actor::new(user_id, role);
			match org {
				Some(org_id) => actor.in_organization(org_id),
				None => actor,
			}
		},
	)
}

proptest! {
	/// The owner role is allowed every applicable action on every subject.
	#[test]
	fn owner_always_allowed(user in user_id(), subject in subject(), action in select(Action::all())) {
		prop_assume!(describe(subject.kind()).supports(action));
		prop_assert!(Ability::for_user(user, Role::Owner).can(action, &subject));
	}

	/// Without a matching grant there is no allow.
	#[test]
	fn no_grant_means_deny(actor in actor(), subject in subject(), action in select(Action::all())) {
		let grants = PolicyTable::standard().grants_for(actor.role).unwrap();
		let has_grant = grants.iter().any(|g| g.matches(action, subject.kind()));
		prop_assume!(!has_grant);
		prop_assert!(Ability::new(PolicyTable::standard(), actor).cannot(action, &subject));
	}

	/// Evaluation is a pure function of its inputs.
	#[test]
	fn evaluation_is_idempotent(actor in actor(), subject in subject(), action in select(Action::all())) {
		let ability = Ability::new(PolicyTable::standard(), actor);
		prop_assert_eq!(ability.check(action, &subject), ability.check(action, &subject));
		prop_assert_eq!(ability.can(action, &subject), ability.can(action, &subject));
	}

	/// `cannot` is exactly the negation of `can`.
	#[test]
	fn cannot_negates_can(actor in actor(), subject in subject(), action in select(Action::all())) {
		let ability = Ability::new(PolicyTable::standard(), actor);
		prop_assert_eq!(ability.cannot(action, &subject), !ability.can(action, &subject));
	}

	/// A member may update a project iff they own it.
	#[test]
	fn member_project_update_follows_ownership(
		actor_id in user_id(),
		owner in user_id(),
		org in org_id(),
		project_id in any::<u128>(),
	) {
		let project = Subject::project(ProjectId::new(Uuid::from_u128(project_id)), org, owner);
		let allowed = Ability::for_user(actor_id, Role::Member).can(Action::Update, &project);
		prop_assert_eq!(allowed, actor_id == owner);
	}

	/// Actions outside a kind's valid set never allow, for any role.
	#[test]
	fn inapplicable_actions_fail_closed(actor in actor(), subject in subject(), action in select(Action::all())) {
		prop_assume!(!describe(subject.kind()).supports(action));
		let ability = Ability::new(PolicyTable::standard(), actor);
		prop_assert!(ability.cannot(action, &subject));
		prop_assert!(ability.check(action, &subject).is_err());
	}

	/// An allow always names a grant of the actor's role that covers the request.
	#[test]
	fn allow_names_a_covering_grant(actor in actor(), subject in subject(), action in select(Action::all())) {
		let ability = Ability::new(PolicyTable::standard(), actor);
		if let Ok(decision) = ability.check(action, &subject) {
			if let saas_auth::DecisionReason::Granted { grant } = decision.reason {
				prop_assert!(decision.allowed);
				prop_assert_eq!(grant.role, actor.role);
				prop_assert!(grant.matches(action, subject.kind()));
			} else {
				prop_assert!(!decision.allowed);
			}
		}
	}
}
