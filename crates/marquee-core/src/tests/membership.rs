//! Membership service tests: group creation, invites, roster reads.

use marquee_storage::Role;

use super::common::*;
use crate::{Caller, CoreError};

#[tokio::test]
async fn create_group_makes_creator_sole_admin() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;

    let group_id = create_test_group(&svc, &alice, "movie night").await;

    let members = svc.list_group_members(&alice, &group_id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, user_id(&alice));
    assert_eq!(members[0].role, Role::Admin);

    let info = svc.get_group(&alice, &group_id).await.unwrap();
    assert_eq!(info.name, "movie night");
    assert_eq!(info.my_role, Role::Admin);
}

#[tokio::test]
async fn invite_adds_member_and_rejects_duplicate() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let _bob = create_test_user(&svc, None, "bob@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;

    svc.invite(&alice, &group_id, "bob@example.com")
        .await
        .unwrap();
    assert_eq!(svc.list_group_members(&alice, &group_id).await.unwrap().len(), 2);

    let err = svc
        .invite(&alice, &group_id, "bob@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::AlreadyExists(_)));
    // still exactly one membership row for bob
    assert_eq!(svc.list_group_members(&alice, &group_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn invite_matches_email_case_insensitively() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let _bob = create_test_user(&svc, None, "user@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;

    svc.invite(&alice, &group_id, "USER@Example.com")
        .await
        .unwrap();
    assert_eq!(svc.list_group_members(&alice, &group_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn invite_requires_admin_role() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let bob = create_test_user(&svc, None, "bob@example.com").await;
    let _carol = create_test_user(&svc, None, "carol@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;
    svc.invite(&alice, &group_id, "bob@example.com")
        .await
        .unwrap();

    let err = svc
        .invite(&bob, &group_id, "carol@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotAuthorized));
    assert_eq!(svc.list_group_members(&alice, &group_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn invite_by_outsider_is_rejected_with_no_writes() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let dave = create_test_user(&svc, None, "dave@example.com").await;
    let _carol = create_test_user(&svc, None, "carol@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;

    let err = svc
        .invite(&dave, &group_id, "carol@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotAuthorized));
    assert_eq!(svc.list_group_members(&alice, &group_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn invite_unknown_email_is_not_found() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;

    let err = svc
        .invite(&alice, &group_id, "nobody@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound("user")));
}

#[tokio::test]
async fn list_my_groups_shows_roles_and_rosters() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let bob = create_test_user(&svc, None, "bob@example.com").await;

    let g1 = create_test_group(&svc, &alice, "alice's picks").await;
    let g2 = create_test_group(&svc, &bob, "bob's picks").await;
    svc.invite(&bob, &g2, "alice@example.com").await.unwrap();

    let groups = svc.list_my_groups(&alice).await.unwrap();
    assert_eq!(groups.len(), 2);

    // join order: own group first, then the one joined by invite
    assert_eq!(groups[0].id, g1);
    assert_eq!(groups[0].my_role, Role::Admin);
    assert_eq!(groups[0].members.len(), 1);
    assert_eq!(groups[0].members[0].display_name, "Alice");

    assert_eq!(groups[1].id, g2);
    assert_eq!(groups[1].my_role, Role::Member);
    let names: Vec<&str> = groups[1]
        .members
        .iter()
        .map(|m| m.display_name.as_str())
        .collect();
    // bob has no name set, so his email stands in
    assert_eq!(names, vec!["bob@example.com", "Alice"]);
}

#[tokio::test]
async fn get_group_requires_membership() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let mallory = create_test_user(&svc, None, "mallory@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;

    let err = svc.get_group(&mallory, &group_id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotAMember));
}

#[tokio::test]
async fn anonymous_callers_are_rejected() {
    let svc = create_test_service().await;

    let err = svc.create_group(&Caller::Anonymous, "g").await.unwrap_err();
    assert!(matches!(err, CoreError::NotAuthenticated));

    let err = svc.list_my_groups(&Caller::Anonymous).await.unwrap_err();
    assert!(matches!(err, CoreError::NotAuthenticated));
}
