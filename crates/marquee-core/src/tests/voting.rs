//! Voting service tests: the upsert invariant and fail-closed gating.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use marquee_storage::{
    Ballot, GroupId, MockStore, StoreError, Suggestion, SuggestionId, TitleKind, UserId,
};

use super::common::*;
use crate::{Caller, CoreError, MarqueeService, VoteCount};

#[tokio::test]
async fn revoting_replaces_the_single_vote_row() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;
    let s = add_suggestion(&svc, &alice, &group_id, "s").await;

    svc.cast_vote(&alice, &s, Ballot::Want).await.unwrap();
    svc.cast_vote(&alice, &s, Ballot::Fine).await.unwrap();
    svc.cast_vote(&alice, &s, Ballot::DontWant).await.unwrap();

    let votes = svc.store.list_suggestion_votes(&s).await.unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].user_id, user_id(&alice));
    assert_eq!(votes[0].ballot, Ballot::DontWant);

    let listed = svc.list_suggestions(&alice, &group_id, &[]).await.unwrap();
    assert_eq!(
        listed[0].vote_count,
        VoteCount {
            want: 0,
            fine: 0,
            dont_want: 1
        }
    );
    assert_eq!(listed[0].my_vote, Some(Ballot::DontWant));
}

#[tokio::test]
async fn recasting_the_same_ballot_keeps_one_row() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;
    let s = add_suggestion(&svc, &alice, &group_id, "s").await;

    svc.cast_vote(&alice, &s, Ballot::Want).await.unwrap();
    svc.cast_vote(&alice, &s, Ballot::Want).await.unwrap();

    let votes = svc.store.list_suggestion_votes(&s).await.unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].ballot, Ballot::Want);
}

#[tokio::test]
async fn voting_on_unknown_suggestion_is_not_found() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;

    let ghost = SuggestionId(Uuid::new_v4());
    let err = svc.cast_vote(&alice, &ghost, Ballot::Want).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound("suggestion")));
}

#[tokio::test]
async fn voting_requires_membership() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let mallory = create_test_user(&svc, None, "mallory@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;
    let s = add_suggestion(&svc, &alice, &group_id, "s").await;

    let err = svc.cast_vote(&mallory, &s, Ballot::Want).await.unwrap_err();
    assert!(matches!(err, CoreError::NotAMember));
    assert!(svc.store.list_suggestion_votes(&s).await.unwrap().is_empty());
}

#[tokio::test]
async fn anonymous_vote_is_rejected() {
    let svc = create_test_service().await;
    let alice = create_test_user(&svc, Some("Alice"), "alice@example.com").await;
    let group_id = create_test_group(&svc, &alice, "g").await;
    let s = add_suggestion(&svc, &alice, &group_id, "s").await;

    let err = svc
        .cast_vote(&Caller::Anonymous, &s, Ballot::Want)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotAuthenticated));
}

/// Mock-store variant of the gating test: with no `upsert_vote`
/// expectation configured, any write attempt panics, so passing proves
/// the rejected call touched nothing.
#[tokio::test]
async fn rejected_vote_never_reaches_the_store_write() {
    let caller_id = UserId(Uuid::new_v4());
    let suggestion_id = SuggestionId(Uuid::new_v4());
    let suggestion = Suggestion {
        id: suggestion_id.clone(),
        group_id: GroupId(Uuid::new_v4()),
        suggested_by: caller_id.clone(),
        title: "s".to_string(),
        kind: TitleKind::Movie,
        description: None,
        created_at: Utc::now(),
    };

    let mut store = MockStore::new();
    store
        .expect_get_suggestion()
        .returning(move |_| Ok(suggestion.clone()));
    store
        .expect_get_membership()
        .returning(|_, _| Err(StoreError::NotFound));

    let svc = MarqueeService::new(Arc::new(store));
    let err = svc
        .cast_vote(&Caller::User(caller_id), &suggestion_id, Ballot::Want)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotAMember));
}
