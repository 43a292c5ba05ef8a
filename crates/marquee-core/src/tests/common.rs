//! Shared test helpers: service construction over in-memory SQLite plus
//! user/group/suggestion setup.

use std::sync::Arc;

use marquee_storage::{CreateUserParams, GroupId, SuggestionId, TitleKind, UserId};
use marquee_store_sqlite::SqliteStore;

use crate::{Caller, MarqueeService};

/// Test helper: create a MarqueeService with in-memory SQLite
pub async fn create_test_service() -> MarqueeService {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    MarqueeService::new(store)
}

/// Test helper: register a user through the store (the identity provider's
/// job in production) and return them as an authenticated caller.
pub async fn create_test_user(
    svc: &MarqueeService,
    name: Option<&str>,
    email: &str,
) -> Caller {
    let user_id = svc
        .store
        .create_user(&CreateUserParams {
            name: name.map(str::to_string),
            email: email.to_string(),
        })
        .await
        .unwrap();
    Caller::User(user_id)
}

pub async fn create_test_group(svc: &MarqueeService, admin: &Caller, name: &str) -> GroupId {
    svc.create_group(admin, name).await.unwrap()
}

pub async fn add_suggestion(
    svc: &MarqueeService,
    caller: &Caller,
    group_id: &GroupId,
    title: &str,
) -> SuggestionId {
    svc.suggest(caller, group_id, title, TitleKind::Movie, None)
        .await
        .unwrap()
}

pub fn user_id(caller: &Caller) -> UserId {
    caller.user_id().unwrap().clone()
}
