//! Authorization + aggregation core for marquee.
//!
//! Groups, email invites, movie/TV suggestions, and one-ballot-per-member
//! voting, behind a single rule: every group-scoped read or write passes a
//! membership check before touching any record. The storage engine is
//! injected via [`marquee_storage::Store`], identity resolution is the
//! caller's problem ([`Caller`]), and the presentation layer consumes the
//! view types in [`views`].

pub mod membership;
pub mod suggestions;
pub mod views;
pub mod voting;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use thiserror::Error;

use marquee_storage::{Ballot, GroupId, Store, StoreError, SuggestionId, TitleKind, UserId};

pub use views::{GroupInfo, GroupSummary, MemberView, SuggestionView, VoteCount, VoterView};

/// Rejection taxonomy for core operations.
///
/// Every variant is a terminal outcome of a single operation; a rejection
/// leaves no partial writes behind.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("not authorized")]
    NotAuthorized,
    #[error("not a member of this group")]
    NotAMember,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Caller identity as resolved by the external authentication collaborator.
///
/// The core never inspects credentials; it only receives the outcome of
/// authentication and rejects anonymous callers up front.
#[derive(Clone, Debug)]
pub enum Caller {
    /// No identity could be resolved.
    Anonymous,
    /// Authenticated as the given user.
    User(UserId),
}

impl Caller {
    /// The authenticated user id, or `NotAuthenticated`.
    pub fn user_id(&self) -> Result<&UserId, CoreError> {
        match self {
            Caller::User(user_id) => Ok(user_id),
            Caller::Anonymous => Err(CoreError::NotAuthenticated),
        }
    }
}

/// The operation surface the presentation layer calls into.
#[derive(Clone)]
pub struct MarqueeService {
    pub store: Arc<dyn Store>,
}

impl MarqueeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    // ───────────────────────────────── Membership ─────────────────────────────────

    pub async fn create_group(&self, caller: &Caller, name: &str) -> Result<GroupId, CoreError> {
        membership::create_group(self, caller, name).await
    }

    pub async fn invite(
        &self,
        caller: &Caller,
        group_id: &GroupId,
        email: &str,
    ) -> Result<(), CoreError> {
        membership::invite(self, caller, group_id, email).await
    }

    pub async fn list_my_groups(&self, caller: &Caller) -> Result<Vec<GroupSummary>, CoreError> {
        membership::list_my_groups(self, caller).await
    }

    pub async fn get_group(
        &self,
        caller: &Caller,
        group_id: &GroupId,
    ) -> Result<GroupInfo, CoreError> {
        membership::get_group(self, caller, group_id).await
    }

    // ──────────────────────────────── Suggestions ─────────────────────────────────

    pub async fn suggest(
        &self,
        caller: &Caller,
        group_id: &GroupId,
        title: &str,
        kind: TitleKind,
        description: Option<String>,
    ) -> Result<SuggestionId, CoreError> {
        suggestions::suggest(self, caller, group_id, title, kind, description).await
    }

    /// Ranked, enriched suggestion listing. `selected_user_ids` narrows the
    /// aggregate counts only (empty = everyone).
    pub async fn list_suggestions(
        &self,
        caller: &Caller,
        group_id: &GroupId,
        selected_user_ids: &[UserId],
    ) -> Result<Vec<SuggestionView>, CoreError> {
        suggestions::list(self, caller, group_id, selected_user_ids).await
    }

    pub async fn list_group_members(
        &self,
        caller: &Caller,
        group_id: &GroupId,
    ) -> Result<Vec<MemberView>, CoreError> {
        suggestions::list_group_members(self, caller, group_id).await
    }

    // ─────────────────────────────────── Voting ───────────────────────────────────

    pub async fn cast_vote(
        &self,
        caller: &Caller,
        suggestion_id: &SuggestionId,
        ballot: Ballot,
    ) -> Result<(), CoreError> {
        voting::cast_vote(self, caller, suggestion_id, ballot).await
    }
}
