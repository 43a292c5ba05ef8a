//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait `marquee-core` depends on.
///
/// All list methods return rows in stable insertion order; the core's
/// ranking relies on that as its tie-break.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Users ──────────────────────────────────────────

    /// Create a new user (returns generated ID). The email is normalized
    /// (lower-cased) before insert; duplicates map to `AlreadyExists`.
    async fn create_user(&self, params: &CreateUserParams) -> Result<UserId, StoreError>;

    /// Get user by ID.
    async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, StoreError>;

    /// Get user by email (case-insensitive).
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Batch-fetch users by ID. Missing ids are simply absent from the
    /// result; callers decide how to render dangling references.
    async fn get_users_by_ids(&self, user_ids: &[UserId]) -> Result<Vec<User>, StoreError>;

    // ───────────────────────────────────── Groups ─────────────────────────────────────────

    /// Create a group and its creator's admin membership atomically
    /// (both rows or neither).
    async fn create_group(&self, params: &CreateGroupParams) -> Result<GroupId, StoreError>;

    /// Get group by ID.
    async fn get_group(&self, group_id: &GroupId) -> Result<Group, StoreError>;

    // ─────────────────────────────────── Memberships ──────────────────────────────────────

    /// Add a membership row. `AlreadyExists` if the user is already in the
    /// group.
    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
        role: Role,
    ) -> Result<(), StoreError>;

    /// Get the membership for (group, user), `NotFound` if absent.
    async fn get_membership(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Membership, StoreError>;

    /// List all memberships of a group.
    async fn list_group_members(&self, group_id: &GroupId) -> Result<Vec<Membership>, StoreError>;

    /// List all memberships a user holds, across groups.
    async fn list_user_memberships(&self, user_id: &UserId)
        -> Result<Vec<Membership>, StoreError>;

    // ─────────────────────────────────── Suggestions ──────────────────────────────────────

    /// Create a suggestion (returns generated ID).
    async fn create_suggestion(
        &self,
        params: &CreateSuggestionParams,
    ) -> Result<SuggestionId, StoreError>;

    /// Get suggestion by ID.
    async fn get_suggestion(&self, suggestion_id: &SuggestionId)
        -> Result<Suggestion, StoreError>;

    /// List a group's suggestions in creation order.
    async fn list_group_suggestions(
        &self,
        group_id: &GroupId,
    ) -> Result<Vec<Suggestion>, StoreError>;

    // ───────────────────────────────────── Votes ──────────────────────────────────────────

    /// Insert or replace the (suggestion, user) vote. Replacing keeps the
    /// original row's position in vote listings.
    async fn upsert_vote(
        &self,
        suggestion_id: &SuggestionId,
        user_id: &UserId,
        ballot: Ballot,
    ) -> Result<(), StoreError>;

    /// List all votes on a suggestion.
    async fn list_suggestion_votes(
        &self,
        suggestion_id: &SuggestionId,
    ) -> Result<Vec<Vote>, StoreError>;
}
