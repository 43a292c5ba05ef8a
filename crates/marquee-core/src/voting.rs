//! Voting service: ballot upsert plus the aggregation and ranking rules.

use tracing::debug;

use marquee_storage::{Ballot, StoreError, SuggestionId, UserId, Vote};

use crate::membership::require_membership;
use crate::views::{SuggestionView, VoteCount};
use crate::{Caller, CoreError, MarqueeService};

/// Record the caller's current preference on a suggestion.
///
/// Upsert, never append: re-voting replaces the ballot for the
/// (caller, suggestion) pair, and there is no retraction. Re-casting the
/// same ballot is a no-op in effect but still performs the write.
pub async fn cast_vote(
    svc: &MarqueeService,
    caller: &Caller,
    suggestion_id: &SuggestionId,
    ballot: Ballot,
) -> Result<(), CoreError> {
    let user_id = caller.user_id()?;

    let suggestion = match svc.store.get_suggestion(suggestion_id).await {
        Ok(suggestion) => suggestion,
        Err(StoreError::NotFound) => return Err(CoreError::NotFound("suggestion")),
        Err(e) => return Err(CoreError::Storage(e)),
    };
    require_membership(svc, user_id, &suggestion.group_id).await?;

    svc.store.upsert_vote(suggestion_id, user_id, ballot).await?;

    debug!(
        suggestion = %suggestion_id.0,
        user = %user_id.0,
        ballot = ballot.as_str(),
        "ballot recorded"
    );
    Ok(())
}

/// Count ballots, restricted to `selected_user_ids` when non-empty.
pub(crate) fn tally(votes: &[Vote], selected_user_ids: &[UserId]) -> VoteCount {
    let mut count = VoteCount::default();
    for vote in votes {
        if !selected_user_ids.is_empty() && !selected_user_ids.contains(&vote.user_id) {
            continue;
        }
        match vote.ballot {
            Ballot::Want => count.want += 1,
            Ballot::Fine => count.fine += 1,
            Ballot::DontWant => count.dont_want += 1,
        }
    }
    count
}

/// Order suggestions least-objectionable first: ascending `dont_want`,
/// then descending `want`. The sort is stable, so creation order breaks
/// any remaining ties.
pub(crate) fn rank(views: &mut [SuggestionView]) {
    views.sort_by(|a, b| {
        a.vote_count
            .dont_want
            .cmp(&b.vote_count.dont_want)
            .then_with(|| b.vote_count.want.cmp(&a.vote_count.want))
    });
}
