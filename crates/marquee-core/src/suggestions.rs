//! Suggestion service: proposal creation and the enriched, ranked listing.

use tracing::info;

use marquee_storage::{CreateSuggestionParams, GroupId, SuggestionId, TitleKind, UserId};

use crate::membership::{display_names, member_views, require_membership};
use crate::views::{MemberView, SuggestionView, VoterView, ANONYMOUS_DISPLAY_NAME};
use crate::voting;
use crate::{Caller, CoreError, MarqueeService};

/// Propose a movie or TV title to a group. Duplicate titles are allowed.
pub async fn suggest(
    svc: &MarqueeService,
    caller: &Caller,
    group_id: &GroupId,
    title: &str,
    kind: TitleKind,
    description: Option<String>,
) -> Result<SuggestionId, CoreError> {
    let user_id = caller.user_id()?;
    require_membership(svc, user_id, group_id).await?;

    let suggestion_id = svc
        .store
        .create_suggestion(&CreateSuggestionParams {
            group_id: group_id.clone(),
            suggested_by: user_id.clone(),
            title: title.to_string(),
            kind,
            description,
        })
        .await?;

    info!(group = %group_id.0, suggestion = %suggestion_id.0, "suggestion added");
    Ok(suggestion_id)
}

/// List a group's suggestions, enriched and ranked.
///
/// `selected_user_ids` narrows the aggregate counts (empty = everyone);
/// the voter list always covers every ballot so non-selected voters can
/// be dimmed in presentation rather than hidden.
pub async fn list(
    svc: &MarqueeService,
    caller: &Caller,
    group_id: &GroupId,
    selected_user_ids: &[UserId],
) -> Result<Vec<SuggestionView>, CoreError> {
    let user_id = caller.user_id()?;
    require_membership(svc, user_id, group_id).await?;

    let suggestions = svc.store.list_group_suggestions(group_id).await?;

    let mut votes_per_suggestion = Vec::with_capacity(suggestions.len());
    let mut voter_ids: Vec<UserId> = Vec::new();
    for suggestion in &suggestions {
        let votes = svc.store.list_suggestion_votes(&suggestion.id).await?;
        for vote in &votes {
            if !voter_ids.contains(&vote.user_id) {
                voter_ids.push(vote.user_id.clone());
            }
        }
        votes_per_suggestion.push(votes);
    }
    // One batched lookup covers every voter in the listing.
    let names = display_names(svc, &voter_ids).await?;

    let mut views = Vec::with_capacity(suggestions.len());
    for (suggestion, votes) in suggestions.into_iter().zip(votes_per_suggestion) {
        let my_vote = votes
            .iter()
            .find(|vote| vote.user_id == *user_id)
            .map(|vote| vote.ballot);
        let vote_count = voting::tally(&votes, selected_user_ids);

        let voters = votes
            .into_iter()
            .map(|vote| VoterView {
                display_name: names
                    .get(&vote.user_id)
                    .cloned()
                    .unwrap_or_else(|| ANONYMOUS_DISPLAY_NAME.to_string()),
                user_id: vote.user_id,
                ballot: vote.ballot,
            })
            .collect();

        views.push(SuggestionView {
            id: suggestion.id,
            group_id: suggestion.group_id,
            suggested_by: suggestion.suggested_by,
            title: suggestion.title,
            kind: suggestion.kind,
            description: suggestion.description,
            my_vote,
            vote_count,
            voters,
        });
    }

    voting::rank(&mut views);
    Ok(views)
}

/// The group roster, for display and for the voter-filter picker.
pub async fn list_group_members(
    svc: &MarqueeService,
    caller: &Caller,
    group_id: &GroupId,
) -> Result<Vec<MemberView>, CoreError> {
    let user_id = caller.user_id()?;
    require_membership(svc, user_id, group_id).await?;

    let members = svc.store.list_group_members(group_id).await?;
    let member_ids: Vec<UserId> = members.iter().map(|m| m.user_id.clone()).collect();
    let names = display_names(svc, &member_ids).await?;

    Ok(member_views(members, &names))
}
