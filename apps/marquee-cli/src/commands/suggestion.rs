//! Suggestion commands: propose, vote, and the ranked listing.

use marquee_core::{Caller, MarqueeService};
use marquee_storage::{Ballot, StoreError, TitleKind, UserId};

use super::{parse_group_id, parse_suggestion_id};

pub async fn cmd_suggest(
    svc: &MarqueeService,
    caller: &Caller,
    group: &str,
    title: String,
    kind: String,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let group_id = parse_group_id(group)?;
    let kind: TitleKind = kind.parse()?;

    let suggestion_id = svc
        .suggest(caller, &group_id, &title, kind, description)
        .await?;

    println!("✓ Suggested {title} [{}]", kind.as_str());
    println!("  ID: {}", suggestion_id.0);
    Ok(())
}

pub async fn cmd_vote(
    svc: &MarqueeService,
    caller: &Caller,
    suggestion: &str,
    ballot: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let suggestion_id = parse_suggestion_id(suggestion)?;
    let ballot: Ballot = ballot.parse()?;

    svc.cast_vote(caller, &suggestion_id, ballot).await?;

    println!("✓ Vote recorded: {}", ballot.as_str());
    Ok(())
}

pub async fn cmd_suggestions(
    svc: &MarqueeService,
    caller: &Caller,
    group: &str,
    voters: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let group_id = parse_group_id(group)?;

    // resolve the "who's watching tonight" selection to user ids
    let mut selected: Vec<UserId> = Vec::with_capacity(voters.len());
    for email in &voters {
        match svc.store.get_user_by_email(email).await {
            Ok(user) => selected.push(user.id),
            Err(StoreError::NotFound) => {
                return Err(format!("no registered user with email {email}").into())
            }
            Err(e) => return Err(e.into()),
        }
    }

    let listed = svc.list_suggestions(caller, &group_id, &selected).await?;

    if listed.is_empty() {
        println!("No suggestions yet");
        return Ok(());
    }

    for (position, suggestion) in listed.iter().enumerate() {
        println!(
            "{}. {} [{}]",
            position + 1,
            suggestion.title,
            suggestion.kind.as_str()
        );
        if let Some(description) = &suggestion.description {
            println!("   {description}");
        }
        println!(
            "   want {} · fine {} · dont_want {}",
            suggestion.vote_count.want, suggestion.vote_count.fine, suggestion.vote_count.dont_want
        );
        if let Some(ballot) = suggestion.my_vote {
            println!("   your vote: {}", ballot.as_str());
        }
        if !suggestion.voters.is_empty() {
            let entries: Vec<String> = suggestion
                .voters
                .iter()
                .map(|v| format!("{} ({})", v.display_name, v.ballot.as_str()))
                .collect();
            println!("   voters: {}", entries.join(", "));
        }
        println!("   ID: {}", suggestion.id.0);
    }
    Ok(())
}
