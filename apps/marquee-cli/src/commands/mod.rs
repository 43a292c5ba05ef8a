//! Command implementations organized by domain:
//! - user: register, use, current (the CLI's identity-provider half)
//! - group: create, list, show, invite, members
//! - suggestion: suggest, vote, ranked listing

pub mod group;
pub mod suggestion;
pub mod user;

use marquee_storage::{GroupId, SuggestionId};
use uuid::Uuid;

pub(crate) fn parse_group_id(s: &str) -> Result<GroupId, Box<dyn std::error::Error>> {
    Uuid::parse_str(s)
        .map(GroupId)
        .map_err(|_| format!("invalid group ID: {s}").into())
}

pub(crate) fn parse_suggestion_id(s: &str) -> Result<SuggestionId, Box<dyn std::error::Error>> {
    Uuid::parse_str(s)
        .map(SuggestionId)
        .map_err(|_| format!("invalid suggestion ID: {s}").into())
}
