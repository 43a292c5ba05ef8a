//! Vote types.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{SuggestionId, UserId};

/// A member's current preference on a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ballot {
    Want,
    Fine,
    DontWant,
}

/// Error type for parsing Ballot from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBallotError(pub String);

impl std::fmt::Display for ParseBallotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid ballot: {}", self.0)
    }
}

impl std::error::Error for ParseBallotError {}

impl FromStr for Ballot {
    type Err = ParseBallotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "want" => Ok(Ballot::Want),
            "fine" => Ok(Ballot::Fine),
            "dont_want" => Ok(Ballot::DontWant),
            _ => Err(ParseBallotError(s.to_string())),
        }
    }
}

impl Ballot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ballot::Want => "want",
            Ballot::Fine => "fine",
            Ballot::DontWant => "dont_want",
        }
    }
}

/// Vote record.
///
/// At most one row per (suggestion, user); casting again replaces the
/// ballot in place.
#[derive(Clone, Debug)]
pub struct Vote {
    pub suggestion_id: SuggestionId,
    pub user_id: UserId,
    pub ballot: Ballot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
