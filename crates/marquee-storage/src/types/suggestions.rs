//! Suggestion types.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{GroupId, SuggestionId, UserId};

/// What kind of title a suggestion proposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TitleKind {
    Movie,
    Tv,
}

/// Error type for parsing TitleKind from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTitleKindError(pub String);

impl std::fmt::Display for ParseTitleKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid title kind: {}", self.0)
    }
}

impl std::error::Error for ParseTitleKindError {}

impl FromStr for TitleKind {
    type Err = ParseTitleKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(TitleKind::Movie),
            "tv" => Ok(TitleKind::Tv),
            _ => Err(ParseTitleKindError(s.to_string())),
        }
    }
}

impl TitleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Tv => "tv",
        }
    }
}

/// Suggestion record. Immutable once created; duplicate titles are allowed.
#[derive(Clone, Debug)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub group_id: GroupId,
    pub suggested_by: UserId,
    pub title: String,
    pub kind: TitleKind,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a suggestion
#[derive(Clone, Debug)]
pub struct CreateSuggestionParams {
    pub group_id: GroupId,
    pub suggested_by: UserId,
    pub title: String,
    pub kind: TitleKind,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_kind_parse_roundtrip() {
        for kind in [TitleKind::Movie, TitleKind::Tv] {
            assert_eq!(kind.as_str().parse::<TitleKind>().unwrap(), kind);
        }
    }

    #[test]
    fn title_kind_parse_rejects_unknown() {
        assert!("series".parse::<TitleKind>().is_err());
    }
}
