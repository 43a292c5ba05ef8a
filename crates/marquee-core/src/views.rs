//! Response shapes consumed by the presentation layer.

use marquee_storage::{Ballot, GroupId, Role, SuggestionId, TitleKind, UserId};

/// Fallback display name when a ballot references a user record that no
/// longer resolves. The store does not enforce foreign keys, so readers
/// tolerate dangling references instead of failing the whole listing.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous User";

/// A group member as shown in rosters and the voter-filter picker.
#[derive(Clone, Debug)]
pub struct MemberView {
    pub user_id: UserId,
    pub display_name: String,
    pub role: Role,
}

/// A single group with the caller's role in it.
#[derive(Clone, Debug)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,
    pub my_role: Role,
}

/// One entry of `list_my_groups`: the group plus its full roster.
#[derive(Clone, Debug)]
pub struct GroupSummary {
    pub id: GroupId,
    pub name: String,
    pub my_role: Role,
    pub members: Vec<MemberView>,
}

/// Aggregated ballot counts, possibly restricted to a member subset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteCount {
    pub want: u32,
    pub fine: u32,
    pub dont_want: u32,
}

#[derive(Clone, Debug)]
pub struct VoterView {
    pub user_id: UserId,
    pub display_name: String,
    pub ballot: Ballot,
}

/// A suggestion enriched for display: the caller's own ballot, the
/// (possibly filtered) counts, and the always-unfiltered voter list.
#[derive(Clone, Debug)]
pub struct SuggestionView {
    pub id: SuggestionId,
    pub group_id: GroupId,
    pub suggested_by: UserId,
    pub title: String,
    pub kind: TitleKind,
    pub description: Option<String>,
    pub my_vote: Option<Ballot>,
    pub vote_count: VoteCount,
    pub voters: Vec<VoterView>,
}
