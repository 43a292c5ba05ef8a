//! Group and membership types.

use chrono::{DateTime, Utc};

use super::{GroupId, Role, UserId};

/// Group record
#[derive(Clone, Debug)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Group membership record.
///
/// A membership row is the sole basis for authorization on a group and its
/// suggestions; at most one row exists per (group, user).
#[derive(Clone, Debug)]
pub struct Membership {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a group
#[derive(Clone, Debug)]
pub struct CreateGroupParams {
    pub name: String,
    /// Becomes the group's sole admin, atomically with the group itself.
    pub created_by: UserId,
}
