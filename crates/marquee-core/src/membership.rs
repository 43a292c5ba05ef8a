//! Membership service: group creation, email invites, membership-scoped
//! reads, and the authorization primitive everything else leans on.

use std::collections::HashMap;

use tracing::info;

use marquee_storage::{
    CreateGroupParams, GroupId, Membership, Role, StoreError, User, UserId,
};

use crate::views::{GroupInfo, GroupSummary, MemberView, ANONYMOUS_DISPLAY_NAME};
use crate::{Caller, CoreError, MarqueeService};

/// The fail-closed authorization gate: every group-scoped operation goes
/// through here first. Absence of a membership row is the only source of
/// truth; there is no public or guest access level.
pub(crate) async fn require_membership(
    svc: &MarqueeService,
    user_id: &UserId,
    group_id: &GroupId,
) -> Result<Membership, CoreError> {
    match svc.store.get_membership(group_id, user_id).await {
        Ok(membership) => Ok(membership),
        Err(StoreError::NotFound) => Err(CoreError::NotAMember),
        Err(e) => Err(CoreError::Storage(e)),
    }
}

/// Resolve display names for a set of users in one batched lookup.
/// Display name is the user's name when present, else their email.
pub(crate) async fn display_names(
    svc: &MarqueeService,
    user_ids: &[UserId],
) -> Result<HashMap<UserId, String>, CoreError> {
    let users = svc.store.get_users_by_ids(user_ids).await?;
    Ok(users
        .into_iter()
        .map(|user| {
            let User { id, name, email, .. } = user;
            (id, name.unwrap_or(email))
        })
        .collect())
}

pub(crate) fn member_views(
    members: Vec<Membership>,
    names: &HashMap<UserId, String>,
) -> Vec<MemberView> {
    members
        .into_iter()
        .map(|member| MemberView {
            display_name: names
                .get(&member.user_id)
                .cloned()
                .unwrap_or_else(|| ANONYMOUS_DISPLAY_NAME.to_string()),
            user_id: member.user_id,
            role: member.role,
        })
        .collect()
}

/// Create a group; the caller becomes its sole admin, atomically with the
/// group itself.
pub async fn create_group(
    svc: &MarqueeService,
    caller: &Caller,
    name: &str,
) -> Result<GroupId, CoreError> {
    let user_id = caller.user_id()?;

    let group_id = svc
        .store
        .create_group(&CreateGroupParams {
            name: name.to_string(),
            created_by: user_id.clone(),
        })
        .await?;

    info!(group = %group_id.0, "group created");
    Ok(group_id)
}

/// Invite a registered user into a group by email.
///
/// Checks run in order and each failure aborts before any write: the
/// caller must be an admin of the group, the invitee must exist (email
/// matching is case-insensitive), and the invitee must not already be a
/// member.
pub async fn invite(
    svc: &MarqueeService,
    caller: &Caller,
    group_id: &GroupId,
    email: &str,
) -> Result<(), CoreError> {
    let user_id = caller.user_id()?;

    // A plain membership is not enough to invite.
    match svc.store.get_membership(group_id, user_id).await {
        Ok(membership) if membership.role == Role::Admin => {}
        Ok(_) => return Err(CoreError::NotAuthorized),
        Err(StoreError::NotFound) => return Err(CoreError::NotAuthorized),
        Err(e) => return Err(CoreError::Storage(e)),
    }

    let invitee = match svc.store.get_user_by_email(email).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => return Err(CoreError::NotFound("user")),
        Err(e) => return Err(CoreError::Storage(e)),
    };

    match svc.store.get_membership(group_id, &invitee.id).await {
        Ok(_) => return Err(CoreError::AlreadyExists("membership")),
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(CoreError::Storage(e)),
    }

    match svc
        .store
        .add_member(group_id, &invitee.id, Role::Member)
        .await
    {
        Ok(()) => {}
        Err(StoreError::AlreadyExists) => return Err(CoreError::AlreadyExists("membership")),
        Err(e) => return Err(CoreError::Storage(e)),
    }

    info!(group = %group_id.0, user = %invitee.id.0, "member invited");
    Ok(())
}

/// Every group the caller belongs to, with the full roster of each, in
/// the order the caller joined them.
pub async fn list_my_groups(
    svc: &MarqueeService,
    caller: &Caller,
) -> Result<Vec<GroupSummary>, CoreError> {
    let user_id = caller.user_id()?;
    let memberships = svc.store.list_user_memberships(user_id).await?;

    let mut summaries = Vec::with_capacity(memberships.len());
    for membership in memberships {
        let group = match svc.store.get_group(&membership.group_id).await {
            Ok(group) => group,
            Err(StoreError::NotFound) => return Err(CoreError::NotFound("group")),
            Err(e) => return Err(CoreError::Storage(e)),
        };

        let members = svc.store.list_group_members(&group.id).await?;
        let member_ids: Vec<UserId> = members.iter().map(|m| m.user_id.clone()).collect();
        let names = display_names(svc, &member_ids).await?;

        summaries.push(GroupSummary {
            id: group.id,
            name: group.name,
            my_role: membership.role,
            members: member_views(members, &names),
        });
    }
    Ok(summaries)
}

/// Group name plus the caller's role; membership required.
pub async fn get_group(
    svc: &MarqueeService,
    caller: &Caller,
    group_id: &GroupId,
) -> Result<GroupInfo, CoreError> {
    let user_id = caller.user_id()?;
    let membership = require_membership(svc, user_id, group_id).await?;

    let group = match svc.store.get_group(group_id).await {
        Ok(group) => group,
        Err(StoreError::NotFound) => return Err(CoreError::NotFound("group")),
        Err(e) => return Err(CoreError::Storage(e)),
    };

    Ok(GroupInfo {
        id: group.id,
        name: group.name,
        my_role: membership.role,
    })
}
