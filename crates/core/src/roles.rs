//! Team membership roles and the permission rules built on them.
//!
//! Role names must match the `chk_team_members_role` constraint in
//! `20260301000003_create_team_members.sql`.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

/// All assignable team roles, most privileged first.
pub const VALID_TEAM_ROLES: &[&str] = &[ROLE_OWNER, ROLE_ADMIN, ROLE_MEMBER];

/// Returns `true` if `role` is one of [`VALID_TEAM_ROLES`].
pub fn is_valid_team_role(role: &str) -> bool {
    VALID_TEAM_ROLES.contains(&role)
}

/// Owners and admins may rename the team and manage its membership.
pub fn can_manage_team(role: &str) -> bool {
    role == ROLE_OWNER || role == ROLE_ADMIN
}

/// Whether a member with `actor_role` may move another member from
/// `current_role` to `new_role`.
///
/// Only owners touch the owner role, in either direction.
pub fn can_change_role(actor_role: &str, current_role: &str, new_role: &str) -> bool {
    if !can_manage_team(actor_role) {
        return false;
    }
    if current_role == ROLE_OWNER || new_role == ROLE_OWNER {
        return actor_role == ROLE_OWNER;
    }
    true
}

/// Whether removing or demoting a member with `role` would leave the team
/// without an owner, given the current `owner_count`.
pub fn would_orphan_team(role: &str, owner_count: i64) -> bool {
    role == ROLE_OWNER && owner_count <= 1
}
