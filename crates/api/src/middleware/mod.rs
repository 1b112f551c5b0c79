//! Request extractors for authentication and team scoping.
//!
//! - [`auth::AuthUser`] -- the caller, from a Bearer token or `access_token` cookie.
//! - [`team::TeamContext`] -- the caller plus their resolved active team and role.
//! - [`team::RequireTeamAdmin`] -- a [`team::TeamContext`] whose role is owner or admin.

pub mod auth;
pub mod team;
