//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Team-scoped repositories
//! take the caller's `team_id` on every call so a row from another team is
//! indistinguishable from a missing one.

pub mod costume_repo;
pub mod equipment_repo;
pub mod location_repo;
pub mod participant_repo;
pub mod personnel_repo;
pub mod prop_repo;
pub mod reference_repo;
pub mod session_repo;
pub mod shoot_repo;
pub mod shoot_resource_repo;
pub mod team_member_repo;
pub mod team_repo;
pub mod user_repo;

pub use costume_repo::CostumeRepo;
pub use equipment_repo::EquipmentRepo;
pub use location_repo::LocationRepo;
pub use participant_repo::ParticipantRepo;
pub use personnel_repo::PersonnelRepo;
pub use prop_repo::PropRepo;
pub use reference_repo::ReferenceRepo;
pub use session_repo::SessionRepo;
pub use shoot_repo::ShootRepo;
pub use shoot_resource_repo::ShootResourceRepo;
pub use team_member_repo::{MemberChange, TeamMemberRepo};
pub use team_repo::TeamRepo;
pub use user_repo::UserRepo;

/// Build an `ILIKE` pattern from a free-text search term, escaping the
/// wildcard characters. Blank terms yield `None` (no filter).
pub(crate) fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term?.trim();
    if term.is_empty() {
        return None;
    }
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(Some("wig")).as_deref(), Some("%wig%"));
        assert_eq!(like_pattern(Some("50%_off")).as_deref(), Some("%50\\%\\_off%"));
        assert_eq!(like_pattern(Some("  ")), None);
        assert_eq!(like_pattern(None), None);
    }
}
