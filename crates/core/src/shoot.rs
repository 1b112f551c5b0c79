//! Shoot lifecycle: the kanban columns a shoot moves through.
//!
//! Status strings must match the `chk_shoots_status` constraint in
//! `20260301000004_create_shoots.sql`.

use chrono::NaiveTime;

pub const STATUS_IDEA: &str = "idea";
pub const STATUS_PLANNING: &str = "planning";
pub const STATUS_READY: &str = "ready-to-shoot";
pub const STATUS_COMPLETED: &str = "completed";

/// Board columns in display order. New shoots start in the first column.
pub const BOARD_COLUMNS: &[&str] = &[
    STATUS_IDEA,
    STATUS_PLANNING,
    STATUS_READY,
    STATUS_COMPLETED,
];

/// Status assigned when a create request omits one.
pub const DEFAULT_STATUS: &str = STATUS_IDEA;

/// Returns `true` if `status` names a board column.
pub fn is_valid_status(status: &str) -> bool {
    BOARD_COLUMNS.contains(&status)
}

/// The column after `status`, or `None` for the last column and for unknown
/// statuses.
pub fn next_status(status: &str) -> Option<&'static str> {
    let idx = BOARD_COLUMNS.iter().position(|s| *s == status)?;
    BOARD_COLUMNS.get(idx + 1).copied()
}

/// Clamp a requested card position into `0..=len`, where `len` is the number
/// of cards already in the destination column. `None` means "append".
pub fn clamp_position(requested: Option<i32>, len: i32) -> i32 {
    match requested {
        Some(p) if p < 0 => 0,
        Some(p) if p > len => len,
        Some(p) => p,
        None => len,
    }
}

/// Reject a time window whose end precedes its start.
pub fn validate_time_window(
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Result<(), String> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(format!(
            "end_time {e} must not be earlier than start_time {s}"
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert!(is_valid_status("idea"));
        assert!(is_valid_status("ready-to-shoot"));
        assert!(!is_valid_status("ready_to_shoot"));
        assert!(!is_valid_status("done"));
    }

    #[test]
    fn advance_through_board() {
        assert_eq!(next_status(STATUS_IDEA), Some(STATUS_PLANNING));
        assert_eq!(next_status(STATUS_PLANNING), Some(STATUS_READY));
        assert_eq!(next_status(STATUS_READY), Some(STATUS_COMPLETED));
        assert_eq!(next_status(STATUS_COMPLETED), None);
        assert_eq!(next_status("bogus"), None);
    }

    #[test]
    fn default_is_first_column() {
        assert_eq!(DEFAULT_STATUS, BOARD_COLUMNS[0]);
    }

    #[test]
    fn position_clamping() {
        assert_eq!(clamp_position(None, 3), 3);
        assert_eq!(clamp_position(Some(-4), 3), 0);
        assert_eq!(clamp_position(Some(10), 3), 3);
        assert_eq!(clamp_position(Some(1), 3), 1);
        assert_eq!(clamp_position(Some(0), 0), 0);
    }

    #[test]
    fn time_window() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0);
        let noon = NaiveTime::from_hms_opt(12, 0, 0);
        assert!(validate_time_window(nine, noon).is_ok());
        assert!(validate_time_window(nine, nine).is_ok());
        assert!(validate_time_window(None, noon).is_ok());
        let err = validate_time_window(noon, nine).unwrap_err();
        assert!(err.contains("end_time"));
    }
}
