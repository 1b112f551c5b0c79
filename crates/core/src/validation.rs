//! Request validation helpers built on the `validator` crate.
//!
//! DTOs derive `Validate`; handlers turn the resulting
//! [`validator::ValidationErrors`] into a [`FieldErrors`] map so the client
//! receives per-field messages in a stable order.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::resources::is_valid_progress;
use crate::roles::is_valid_team_role;
use crate::shoot::is_valid_status;

/// Field name -> list of human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

/// Flatten `validator` output into a [`FieldErrors`] map.
///
/// Errors without an explicit message fall back to their code, e.g.
/// `"length"` or `"email"`.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| match &e.message {
                Some(m) => m.to_string(),
                None => e.code.to_string(),
            })
            .collect();
        out.insert(field.to_string(), messages);
    }
    out
}

/// One-line summary of a [`FieldErrors`] map, used as the top-level message.
pub fn summarize(fields: &FieldErrors) -> String {
    let parts: Vec<String> = fields
        .iter()
        .map(|(field, msgs)| format!("{field}: {}", msgs.join(", ")))
        .collect();
    if parts.is_empty() {
        "Invalid request".to_string()
    } else {
        parts.join("; ")
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// `#RGB` or `#RRGGBB`.
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(value) {
        Ok(())
    } else {
        Err(error("hex_color", "must be a hex color like #ff8800"))
    }
}

/// One of the board columns.
pub fn validate_shoot_status(value: &str) -> Result<(), ValidationError> {
    if is_valid_status(value) {
        Ok(())
    } else {
        Err(error(
            "shoot_status",
            "must be one of: idea, planning, ready-to-shoot, completed",
        ))
    }
}

/// Costume/prop build progress.
pub fn validate_progress(value: &str) -> Result<(), ValidationError> {
    if is_valid_progress(value) {
        Ok(())
    } else {
        Err(error(
            "progress",
            "must be one of: planned, in-progress, complete",
        ))
    }
}

/// One of the team membership roles.
pub fn validate_team_role(value: &str) -> Result<(), ValidationError> {
    if is_valid_team_role(value) {
        Ok(())
    } else {
        Err(error("team_role", "must be one of: owner, admin, member"))
    }
}

/// Reject strings that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "must not be blank"))
    } else {
        Ok(())
    }
}
