//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

use serde::Deserialize;

pub mod costume;
pub mod equipment;
pub mod location;
pub mod participant;
pub mod personnel;
pub mod prop;
pub mod reference;
pub mod session;
pub mod shoot;
pub mod team;
pub mod user;

/// Query parameters shared by the team resource list endpoints
/// (`?q=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct ResourceListParams {
    /// Case-insensitive substring match on the resource's display name.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
