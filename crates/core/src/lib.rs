//! Domain primitives shared by the database and API crates.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, id and
//! timestamp aliases, team role rules, the shoot lifecycle, resource kinds,
//! JSON key-case conversion, and input validation helpers.

pub mod case;
pub mod error;
pub mod resources;
pub mod roles;
pub mod shoot;
pub mod types;
pub mod validation;
