//! Request handlers, one module per resource.
//!
//! Handlers resolve the caller through the extractors in
//! [`crate::middleware`], delegate to the `shootboard_db` repositories, and
//! wrap successful bodies in [`crate::response::DataResponse`].

pub mod auth;
pub mod costumes;
pub mod equipment;
pub mod locations;
pub mod personnel;
pub mod props;
pub mod shoot_export;
pub mod shoot_items;
pub mod shoots;
pub mod teams;
pub mod user;
