//! Credentials: password hashing and token issuance.
//!
//! - [`password`] -- Argon2id hashing and the minimum-length rule.
//! - [`jwt`] -- HS256 access tokens and opaque refresh tokens.

pub mod jwt;
pub mod password;
