//! User types.
//!
//! User records are owned by the identity provider; the core only ever
//! reads them (display names, invite lookups).

use chrono::{DateTime, Utc};

use super::UserId;

/// User record
#[derive(Clone, Debug)]
pub struct User {
    pub id: UserId,
    /// Display name; falls back to the email when absent.
    pub name: Option<String>,
    /// Stored lower-cased; lookups are case-insensitive.
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a user
#[derive(Clone, Debug)]
pub struct CreateUserParams {
    pub name: Option<String>,
    pub email: String,
}
