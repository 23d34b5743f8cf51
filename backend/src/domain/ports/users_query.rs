//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch user-visible data
//! without importing outbound persistence concerns. Production can back this
//! port with a repository + mapping layer; tests can use a deterministic
//! in-memory implementation.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{Error, User, UserId};

/// Build the structured error for a lookup that matched no user account.
pub(crate) fn unknown_user_error(id: &UserId) -> Error {
    Error::invalid_request("user not found").with_details(json!({
        "field": "id",
        "value": id.as_ref(),
        "code": "unknown_user",
    }))
}

/// Domain use-case port for reading user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every registered user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Fetch a single user by identifier.
    ///
    /// An id that matches no account yields an `invalid_request` error with
    /// an `unknown_user` detail code.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}

/// Temporary fixture users query used until persistence is wired.
///
/// Serves the same account the fixture login authenticates, so a
/// database-free server still behaves coherently end to end.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

impl FixtureUsersQuery {
    const FIXTURE_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
    const FIXTURE_USERNAME: &'static str = "admin";

    fn fixture_user() -> Result<User, Error> {
        // These values are compile-time constants; surface invalid data as an
        // internal error so automated checks catch accidental regressions.
        User::try_from_strings(Self::FIXTURE_ID, Self::FIXTURE_USERNAME)
            .map_err(|err| Error::internal(format!("invalid fixture user: {err}")))
    }
}

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(vec![Self::fixture_user()?])
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        if id.as_ref() == Self::FIXTURE_ID {
            Self::fixture_user()
        } else {
            Err(unknown_user_error(id))
        }
    }
}
