//! Diesel-backed `UsersQuery` adapter built on `DieselUserRepository`.
//!
//! This adapter serves the account directory from PostgreSQL and reports
//! lookups that match no account with the `unknown_user` detail code.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UsersQuery, unknown_user_error};
use crate::domain::{Error, User, UserId};

use super::diesel_user_repository::DieselUserRepository;
use super::user_persistence_error_mapping::map_user_persistence_error;
#[cfg(test)]
use crate::domain::ports::UserPersistenceError;

/// Diesel-backed `UsersQuery` implementation backed by user repository reads.
#[derive(Clone)]
pub struct DieselUsersQuery {
    user_repository: Arc<dyn UserRepository>,
}

impl DieselUsersQuery {
    /// Create a new query adapter backed by a Diesel user repository.
    pub fn new(user_repository: DieselUserRepository) -> Self {
        Self {
            user_repository: Arc::new(user_repository),
        }
    }

    #[cfg(test)]
    fn from_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl UsersQuery for DieselUsersQuery {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repository
            .list_all()
            .await
            .map_err(map_user_persistence_error)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        let maybe_user = self
            .user_repository
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?;

        maybe_user.ok_or_else(|| unknown_user_error(id))
    }
}
