//! Account domain service.
//!
//! Registration, login and profile lookup over a [`UserRepository`] and a
//! [`PasswordHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, UserPersistenceError,
    UserProfileQuery, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, RegistrationDetails, User, UserId, Username,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(format!("{field} is already registered"))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing error: {error}"))
}

/// Account service implementing the login, registration and profile ports.
#[derive(Clone)]
pub struct AccountService<R, H> {
    user_repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(user_repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { user_repo, hasher }
    }
}

#[async_trait]
impl<R, H> RegistrationService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, details: &RegistrationDetails) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(details.password())
            .map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            details.username().clone(),
            details.email().clone(),
        );
        self.user_repo
            .create(&user, &password_hash)
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %user.id(), "registered account");
        Ok(user)
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))?;
        let Some(stored) = self
            .user_repo
            .find_credentials(&username)
            .await
            .map_err(map_repository_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = match self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
        {
            Ok(matches) => matches,
            Err(err) => {
                warn!(user_id = %stored.user.id(), error = %err, "stored password hash unusable");
                false
            }
        };
        if matches {
            Ok(stored.user)
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[async_trait]
impl<R, H> UserProfileQuery for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
