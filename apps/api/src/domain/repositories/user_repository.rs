use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::user::{Email, User};

/// Repository contract for users
#[async_trait]
pub trait UserRepository: Send {
    /// Create a new user
    ///
    /// A duplicate email fails with `EmailAlreadyInUse`.
    async fn create_user(&mut self, user: &User) -> DomainResult<()>;

    /// Find a user by email address
    async fn find_user_by_email(&mut self, email: &Email) -> DomainResult<Option<User>>;
}
